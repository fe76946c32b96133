//! Static collision volumes: map boundaries, obstacles and killing points.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::physics::category::{CategoryBundle, PhysicsCategory};
use crate::physics::BodySize;

/// A bundle for a static, rectangular, fully elastic volume.
#[derive(Bundle)]
pub struct StaticVolumeBundle {
    pub sprite: Sprite,
    pub texture: Handle<Image>,
    pub transform: Transform,
    pub global_transform: GlobalTransform,
    pub visibility: Visibility,
    pub view_visibility: ViewVisibility,
    pub inherited_visibility: InheritedVisibility,
    pub collider: Collider,
    pub rigid_body: RigidBody,
    pub gravity_scale: GravityScale,
    pub friction: Friction,
    pub restitution: Restitution,
    pub active_events: ActiveEvents,
    pub category: CategoryBundle,
    pub size: BodySize,
}

impl StaticVolumeBundle {
    /// An invisible rectangle of `size` centered at `center`.
    pub fn rect(category: PhysicsCategory, center: Vec2, size: Vec2) -> Self {
        StaticVolumeBundle {
            sprite: Sprite {
                color: Color::NONE,
                custom_size: Some(size),
                ..default()
            },
            texture: default(),
            transform: Transform::from_translation(center.extend(0.0)),
            global_transform: default(),
            visibility: default(),
            view_visibility: default(),
            inherited_visibility: default(),
            collider: Collider::cuboid(size.x / 2.0, size.y / 2.0),
            rigid_body: RigidBody::Fixed,
            gravity_scale: GravityScale(0.0),
            friction: Friction::coefficient(0.0),
            restitution: Restitution::coefficient(1.0),
            active_events: ActiveEvents::COLLISION_EVENTS,
            category: category.bundle(),
            size: BodySize(size),
        }
    }
}

/// A bundle for the edge loop enclosing the map.
#[derive(Bundle)]
pub struct BoundaryBundle {
    pub transform: TransformBundle,
    pub collider: Collider,
    pub rigid_body: RigidBody,
    pub friction: Friction,
    pub category: CategoryBundle,
}

impl BoundaryBundle {
    /// Encloses the rectangle from the origin to `size`.
    pub fn new(size: Vec2) -> Self {
        BoundaryBundle {
            transform: default(),
            collider: Collider::polyline(
                edge_loop(size).to_vec(),
                Some(vec![[0, 1], [1, 2], [2, 3], [3, 0]]),
            ),
            rigid_body: RigidBody::Fixed,
            friction: Friction::coefficient(0.0),
            category: PhysicsCategory::Boundary.bundle(),
        }
    }
}

/// The corners of the map rectangle, counter-clockwise from the origin.
pub fn edge_loop(size: Vec2) -> [Vec2; 4] {
    [
        Vec2::ZERO,
        Vec2::new(size.x, 0.0),
        size,
        Vec2::new(0.0, size.y),
    ]
}
