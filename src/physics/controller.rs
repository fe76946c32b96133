//! 2D physics-based movement controller.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::physics::category::{CategoryBundle, PhysicsCategory};
use crate::physics::BodySize;
use crate::GamePhase;

/// Plugin for this module.
pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (apply_controller_movement, sync_sprite_facing)
                .chain()
                .in_set(GamePhase::Movement),
        );
    }
}

/// A bundle that allows an entity to act with a controller.
///
/// [`LockedAxes`] should **always** be [`LockedAxes::ROTATION_LOCKED`].
#[derive(Bundle)]
pub struct ControllerBundle {
    pub sprite: Sprite,
    pub texture: Handle<Image>,
    pub transform: Transform,
    pub global_transform: GlobalTransform,
    pub visibility: Visibility,
    pub view_visibility: ViewVisibility,
    pub inherited_visibility: InheritedVisibility,
    pub collider: Collider,
    pub rigid_body: RigidBody,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
    pub velocity: Velocity,
    pub damping: Damping,
    pub friction: Friction,
    pub restitution: Restitution,
    pub active_events: ActiveEvents,
    pub category: CategoryBundle,
    pub size: BodySize,
    pub controller: Controller,
}

impl ControllerBundle {
    /// A round, frictionless, fully elastic mover of the given category.
    pub fn new(category: PhysicsCategory, size: Vec2, color: Color) -> Self {
        ControllerBundle {
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            texture: default(),
            transform: default(),
            global_transform: default(),
            visibility: default(),
            view_visibility: default(),
            inherited_visibility: default(),
            collider: Collider::ball(size.min_element() / 2.0),
            rigid_body: RigidBody::Dynamic,
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(0.0),
            velocity: default(),
            damping: Damping {
                linear_damping: 0.0,
                angular_damping: 0.0,
            },
            friction: Friction::coefficient(0.0),
            restitution: Restitution::coefficient(1.0),
            active_events: ActiveEvents::COLLISION_EVENTS,
            category: category.bundle(),
            size: BodySize(size),
            controller: default(),
        }
    }

    /// Places the body at `position` on layer `z`.
    pub fn at(mut self, position: Vec2, z: f32) -> Self {
        self.transform = Transform::from_translation(position.extend(z));
        self
    }
}

/// The way a mover is looking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
    Up,
    Down,
}

impl Facing {
    /// The facing closest to `direction`, or `None` for a zero vector.
    ///
    /// Ties between the axes favor the horizontal facings.
    pub fn from_direction(direction: Vec2) -> Option<Facing> {
        if direction.length_squared() <= f32::EPSILON {
            return None;
        }

        let facing = if direction.x.abs() >= direction.y.abs() {
            if direction.x < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            }
        } else if direction.y < 0.0 {
            Facing::Down
        } else {
            Facing::Up
        };

        Some(facing)
    }
}

/// A component that actually holds the state of the controller.
#[derive(Clone, Component, Debug, Default)]
pub struct Controller {
    pending: Option<Vec2>,
    intent: Vec2,
    facing: Facing,
}

impl Controller {
    /// Will set the body's velocity to `movement` on the next movement
    /// phase.
    ///
    /// The vector passed is the desired velocity in pixels/sec. Bounces off
    /// other bodies are left to the physics engine afterwards.
    pub fn update_move(&mut self, movement: Vec2) {
        self.pending = Some(movement);

        if let Some(facing) = Facing::from_direction(movement) {
            self.intent = movement.normalize();
            self.facing = facing;
        }
    }

    /// Starts moving from `from` toward `target` at `speed`.
    ///
    /// Tapping the body's own position keeps the last intent and stops.
    pub fn move_toward(&mut self, from: Vec2, target: Vec2, speed: f32) {
        self.update_move((target - from).normalize_or_zero() * speed);
    }

    /// Brings the body to rest without forgetting where it was heading.
    pub fn halt(&mut self) {
        self.pending = Some(Vec2::ZERO);
    }

    /// Recomputes the facing after the body was deflected.
    ///
    /// The current velocity wins; a body at rest keeps facing along its
    /// last intent.
    pub fn face_current_direction(&mut self, velocity: Vec2) {
        match Facing::from_direction(velocity) {
            Some(facing) => {
                self.intent = velocity.normalize();
                self.facing = facing;
            }
            None => {
                self.facing = Facing::from_direction(self.intent).unwrap_or(self.facing);
            }
        }
    }

    /// The unit direction of the last movement intent.
    pub fn intent(&self) -> Vec2 {
        self.intent
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }
}

/// Actually applies the controller movement.
pub fn apply_controller_movement(mut controllers: Query<(&mut Controller, &mut Velocity)>) {
    for (mut con, mut vel) in controllers.iter_mut() {
        if let Some(movement) = con.pending.take() {
            vel.linvel = movement;
        }
    }
}

/// Mirrors sprites that face left.
pub fn sync_sprite_facing(mut movers: Query<(&Controller, &mut Sprite), Changed<Controller>>) {
    for (con, mut sprite) in movers.iter_mut() {
        let flip = con.facing == Facing::Left;
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_follows_dominant_axis() {
        assert_eq!(Facing::from_direction(Vec2::new(-3.0, 1.0)), Some(Facing::Left));
        assert_eq!(Facing::from_direction(Vec2::new(3.0, -1.0)), Some(Facing::Right));
        assert_eq!(Facing::from_direction(Vec2::new(1.0, 4.0)), Some(Facing::Up));
        assert_eq!(Facing::from_direction(Vec2::new(1.0, -4.0)), Some(Facing::Down));
        assert_eq!(Facing::from_direction(Vec2::ZERO), None);
    }

    #[test]
    fn move_toward_sets_velocity_along_target() {
        let mut con = Controller::default();
        con.move_toward(Vec2::new(10.0, 10.0), Vec2::new(10.0, 110.0), 50.0);

        assert_eq!(con.pending, Some(Vec2::new(0.0, 50.0)));
        assert_eq!(con.intent(), Vec2::Y);
        assert_eq!(con.facing(), Facing::Up);
    }

    #[test]
    fn tapping_own_position_stops_but_keeps_intent() {
        let mut con = Controller::default();
        con.update_move(Vec2::new(-20.0, 0.0));
        con.move_toward(Vec2::ONE, Vec2::ONE, 50.0);

        assert_eq!(con.pending, Some(Vec2::ZERO));
        assert_eq!(con.intent(), Vec2::NEG_X);
        assert_eq!(con.facing(), Facing::Left);
    }

    #[test]
    fn deflection_refaces_from_velocity() {
        let mut con = Controller::default();
        con.update_move(Vec2::new(100.0, 0.0));
        con.face_current_direction(Vec2::new(-100.0, 5.0));

        assert_eq!(con.facing(), Facing::Left);
        assert!(con.intent().x < 0.0);
    }

    #[test]
    fn at_rest_refaces_from_last_intent() {
        let mut con = Controller::default();
        con.update_move(Vec2::new(0.0, -30.0));
        con.face_current_direction(Vec2::ZERO);

        assert_eq!(con.facing(), Facing::Down);
    }

    #[test]
    fn pending_movement_is_applied_once() {
        let mut world = World::new();
        let mut con = Controller::default();
        con.update_move(Vec2::new(5.0, 0.0));
        let entity = world.spawn((con, Velocity::default())).id();

        let mut schedule = bevy::ecs::schedule::Schedule::default();
        schedule.add_systems(apply_controller_movement);
        schedule.run(&mut world);

        assert_eq!(world.get::<Velocity>(entity).unwrap().linvel, Vec2::new(5.0, 0.0));

        // the engine deflects the body; the controller must not undo it
        world.get_mut::<Velocity>(entity).unwrap().linvel = Vec2::new(-5.0, 0.0);
        schedule.run(&mut world);
        assert_eq!(world.get::<Velocity>(entity).unwrap().linvel, Vec2::new(-5.0, 0.0));
    }
}
