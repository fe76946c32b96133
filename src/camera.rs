//! The local camera, following the player around the map.
//!
//! The camera is expressed as a world offset: map point `p` is drawn at
//! screen point `p + offset`. On each axis the offset pins the map's near
//! edge while the player is within half a viewport of it, pins the far edge
//! the same way, and keeps the player centered in between. There is no
//! smoothing.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::level::LevelBounds;
use crate::player::LocalPlayer;
use crate::GamePhase;

/// Contains systems for the camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .init_resource::<WorldOffset>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                PostUpdate,
                (sync_viewport, update_camera_position)
                    .chain()
                    .in_set(GamePhase::Camera),
            );
    }
}

/// A marker component that marks the local camera.
///
/// There can only be one local camera at a time.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct LocalCamera;

/// The size of the visible screen area in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Resource)]
pub struct Viewport(pub Vec2);

impl Default for Viewport {
    fn default() -> Self {
        Viewport(Vec2::new(1024.0, 768.0))
    }
}

/// The translation applied to the world to keep the player in view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Resource)]
pub struct WorldOffset(pub Vec2);

impl WorldOffset {
    /// The camera translation that realizes this offset.
    pub fn camera_translation(&self, viewport: Vec2) -> Vec2 {
        viewport / 2.0 - self.0
    }
}

/// The offset on one axis.
pub fn axis_offset(player: f32, viewport: f32, map: f32) -> f32 {
    let half = viewport / 2.0;

    if player < half {
        0.0
    } else if player > map - half {
        viewport - map
    } else {
        half - player
    }
}

/// The offset on both axes.
pub fn world_offset(player: Vec2, viewport: Vec2, map: Vec2) -> Vec2 {
    Vec2::new(
        axis_offset(player.x, viewport.x, map.x),
        axis_offset(player.y, viewport.y, map.y),
    )
}

/// A system that spawns the camera.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), LocalCamera));
}

/// Follows the primary window's size.
pub fn sync_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    if let Ok(window) = windows.get_single() {
        let size = Vec2::new(window.width(), window.height());
        if viewport.0 != size {
            viewport.0 = size;
        }
    }
}

/// Updates the camera's position based on the player position.
pub fn update_camera_position(
    player: Query<&Transform, With<LocalPlayer>>,
    mut camera: Query<&mut Transform, (With<LocalCamera>, Without<LocalPlayer>)>,
    viewport: Res<Viewport>,
    bounds: Res<LevelBounds>,
    mut offset: ResMut<WorldOffset>,
) {
    let Ok(player_transform) = player.get_single() else {
        return;
    };

    let new_offset = world_offset(player_transform.translation.truncate(), viewport.0, bounds.0);
    if offset.0 != new_offset {
        offset.0 = new_offset;
    }

    if let Ok(mut camera_transform) = camera.get_single_mut() {
        let z = camera_transform.translation.z;
        camera_transform.translation = offset.camera_translation(viewport.0).extend(z);
    }
}
