//! Cosmetic effects that outlive the gameplay entities they decorate.

use bevy::prelude::*;

use crate::roster::LevelScoped;
use crate::GamePhase;

/// How long a removed fire bug takes to shrink away.
pub const SHRINK_SECS: f32 = 0.3;

/// Contains the effect systems.
pub struct FxPlugin;

impl Plugin for FxPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShrinkOut>()
            .add_systems(
                Update,
                (spawn_shrink_proxies, animate_shrink)
                    .chain()
                    .in_set(GamePhase::Effects),
            );
    }
}

/// Requests a shrink-and-vanish animation where a body used to be.
#[derive(Clone, Copy, Debug, Event, PartialEq)]
pub struct ShrinkOut {
    pub position: Vec2,
    pub size: Vec2,
}

/// A sprite that shrinks to nothing, then despawns.
#[derive(Clone, Component, Debug)]
pub struct Shrinking(pub Timer);

/// Spawns a stand-in sprite for each shrink request.
pub fn spawn_shrink_proxies(mut commands: Commands, mut requests: EventReader<ShrinkOut>) {
    for request in requests.read() {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::rgb(0.95, 0.45, 0.1),
                    custom_size: Some(request.size),
                    ..default()
                },
                transform: Transform::from_translation(request.position.extend(1.0)),
                ..default()
            },
            Shrinking(Timer::from_seconds(SHRINK_SECS, TimerMode::Once)),
            LevelScoped,
        ));
    }
}

/// Scales shrinking sprites down and despawns finished ones.
pub fn animate_shrink(
    mut commands: Commands,
    time: Res<Time>,
    mut shrinking: Query<(Entity, &mut Shrinking, &mut Transform)>,
) {
    for (entity, mut shrink, mut transform) in shrinking.iter_mut() {
        shrink.0.tick(time.delta());

        if shrink.0.finished() {
            commands.entity(entity).despawn_recursive();
        } else {
            transform.scale = Vec3::splat(1.0 - shrink.0.fraction());
        }
    }
}
