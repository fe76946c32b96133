//! The local player.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::GameConfig;
use crate::physics::category::PhysicsCategory;
use crate::physics::controller::{Controller, ControllerBundle};
use crate::roster::LevelScoped;
use crate::round::RoundEffect;
use crate::GamePhase;

/// Linear damping that brings the player to rest once a round is over.
pub const MENU_LINEAR_DAMPING: f32 = 100.0;

/// Contains systems for the player.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_player_effects.in_set(GamePhase::Effects));
    }
}

/// A marker component that marks the local player.
///
/// There can only be one local player at a time.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct LocalPlayer;

/// Spawns the player at `position`.
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &GameConfig) -> Entity {
    commands
        .spawn((
            ControllerBundle::new(
                PhysicsCategory::Player,
                config.player_size(),
                Color::rgb(0.25, 0.55, 0.95),
            )
            .at(position, 2.0),
            LocalPlayer,
            LevelScoped,
            Name::new("Player"),
        ))
        .id()
}

/// Carries out the round effects that concern the player.
pub fn apply_player_effects(
    mut effects: EventReader<RoundEffect>,
    config: Res<GameConfig>,
    mut player: Query<(&Transform, &mut Controller, &mut Damping), With<LocalPlayer>>,
) {
    let Ok((transform, mut con, mut damping)) = player.get_single_mut() else {
        effects.clear();
        return;
    };

    for effect in effects.read() {
        match *effect {
            RoundEffect::MovePlayer(target) => {
                con.move_toward(transform.translation.truncate(), target, config.player_speed);
            }
            RoundEffect::RestPlayer => {
                damping.linear_damping = MENU_LINEAR_DAMPING;
                con.halt();
            }
            _ => (),
        }
    }
}
