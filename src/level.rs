//! Level lifecycle.
//!
//! Every time the round state enters [`RoundState::StartingLevel`] the
//! running level instance is torn down and a fresh one is built from the
//! map of [`CurrentLevel`]. A map that fails to load aborts the game.

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::error::LevelError;
use crate::map::import::LevelPlan;
use crate::map::Maps;
use crate::roster::{LevelScoped, Roster};
use crate::round::{RoundEffect, RoundState};
use crate::spawn::spawn_level;
use crate::win::RoundClock;
use crate::GamePhase;

/// Contains the level setup systems.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentLevel>()
            .init_resource::<LevelBounds>()
            .init_resource::<Roster>()
            .add_systems(
                OnEnter(RoundState::StartingLevel),
                setup_level.pipe(report_level_error),
            )
            .add_systems(Update, apply_level_effects.in_set(GamePhase::Effects));
    }
}

/// The level being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Resource)]
pub struct CurrentLevel(pub u32);

impl Default for CurrentLevel {
    fn default() -> Self {
        CurrentLevel(1)
    }
}

/// The size of the current map in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Resource)]
pub struct LevelBounds(pub Vec2);

/// Tears down the previous level instance and builds the current one.
#[allow(clippy::too_many_arguments)]
pub fn setup_level(
    mut commands: Commands,
    level: Res<CurrentLevel>,
    maps: Res<Maps>,
    config: Res<GameConfig>,
    mut roster: ResMut<Roster>,
    mut bounds: ResMut<LevelBounds>,
    mut clock: ResMut<RoundClock>,
    scoped: Query<Entity, With<LevelScoped>>,
) -> Result<(), LevelError> {
    for entity in scoped.iter() {
        commands.entity(entity).despawn_recursive();
    }
    roster.clear();
    clock.reset();

    info!(level = level.0, "loading level");
    let map = maps.load(level.0)?;
    let plan = LevelPlan::from_map(&map)?;

    bounds.0 = plan.bounds;
    spawn_level(&mut commands, &plan, &config, &mut roster);

    Ok(())
}

/// Aborts the game if the level failed to load.
pub fn report_level_error(In(result): In<Result<(), LevelError>>, mut exit: EventWriter<AppExit>) {
    if let Err(err) = result {
        error!("failed to load level: {err}");
        exit.send(AppExit);
    }
}

/// Moves on to the level requested by the round.
///
/// Running out of maps starts over at the first level.
pub fn apply_level_effects(
    mut effects: EventReader<RoundEffect>,
    mut level: ResMut<CurrentLevel>,
    maps: Res<Maps>,
    config: Res<GameConfig>,
) {
    for effect in effects.read() {
        let RoundEffect::LoadLevel(next) = *effect else {
            continue;
        };

        level.0 = if maps.has_level(next) {
            next
        } else {
            info!(level = next, "no more levels, starting over");
            config.first_level
        };
    }
}
