//! The win condition.
//!
//! While a round is running, fire bugs that overlap a killing point are
//! removed even if the physics engine never reported the contact (fast
//! bodies can tunnel past it). Once no bug of either kind is left, the round
//! is won.

use bevy::prelude::*;

use crate::bug::Predator;
use crate::config::GameConfig;
use crate::fx::ShrinkOut;
use crate::physics::BodySize;
use crate::roster::{KillZoneVolume, Roster};
use crate::round::{commit, on_outcome, Outcome, RoundEffect, RoundState};
use crate::GamePhase;

/// Contains the win condition systems.
pub struct WinPlugin;

impl Plugin for WinPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoundClock>().add_systems(
            Update,
            (sweep_kill_zones, check_round_over)
                .chain()
                .in_set(GamePhase::Evaluate)
                .run_if(in_state(RoundState::Playing)),
        );
    }
}

/// Time spent in the running round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Resource)]
pub struct RoundClock {
    pub elapsed: f32,
}

impl RoundClock {
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Fire bugs whose bounds overlap any killing point, in input order.
pub fn overlapping_predators(
    zones: &[KillZoneVolume],
    predators: impl IntoIterator<Item = (Entity, Rect)>,
) -> Vec<Entity> {
    predators
        .into_iter()
        .filter(|(_, bounds)| {
            zones
                .iter()
                .any(|zone| !zone.bounds.intersect(*bounds).is_empty())
        })
        .map(|(entity, _)| entity)
        .collect()
}

/// Decides whether a running round is over.
pub fn round_outcome(
    hostiles_remaining: usize,
    elapsed: f32,
    limit: Option<f32>,
) -> Option<Outcome> {
    if hostiles_remaining == 0 {
        Some(Outcome::Won)
    } else if limit.is_some_and(|limit| elapsed > limit) {
        Some(Outcome::Lost)
    } else {
        None
    }
}

/// Removes fire bugs sitting in killing points.
pub fn sweep_kill_zones(
    mut commands: Commands,
    mut roster: ResMut<Roster>,
    predators: Query<(Entity, &Transform, &BodySize), With<Predator>>,
    mut shrink: EventWriter<ShrinkOut>,
) {
    if roster.kill_zones().is_empty() || roster.predator_count() == 0 {
        return;
    }

    let doomed = overlapping_predators(
        roster.kill_zones(),
        predators
            .iter()
            .filter(|(entity, ..)| roster.is_live(*entity))
            .map(|(entity, transform, size)| {
                (entity, size.bounds(transform.translation.truncate()))
            }),
    );

    for entity in doomed {
        let Ok((_, transform, size)) = predators.get(entity) else {
            continue;
        };

        if roster.despawn(&mut commands, entity).is_some() {
            shrink.send(ShrinkOut {
                position: transform.translation.truncate(),
                size: size.0,
            });
        }
    }
}

/// Ends the round once it is decided.
pub fn check_round_over(
    time: Res<Time>,
    config: Res<GameConfig>,
    roster: Res<Roster>,
    mut clock: ResMut<RoundClock>,
    state: Res<State<RoundState>>,
    mut next_state: ResMut<NextState<RoundState>>,
    mut effects: EventWriter<RoundEffect>,
) {
    clock.elapsed += time.delta_seconds();

    let Some(outcome) = round_outcome(
        roster.hostiles_remaining(),
        clock.elapsed,
        config.round_time_limit_secs,
    ) else {
        return;
    };

    info!(?outcome, elapsed = clock.elapsed, "round over");
    let current = *state.get();
    commit(current, on_outcome(current, outcome), &mut next_state, &mut effects);
}
