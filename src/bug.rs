//! Bugs and fire bugs, and their wandering.

use std::time::Duration;

use bevy::prelude::*;

use crate::physics::controller::Controller;
use crate::round::RoundState;
use crate::GamePhase;

/// Contains the wandering system.
pub struct BugPlugin;

impl Plugin for BugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            walk.in_set(GamePhase::Movement)
                .before(crate::physics::controller::apply_controller_movement)
                .run_if(in_state(RoundState::Playing)),
        );
    }
}

/// A bug the player catches.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct Prey;

/// A fire bug, which only dies in a killing point.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct Predator;

const PATROL: [Vec2; 4] = [Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::NEG_Y];

/// A looping patrol: the bug walks along one heading for a while, then turns
/// a quarter to the left.
#[derive(Clone, Component, Debug)]
pub struct Wander {
    step: usize,
    speed: f32,
    timer: Timer,
    started: bool,
}

impl Wander {
    /// A patrol starting at heading `phase` (mod 4).
    pub fn new(interval: f32, speed: f32, phase: usize) -> Self {
        Wander {
            step: phase % PATROL.len(),
            speed,
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
            started: false,
        }
    }

    /// The current desired velocity.
    pub fn heading(&self) -> Vec2 {
        PATROL[self.step] * self.speed
    }

    /// Advances the patrol, returning the new heading if it changed.
    pub fn advance(&mut self, delta: Duration) -> Option<Vec2> {
        if !self.started {
            self.started = true;
            return Some(self.heading());
        }

        let turns = self.timer.tick(delta).times_finished_this_tick() as usize;
        if turns == 0 {
            return None;
        }

        self.step = (self.step + turns) % PATROL.len();
        Some(self.heading())
    }
}

/// Keeps wandering bugs walking.
pub fn walk(time: Res<Time>, mut bugs: Query<(&mut Wander, &mut Controller)>) {
    for (mut wander, mut con) in bugs.iter_mut() {
        if let Some(heading) = wander.advance(time.delta()) {
            con.update_move(heading);
        }
    }
}
