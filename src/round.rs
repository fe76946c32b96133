//! The round state machine.
//!
//! A level instance starts in [`RoundState::StartingLevel`] with the
//! simulation suspended. The first tap starts the round *and* moves the
//! player. The round ends in [`RoundState::InLevelMenu`], from which tapping
//! "Next level?" builds a fresh instance of the next level.
//!
//! Transitions are computed by pure functions returning the next state and a
//! list of [`RoundEffect`]s. The effects are published as events and carried
//! out by the plugins that own the affected things.

use bevy::prelude::*;

use crate::camera::{Viewport, WorldOffset};
use crate::config::GameConfig;
use crate::input::Tap;
use crate::level::CurrentLevel;
use crate::GamePhase;

/// Registers the round state and its input handling.
pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<RoundState>()
            .add_event::<RoundEffect>()
            .add_systems(
                Update,
                handle_taps
                    .in_set(GamePhase::Input)
                    .after(crate::input::collect_taps),
            );
    }
}

/// The state of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, States)]
pub enum RoundState {
    /// Waiting for the first tap. The simulation is suspended.
    #[default]
    StartingLevel,
    /// The player is hunting.
    Playing,
    /// The round is over and the end-of-round menu is up.
    InLevelMenu,
}

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Won => "You win!!!",
            Outcome::Lost => "Too slow!!!",
        }
    }
}

/// Something a transition asks the rest of the game to do.
#[derive(Clone, Copy, Debug, Event, PartialEq)]
pub enum RoundEffect {
    /// Hide the "tap to run" prompt.
    HidePrompt,
    /// Let the physics simulation run.
    ResumeSimulation,
    /// Send the player toward a point in map space.
    MovePlayer(Vec2),
    /// Show the outcome text.
    ShowOutcome(Outcome),
    /// Show the "Next level?" control.
    RevealNextLevel,
    /// Bring the player to rest.
    RestPlayer,
    /// Replace this level instance with a fresh one of the given level.
    LoadLevel(u32),
}

/// The result of feeding an event to the state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub next: RoundState,
    pub effects: Vec<RoundEffect>,
}

impl Transition {
    fn stay(state: RoundState) -> Self {
        Transition {
            next: state,
            effects: Vec::new(),
        }
    }

    /// Whether this transition discards the running level instance.
    pub fn ends_instance(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, RoundEffect::LoadLevel(_)))
    }
}

/// What a tap is resolved against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapContext {
    /// The current world offset; map space = screen space − offset.
    pub world_offset: Vec2,
    /// The "Next level?" control in screen space.
    pub next_level_control: Rect,
    /// The level being played.
    pub level: u32,
}

/// How far below the screen center the "Next level?" control sits.
pub const NEXT_LEVEL_DROP: f32 = 40.0;

/// The "Next level?" control's hit box in screen space.
pub fn next_level_control(viewport: Vec2, size: Vec2) -> Rect {
    Rect::from_center_size(
        Vec2::new(viewport.x / 2.0, viewport.y / 2.0 - NEXT_LEVEL_DROP),
        size,
    )
}

/// Feeds a tap at `screen` (origin bottom-left) to the state machine.
pub fn on_tap(state: RoundState, screen: Vec2, ctx: &TapContext) -> Transition {
    let target = screen - ctx.world_offset;

    match state {
        // the tap that starts the round also moves the player
        RoundState::StartingLevel => Transition {
            next: RoundState::Playing,
            effects: vec![
                RoundEffect::HidePrompt,
                RoundEffect::ResumeSimulation,
                RoundEffect::MovePlayer(target),
            ],
        },
        RoundState::Playing => Transition {
            next: RoundState::Playing,
            effects: vec![RoundEffect::MovePlayer(target)],
        },
        RoundState::InLevelMenu if ctx.next_level_control.contains(screen) => Transition {
            next: RoundState::StartingLevel,
            effects: vec![RoundEffect::LoadLevel(ctx.level + 1)],
        },
        RoundState::InLevelMenu => Transition::stay(state),
    }
}

/// Ends a running round.
///
/// Rounds that are not running ignore outcomes.
pub fn on_outcome(state: RoundState, outcome: Outcome) -> Transition {
    match state {
        RoundState::Playing => Transition {
            next: RoundState::InLevelMenu,
            effects: vec![
                RoundEffect::ShowOutcome(outcome),
                RoundEffect::RevealNextLevel,
                RoundEffect::RestPlayer,
            ],
        },
        _ => Transition::stay(state),
    }
}

/// Publishes a transition's effects and schedules its state change.
pub fn commit(
    current: RoundState,
    transition: Transition,
    next_state: &mut NextState<RoundState>,
    effects: &mut EventWriter<RoundEffect>,
) {
    effects.send_batch(transition.effects);

    if transition.next != current {
        info!(from = ?current, to = ?transition.next, "round state change");
        next_state.set(transition.next);
    }
}

/// Feeds this frame's taps to the state machine.
#[allow(clippy::too_many_arguments)]
pub fn handle_taps(
    mut taps: EventReader<Tap>,
    state: Res<State<RoundState>>,
    mut next_state: ResMut<NextState<RoundState>>,
    mut effects: EventWriter<RoundEffect>,
    offset: Res<WorldOffset>,
    viewport: Res<Viewport>,
    level: Res<CurrentLevel>,
    config: Res<GameConfig>,
) {
    let ctx = TapContext {
        world_offset: offset.0,
        next_level_control: next_level_control(viewport.0, config.next_level_hitbox()),
        level: level.0,
    };

    let current = *state.get();
    let mut round = current;

    for tap in taps.read() {
        let transition = on_tap(round, tap.screen, &ctx);
        let ends_instance = transition.ends_instance();

        round = transition.next;
        effects.send_batch(transition.effects);

        if ends_instance {
            // the remaining taps were meant for the discarded instance
            break;
        }
    }

    commit(current, Transition::stay(round), &mut next_state, &mut effects);
}
