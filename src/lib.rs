//! Pest Control!
//!
//! A top-down bug hunt played on tile maps. The player taps to run around
//! the map collecting bugs while fire bugs have to be lured into killing
//! points. A round is won once no bug of either kind is left.

pub mod bug;
pub mod camera;
pub mod config;
pub mod contact;
pub mod error;
pub mod fx;
pub mod hud;
pub mod input;
pub mod level;
pub mod map;
pub mod physics;
pub mod player;
pub mod roster;
pub mod round;
pub mod spawn;
pub mod win;

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

pub use round::RoundState;

/// The game's plugins.
///
/// The physics engine itself is not part of the group; add
/// [`RapierPhysicsPlugin`](bevy_rapier2d::prelude::RapierPhysicsPlugin)
/// alongside it.
pub struct GamePlugins;

impl PluginGroup for GamePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(GamePhasePlugin)
            .add(physics::PhysicsPlugin)
            .add(physics::controller::ControllerPlugin)
            .add(round::RoundPlugin)
            .add(input::TapPlugin)
            .add(level::LevelPlugin)
            .add(player::PlayerPlugin)
            .add(bug::BugPlugin)
            .add(contact::ContactPlugin)
            .add(win::WinPlugin)
            .add(camera::CameraPlugin)
            .add(hud::HudPlugin)
            .add(fx::FxPlugin)
    }
}

/// Orders the game phases within a frame.
pub struct GamePhasePlugin;

impl Plugin for GamePhasePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<config::GameConfig>()
            .configure_sets(
                Update,
                (
                    GamePhase::Input,
                    GamePhase::Contacts,
                    GamePhase::Evaluate,
                    GamePhase::Effects,
                    GamePhase::Movement,
                )
                    .chain(),
            )
            .configure_sets(
                PostUpdate,
                GamePhase::Camera
                    .after(bevy_rapier2d::plugin::PhysicsSet::Writeback)
                    .before(bevy::transform::TransformSystem::TransformPropagate),
            );
    }
}

/// The phases of the game logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, SystemSet)]
pub enum GamePhase {
    /// Input scanning and input-driven round transitions.
    Input,
    /// Reacting to contacts reported by the last physics step.
    Contacts,
    /// Win-condition checks while a round is running.
    Evaluate,
    /// Carrying out the effects requested by round transitions.
    Effects,
    /// Applying movement intents to physics bodies.
    Movement,
    /// For late-calculated camera shenanigans to prevent 1-frame delay.
    Camera,
}
