//! Physics setup shared by every body in a level.

pub mod category;
pub mod controller;
pub mod volume;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::round::{RoundEffect, RoundState};
use crate::GamePhase;

/// Plugin for this module.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, disable_gravity)
            .add_systems(OnEnter(RoundState::StartingLevel), suspend_simulation)
            .add_systems(Update, apply_simulation_effects.in_set(GamePhase::Effects));
    }
}

/// The axis-aligned extent of a body, in pixels.
///
/// Used for geometric overlap checks that do not go through the physics
/// engine.
#[derive(Clone, Copy, Component, Debug, PartialEq)]
pub struct BodySize(pub Vec2);

impl BodySize {
    /// The bounds of a body with this size centered at `center`.
    pub fn bounds(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center, self.0)
    }
}

/// The map is viewed top-down.
pub fn disable_gravity(config: Option<ResMut<RapierConfiguration>>) {
    if let Some(mut config) = config {
        config.gravity = Vec2::ZERO;
    }
}

/// Freezes the simulation while the level waits for the first tap.
pub fn suspend_simulation(config: Option<ResMut<RapierConfiguration>>) {
    if let Some(mut config) = config {
        config.physics_pipeline_active = false;
        debug!("physics suspended");
    }
}

/// Resumes the simulation when a round starts.
pub fn apply_simulation_effects(
    mut effects: EventReader<RoundEffect>,
    config: Option<ResMut<RapierConfiguration>>,
) {
    let resume = effects
        .read()
        .any(|effect| matches!(effect, RoundEffect::ResumeSimulation));

    if let (true, Some(mut config)) = (resume, config) {
        config.physics_pipeline_active = true;
        debug!("physics resumed");
    }
}
