//! Spawns a level from its [`LevelPlan`].

use bevy::prelude::*;

use crate::bug::{Predator, Prey, Wander};
use crate::config::GameConfig;
use crate::map::import::LevelPlan;
use crate::physics::category::PhysicsCategory;
use crate::physics::controller::ControllerBundle;
use crate::physics::volume::{BoundaryBundle, StaticVolumeBundle};
use crate::player::spawn_player;
use crate::roster::{LevelScoped, Roster};

/// A marker for obstacles authored as collision areas.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct Obstacle;

/// A marker for killing points.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct KillZone;

/// Spawns everything in `plan` and records it in `roster`.
///
/// Bugs start wandering right away. Returns the player entity.
pub fn spawn_level(
    commands: &mut Commands,
    plan: &LevelPlan,
    config: &GameConfig,
    roster: &mut Roster,
) -> Entity {
    commands.spawn((BoundaryBundle::new(plan.bounds), LevelScoped));

    for obstacle in &plan.obstacles {
        commands.spawn((
            StaticVolumeBundle::rect(PhysicsCategory::Obstacle, obstacle.center, obstacle.size),
            Obstacle,
            LevelScoped,
        ));
    }

    for zone in &plan.kill_zones {
        let entity = commands
            .spawn((
                StaticVolumeBundle::rect(PhysicsCategory::KillZone, zone.center, zone.size),
                KillZone,
                LevelScoped,
            ))
            .id();
        roster.add_kill_zone(entity, zone.bounds());
    }

    let player = spawn_player(commands, plan.player, config);

    for (i, &position) in plan.prey.iter().enumerate() {
        let entity = commands
            .spawn((
                ControllerBundle::new(
                    PhysicsCategory::Prey,
                    config.bug_size(),
                    Color::rgb(0.35, 0.8, 0.3),
                )
                .at(position, 1.0),
                Wander::new(config.wander_interval_secs, config.bug_speed, i),
                Prey,
                LevelScoped,
            ))
            .id();
        roster.add_prey(entity);
    }

    for (i, &position) in plan.predators.iter().enumerate() {
        let entity = commands
            .spawn((
                ControllerBundle::new(
                    PhysicsCategory::Predator,
                    config.bug_size(),
                    Color::rgb(0.95, 0.45, 0.1),
                )
                .at(position, 1.0),
                Wander::new(config.wander_interval_secs, config.bug_speed, i + 2),
                Predator,
                LevelScoped,
            ))
            .id();
        roster.add_predator(entity);
    }

    info!(
        obstacles = plan.obstacles.len(),
        kill_zones = plan.kill_zones.len(),
        bugs = plan.prey.len(),
        fire_bugs = plan.predators.len(),
        "level spawned"
    );

    player
}
