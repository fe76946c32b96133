//! The live roster of a level.
//!
//! Rules that remove bugs go through [`Roster::remove`] so an entity removed
//! twice in one tick (by a contact and by the kill zone sweep, say) is only
//! despawned and counted once.

use std::collections::BTreeSet;

use bevy::prelude::*;

/// Marks entities that belong to the running level and go away with it.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct LevelScoped;

/// The kind of a removable bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hostile {
    Prey,
    Predator,
}

/// A killing point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KillZoneVolume {
    pub entity: Entity,
    pub bounds: Rect,
}

/// Live bugs and killing points of the running level.
#[derive(Clone, Debug, Default, Resource)]
pub struct Roster {
    prey: BTreeSet<Entity>,
    predators: BTreeSet<Entity>,
    kill_zones: Vec<KillZoneVolume>,
}

impl Roster {
    pub fn add_prey(&mut self, entity: Entity) {
        self.prey.insert(entity);
    }

    pub fn add_predator(&mut self, entity: Entity) {
        self.predators.insert(entity);
    }

    pub fn add_kill_zone(&mut self, entity: Entity, bounds: Rect) {
        self.kill_zones.push(KillZoneVolume { entity, bounds });
    }

    /// Takes a bug off the roster.
    ///
    /// Returns `None` if `entity` is not a live bug, including when it was
    /// already removed.
    pub fn remove(&mut self, entity: Entity) -> Option<Hostile> {
        if self.prey.remove(&entity) {
            Some(Hostile::Prey)
        } else if self.predators.remove(&entity) {
            Some(Hostile::Predator)
        } else {
            None
        }
    }

    /// Takes a bug off the roster and despawns it.
    pub fn despawn(&mut self, commands: &mut Commands, entity: Entity) -> Option<Hostile> {
        let hostile = self.remove(entity)?;
        commands.entity(entity).despawn_recursive();
        debug!(?entity, ?hostile, "removed");
        Some(hostile)
    }

    /// Forgets everything; used on level teardown.
    pub fn clear(&mut self) {
        *self = Roster::default();
    }

    pub fn is_live(&self, entity: Entity) -> bool {
        self.prey.contains(&entity) || self.predators.contains(&entity)
    }

    pub fn kill_zones(&self) -> &[KillZoneVolume] {
        &self.kill_zones
    }

    pub fn prey_count(&self) -> usize {
        self.prey.len()
    }

    pub fn predator_count(&self) -> usize {
        self.predators.len()
    }

    /// Bugs of either kind still alive.
    pub fn hostiles_remaining(&self) -> usize {
        self.prey_count() + self.predator_count()
    }
}
