//! Turns a map's object groups into a plan of what to spawn.
//!
//! Group semantics are fixed by name: [`COLLISION_AREAS`] and
//! [`KILLING_POINTS`] hold rectangles, [`PLAYER`], [`BUGS`] and
//! [`FIRE_BUGS`] hold spawn points. A group missing from the map counts as
//! empty.

use bevy::prelude::*;

use crate::error::LevelError;
use crate::map::{MapObject, TileMap};

pub const COLLISION_AREAS: &str = "CollisionAreas";
pub const KILLING_POINTS: &str = "KillingPoints";
pub const PLAYER: &str = "Player";
pub const BUGS: &str = "Bugs";
pub const FIRE_BUGS: &str = "FireBugs";

/// Killing points are half the size of the rectangle drawn in the map.
pub const KILL_ZONE_SCALE: f32 = 0.5;

/// A static rectangular volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectVolume {
    pub center: Vec2,
    pub size: Vec2,
}

impl RectVolume {
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }
}

/// Everything a level spawns, in authored order.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelPlan {
    /// Map size in pixels.
    pub bounds: Vec2,
    pub obstacles: Vec<RectVolume>,
    pub kill_zones: Vec<RectVolume>,
    pub player: Vec2,
    pub prey: Vec<Vec2>,
    pub predators: Vec<Vec2>,
}

impl LevelPlan {
    /// Imports every group of `map`.
    pub fn from_map(map: &TileMap) -> Result<LevelPlan, LevelError> {
        let players = import_points(map, PLAYER)?;
        let &[player] = players.as_slice() else {
            return Err(LevelError::PlayerSpawnCount(players.len()));
        };

        Ok(LevelPlan {
            bounds: map.pixel_size(),
            obstacles: import_rects(map, COLLISION_AREAS, 1.0)?,
            kill_zones: import_rects(map, KILLING_POINTS, KILL_ZONE_SCALE)?,
            player,
            prey: import_points(map, BUGS)?,
            predators: import_points(map, FIRE_BUGS)?,
        })
    }
}

fn objects<'a>(map: &'a TileMap, group: &str) -> &'a [MapObject] {
    map.group(group)
        .map(|g| g.objects.as_slice())
        .unwrap_or_default()
}

fn malformed(group: &str, index: usize, reason: impl Into<String>) -> LevelError {
    LevelError::MalformedObject {
        group: group.into(),
        index,
        reason: reason.into(),
    }
}

fn coordinate(group: &str, index: usize, object: &MapObject) -> Result<Vec2, LevelError> {
    if !(object.x.is_finite() && object.y.is_finite()) {
        return Err(malformed(group, index, "non-finite position"));
    }
    Ok(Vec2::new(object.x, object.y))
}

/// Imports a rectangle group.
///
/// Each rectangle is centered at `(x + width/2, y + height/2)`; its volume is
/// the authored size times `scale`.
pub fn import_rects(map: &TileMap, group: &str, scale: f32) -> Result<Vec<RectVolume>, LevelError> {
    objects(map, group)
        .iter()
        .enumerate()
        .map(|(index, object)| {
            let origin = coordinate(group, index, object)?;
            let (Some(width), Some(height)) = (object.width, object.height) else {
                return Err(malformed(group, index, "rectangle without width and height"));
            };
            if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
                return Err(malformed(group, index, format!("bad size {width}x{height}")));
            }

            let size = Vec2::new(width, height);
            Ok(RectVolume {
                center: origin + size / 2.0,
                size: size * scale,
            })
        })
        .collect()
}

/// Imports a spawn point group.
pub fn import_points(map: &TileMap, group: &str) -> Result<Vec<Vec2>, LevelError> {
    objects(map, group)
        .iter()
        .enumerate()
        .map(|(index, object)| coordinate(group, index, object))
        .collect()
}
