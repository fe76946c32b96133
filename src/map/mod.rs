//! Tile map data and where it comes from.
//!
//! A level's map is authored in a tile map editor and exported as JSON. The
//! game only needs the map dimensions and its named object groups; tile
//! layers are a rendering concern. Object coordinates are in map space: the
//! origin is the bottom-left corner of the map and y grows upward.

pub mod import;

use std::collections::HashMap;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// A level's map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    /// Width of the map in tiles.
    pub width: u32,
    /// Height of the map in tiles.
    pub height: u32,
    /// Width of a tile in pixels.
    pub tile_width: f32,
    /// Height of a tile in pixels.
    pub tile_height: f32,
    #[serde(default)]
    pub object_groups: Vec<ObjectGroup>,
}

impl TileMap {
    /// An empty map of `width` by `height` tiles.
    pub fn new(width: u32, height: u32, tile_width: f32, tile_height: f32) -> Self {
        TileMap {
            width,
            height,
            tile_width,
            tile_height,
            object_groups: Vec::new(),
        }
    }

    /// Adds an object group.
    pub fn with_group(mut self, name: impl Into<String>, objects: Vec<MapObject>) -> Self {
        self.object_groups.push(ObjectGroup {
            name: name.into(),
            objects,
        });
        self
    }

    /// The map size in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_width,
            self.height as f32 * self.tile_height,
        )
    }

    /// Finds an object group by name.
    pub fn group(&self, name: &str) -> Option<&ObjectGroup> {
        self.object_groups.iter().find(|g| g.name == name)
    }
}

/// A named collection of authored objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectGroup {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

/// An authored object.
///
/// Rectangles carry a width and height; spawn points do not.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl MapObject {
    /// A spawn point.
    pub fn point(x: f32, y: f32) -> Self {
        MapObject {
            x,
            y,
            width: None,
            height: None,
        }
    }

    /// A rectangle with its bottom-left corner at `(x, y)`.
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        MapObject {
            x,
            y,
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Something that can provide the map of a level.
pub trait MapSource: Send + Sync + 'static {
    /// Loads the map of `level`.
    fn load(&self, level: u32) -> Result<TileMap, LevelError>;

    /// Whether `level` exists.
    fn has_level(&self, level: u32) -> bool;
}

/// The map source the game loads levels from.
#[derive(Resource)]
pub struct Maps(Box<dyn MapSource>);

impl Maps {
    pub fn new(source: impl MapSource) -> Self {
        Maps(Box::new(source))
    }

    pub fn load(&self, level: u32) -> Result<TileMap, LevelError> {
        self.0.load(level)
    }

    pub fn has_level(&self, level: u32) -> bool {
        self.0.has_level(level)
    }
}

/// Maps held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMaps {
    levels: HashMap<u32, TileMap>,
}

impl InMemoryMaps {
    pub fn with_level(mut self, level: u32, map: TileMap) -> Self {
        self.levels.insert(level, map);
        self
    }
}

impl MapSource for InMemoryMaps {
    fn load(&self, level: u32) -> Result<TileMap, LevelError> {
        self.levels
            .get(&level)
            .cloned()
            .ok_or(LevelError::UnknownLevel(level))
    }

    fn has_level(&self, level: u32) -> bool {
        self.levels.contains_key(&level)
    }
}

/// Maps stored as `level-{n}.json` files in a directory.
#[derive(Clone, Debug)]
pub struct DirectoryMaps {
    root: PathBuf,
}

impl DirectoryMaps {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryMaps { root: root.into() }
    }

    /// The file `level` is stored in.
    pub fn path(&self, level: u32) -> PathBuf {
        self.root.join(format!("level-{level}.json"))
    }
}

impl MapSource for DirectoryMaps {
    fn load(&self, level: u32) -> Result<TileMap, LevelError> {
        let text = match std::fs::read_to_string(self.path(level)) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(LevelError::UnknownLevel(level));
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_str(&text)?)
    }

    fn has_level(&self, level: u32) -> bool {
        self.path(level).is_file()
    }
}
