//! Shared helpers for the scenario tests.
//!
//! The app runs headless: no window, no renderer and no physics engine.
//! Contacts are injected as [`CollisionEvent`]s and taps as [`Tap`]s.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

use pest_control::camera::Viewport;
use pest_control::config::GameConfig;
use pest_control::input::Tap;
use pest_control::map::import::{BUGS, COLLISION_AREAS, FIRE_BUGS, KILLING_POINTS, PLAYER};
use pest_control::map::{InMemoryMaps, MapObject, Maps, TileMap};
use pest_control::player::LocalPlayer;
use pest_control::roster::Roster;
use pest_control::{GamePlugins, RoundState};

/// The screen size used by every test app.
pub const VIEWPORT: Vec2 = Vec2::new(480.0, 320.0);

/// A 960x640 map with the player in the bottom-left corner.
pub fn empty_level() -> TileMap {
    TileMap::new(30, 20, 32.0, 32.0).with_group(PLAYER, vec![MapObject::point(100.0, 100.0)])
}

/// One bug, far from the player, and an obstacle.
pub fn bug_level() -> TileMap {
    empty_level()
        .with_group(COLLISION_AREAS, vec![MapObject::rect(300.0, 300.0, 64.0, 64.0)])
        .with_group(BUGS, vec![MapObject::point(600.0, 400.0)])
}

/// A fire bug sitting on a killing point.
pub fn fire_bug_level() -> TileMap {
    empty_level()
        .with_group(KILLING_POINTS, vec![MapObject::rect(480.0, 280.0, 40.0, 40.0)])
        .with_group(FIRE_BUGS, vec![MapObject::point(500.0, 300.0)])
}

/// Builds a headless app over `maps` and runs its first frame, which sets
/// up the first level.
///
/// The physics engine is left out, but its configuration is present so the
/// simulation can be suspended and resumed.
pub fn test_app(maps: InMemoryMaps) -> App {
    test_app_with_config(maps, GameConfig::default())
}

pub fn test_app_with_config(maps: InMemoryMaps, config: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .insert_resource(Maps::new(maps))
        .insert_resource(Viewport(VIEWPORT))
        .insert_resource(RapierConfiguration::default())
        .add_plugins(GamePlugins);
    app.finish();
    app.cleanup();
    app.update();
    app
}

pub fn pipeline_active(app: &App) -> bool {
    app.world.resource::<RapierConfiguration>().physics_pipeline_active
}

pub fn round_state(app: &App) -> RoundState {
    *app.world.resource::<State<RoundState>>().get()
}

pub fn roster(app: &App) -> &Roster {
    app.world.resource::<Roster>()
}

pub fn player(app: &mut App) -> Entity {
    let mut query = app.world.query_filtered::<Entity, With<LocalPlayer>>();
    query.single(&app.world)
}

/// Entities carrying `T`.
pub fn all_with<T: Component>(app: &mut App) -> Vec<Entity> {
    let mut query = app.world.query_filtered::<Entity, With<T>>();
    query.iter(&app.world).collect()
}

/// Taps the screen at `screen` and runs a frame.
pub fn tap(app: &mut App, screen: Vec2) {
    app.world.send_event(Tap { screen });
    app.update();
}

/// Starts the round with a tap at the screen center and runs frames until
/// the state change has been applied.
pub fn start_round(app: &mut App) {
    tap(app, VIEWPORT / 2.0);
    app.update();
    assert_eq!(round_state(app), RoundState::Playing);
}

pub fn contact_started(app: &mut App, a: Entity, b: Entity) {
    app.world
        .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
}

pub fn contact_stopped(app: &mut App, a: Entity, b: Entity) {
    app.world
        .send_event(CollisionEvent::Stopped(a, b, CollisionEventFlags::empty()));
}
