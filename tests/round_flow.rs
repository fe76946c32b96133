mod common;

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use pest_control::bug::{Predator, Prey};
use pest_control::camera::{LocalCamera, WorldOffset};
use pest_control::config::GameConfig;
use pest_control::fx::Shrinking;
use pest_control::hud::{MessageLabel, NextLevelLabel, START_PROMPT};
use pest_control::level::{CurrentLevel, LevelBounds};
use pest_control::map::InMemoryMaps;
use pest_control::physics::controller::{Controller, Facing};
use pest_control::player::MENU_LINEAR_DAMPING;
use pest_control::spawn::{KillZone, Obstacle};
use pest_control::win::RoundClock;
use pest_control::RoundState;

use common::*;

fn message(app: &mut App) -> (String, Visibility) {
    let mut query = app
        .world
        .query_filtered::<(&Text, &Visibility), With<MessageLabel>>();
    let (text, visibility) = query.single(&app.world);
    (text.sections[0].value.clone(), *visibility)
}

/// Taps the "Next level?" control.
fn tap_next_level(app: &mut App) {
    tap(app, Vec2::new(VIEWPORT.x / 2.0, VIEWPORT.y / 2.0 - 40.0));
}

/// Catches the only bug of [`bug_level`] and lets the menu come up.
fn win_bug_level(app: &mut App) {
    start_round(app);
    let player = player(app);
    let bug = all_with::<Prey>(app)[0];
    contact_started(app, bug, player);
    app.update();
    app.update();
}

#[test]
fn level_starts_waiting_for_a_tap() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));

    assert_eq!(round_state(&app), RoundState::StartingLevel);
    assert_eq!(roster(&app).prey_count(), 1);
    assert_eq!(roster(&app).predator_count(), 0);
    assert_eq!(all_with::<Obstacle>(&mut app).len(), 1);
    assert_eq!(
        app.world.resource::<LevelBounds>().0,
        Vec2::new(960.0, 640.0)
    );
    assert_eq!(message(&mut app), (START_PROMPT.to_string(), Visibility::Inherited));

    // nothing is evaluated or simulated until the round runs
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(round_state(&app), RoundState::StartingLevel);
    assert!(!pipeline_active(&app));
    assert_eq!(app.world.resource::<RapierConfiguration>().gravity, Vec2::ZERO);
    for bug in all_with::<Prey>(&mut app) {
        assert_eq!(app.world.get::<Velocity>(bug).unwrap().linvel, Vec2::ZERO);
    }
}

#[test]
fn first_tap_resumes_the_simulation() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));
    let bug = all_with::<Prey>(&mut app)[0];
    assert!(!pipeline_active(&app));

    start_round(&mut app);

    assert!(pipeline_active(&app));
    // bugs start walking once the round runs
    assert_ne!(app.world.get::<Velocity>(bug).unwrap().linvel, Vec2::ZERO);
}

#[test]
fn next_level_suspends_the_simulation_again() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));

    win_bug_level(&mut app);
    assert!(pipeline_active(&app));

    tap_next_level(&mut app);
    app.update();

    assert_eq!(round_state(&app), RoundState::StartingLevel);
    assert!(!pipeline_active(&app));
}

#[test]
fn first_tap_starts_the_round_and_moves_the_player() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));
    let player = player(&mut app);

    tap(&mut app, Vec2::new(400.0, 100.0));

    let velocity = app.world.get::<Velocity>(player).unwrap().linvel;
    assert!((velocity.length() - GameConfig::default().player_speed).abs() < 1e-3);
    assert!(velocity.x > 0.0);
    assert!(velocity.y.abs() < 1e-3);
    assert_eq!(app.world.get::<Controller>(player).unwrap().facing(), Facing::Right);
    assert_eq!(message(&mut app).1, Visibility::Hidden);

    app.update();
    assert_eq!(round_state(&app), RoundState::Playing);
}

#[test]
fn catching_the_last_bug_wins() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));
    let bug = all_with::<Prey>(&mut app)[0];

    win_bug_level(&mut app);

    assert!(app.world.get_entity(bug).is_none());
    assert_eq!(roster(&app).hostiles_remaining(), 0);
    assert_eq!(round_state(&app), RoundState::InLevelMenu);
    assert_eq!(message(&mut app), ("You win!!!".to_string(), Visibility::Visible));
    assert_eq!(all_with::<NextLevelLabel>(&mut app).len(), 1);

    let player = player(&mut app);
    let damping = app.world.get::<Damping>(player).unwrap();
    assert_eq!(damping.linear_damping, MENU_LINEAR_DAMPING);
}

#[test]
fn next_level_replaces_the_instance() {
    let second = empty_level()
        .with_group(
            pest_control::map::import::BUGS,
            vec![
                pest_control::map::MapObject::point(200.0, 500.0),
                pest_control::map::MapObject::point(700.0, 200.0),
            ],
        );
    let mut app = test_app(
        InMemoryMaps::default()
            .with_level(1, bug_level())
            .with_level(2, second),
    );
    let first_player = player(&mut app);

    win_bug_level(&mut app);

    // taps away from the control do nothing
    tap(&mut app, Vec2::new(10.0, 10.0));
    app.update();
    assert_eq!(round_state(&app), RoundState::InLevelMenu);

    tap_next_level(&mut app);
    assert_eq!(app.world.resource::<CurrentLevel>().0, 2);
    app.update();

    assert_eq!(round_state(&app), RoundState::StartingLevel);
    assert_eq!(roster(&app).prey_count(), 2);
    assert!(all_with::<NextLevelLabel>(&mut app).is_empty());
    assert!(all_with::<Obstacle>(&mut app).is_empty());
    assert!(app.world.get_entity(first_player).is_none());
    assert_ne!(player(&mut app), first_player);
    assert_eq!(message(&mut app), (START_PROMPT.to_string(), Visibility::Inherited));
}

#[test]
fn running_out_of_levels_starts_over() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));

    win_bug_level(&mut app);
    tap_next_level(&mut app);
    app.update();

    assert_eq!(app.world.resource::<CurrentLevel>().0, 1);
    assert_eq!(round_state(&app), RoundState::StartingLevel);
    assert_eq!(roster(&app).prey_count(), 1);
}

#[test]
fn fire_bug_in_killing_point_is_swept_without_contact() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, fire_bug_level()));
    let fire_bug = all_with::<Predator>(&mut app)[0];
    assert_eq!(all_with::<KillZone>(&mut app).len(), 1);
    assert_eq!(roster(&app).kill_zones().len(), 1);

    start_round(&mut app);

    assert!(app.world.get_entity(fire_bug).is_none());
    assert_eq!(roster(&app).predator_count(), 0);
    assert_eq!(all_with::<Shrinking>(&mut app).len(), 1);

    app.update();
    assert_eq!(round_state(&app), RoundState::InLevelMenu);
}

#[test]
fn bug_removed_twice_in_a_tick_counts_once() {
    // a second bug keeps the round going
    let map = fire_bug_level().with_group(
        pest_control::map::import::BUGS,
        vec![pest_control::map::MapObject::point(800.0, 500.0)],
    );
    let mut app = test_app(InMemoryMaps::default().with_level(1, map));
    let fire_bug = all_with::<Predator>(&mut app)[0];
    let zone = all_with::<KillZone>(&mut app)[0];

    // the contacts arrive in the first running frame, together with the sweep
    tap(&mut app, VIEWPORT / 2.0);
    contact_started(&mut app, zone, fire_bug);
    contact_started(&mut app, fire_bug, zone);
    app.update();

    assert_eq!(round_state(&app), RoundState::Playing);
    assert!(app.world.get_entity(fire_bug).is_none());
    assert_eq!(roster(&app).predator_count(), 0);
    assert_eq!(roster(&app).prey_count(), 1);
    // removed by contact, so the sweep never saw it
    assert!(all_with::<Shrinking>(&mut app).is_empty());

    app.update();
    assert_eq!(round_state(&app), RoundState::Playing);
}

#[test]
fn contacts_with_removed_bodies_are_ignored() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));
    let player = player(&mut app);
    let bug = all_with::<Prey>(&mut app)[0];

    start_round(&mut app);
    app.world.despawn(bug);
    contact_started(&mut app, player, bug);
    app.update();

    assert_eq!(roster(&app).prey_count(), 1);
    assert_eq!(round_state(&app), RoundState::Playing);
}

#[test]
fn player_refaces_when_leaving_an_obstacle() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));
    let player = player(&mut app);
    let obstacle = all_with::<Obstacle>(&mut app)[0];

    start_round(&mut app);
    assert_eq!(app.world.get::<Controller>(player).unwrap().facing(), Facing::Right);

    // deflected by the obstacle
    app.world.get_mut::<Velocity>(player).unwrap().linvel = Vec2::new(-120.0, 10.0);
    contact_stopped(&mut app, obstacle, player);
    app.update();

    assert_eq!(app.world.get::<Controller>(player).unwrap().facing(), Facing::Left);
}

#[test]
fn slow_round_is_lost() {
    let config = GameConfig {
        round_time_limit_secs: Some(30.0),
        ..default()
    };
    let mut app = test_app_with_config(InMemoryMaps::default().with_level(1, bug_level()), config);

    start_round(&mut app);
    app.world.resource_mut::<RoundClock>().elapsed = 31.0;
    app.update();
    app.update();

    assert_eq!(round_state(&app), RoundState::InLevelMenu);
    assert_eq!(message(&mut app).0, "Too slow!!!");
    assert_eq!(roster(&app).prey_count(), 1);
}

#[test]
fn camera_pins_the_far_edge() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));
    let player = player(&mut app);

    assert_eq!(app.world.resource::<WorldOffset>().0, Vec2::ZERO);

    app.world.get_mut::<Transform>(player).unwrap().translation = Vec3::new(950.0, 320.0, 2.0);
    app.update();

    // 960x640 map, 480x320 viewport
    assert_eq!(app.world.resource::<WorldOffset>().0, Vec2::new(-480.0, -160.0));

    let mut camera = app.world.query_filtered::<&Transform, With<LocalCamera>>();
    let translation = camera.single(&app.world).translation;
    assert_eq!(translation.truncate(), Vec2::new(720.0, 320.0));
}

#[test]
fn taps_map_through_the_world_offset() {
    let mut app = test_app(InMemoryMaps::default().with_level(1, bug_level()));
    let player = player(&mut app);

    app.world.get_mut::<Transform>(player).unwrap().translation = Vec3::new(600.0, 320.0, 2.0);
    app.update();
    assert_eq!(app.world.resource::<WorldOffset>().0, Vec2::new(-360.0, -160.0));

    // the screen center is where the player stands, so aim a bit above it
    tap(&mut app, Vec2::new(240.0, 260.0));

    let velocity = app.world.get::<Velocity>(player).unwrap().linvel;
    assert!(velocity.x.abs() < 1e-3);
    assert!(velocity.y > 0.0);
}

#[test]
fn missing_player_spawn_aborts() {
    let map = pest_control::map::TileMap::new(10, 10, 32.0, 32.0);
    let app = test_app(InMemoryMaps::default().with_level(1, map));

    assert!(!app.world.resource::<Events<AppExit>>().is_empty());
    assert_eq!(roster(&app).hostiles_remaining(), 0);
}

#[test]
fn unknown_first_level_aborts() {
    let app = test_app(InMemoryMaps::default());
    assert!(!app.world.resource::<Events<AppExit>>().is_empty());
}
