use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use pest_control::config::GameConfig;
use pest_control::level::CurrentLevel;
use pest_control::map::{DirectoryMaps, Maps};
use pest_control::GamePlugins;

const CONFIG_PATH: &str = "assets/config.json";

fn main() {
    let config = if std::path::Path::new(CONFIG_PATH).is_file() {
        match GameConfig::load(CONFIG_PATH) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("invalid {CONFIG_PATH}: {err}");
                std::process::exit(1);
            }
        }
    } else {
        GameConfig::default()
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pest Control".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            config.pixels_per_meter,
        ))
        .insert_resource(Maps::new(DirectoryMaps::new(&config.levels_dir)))
        .insert_resource(CurrentLevel(config.first_level))
        .insert_resource(config)
        .add_plugins(GamePlugins)
        .run();
}
