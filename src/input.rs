//! Turns clicks and touches into taps.

use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::GamePhase;

/// Contains the tap collection system.
pub struct TapPlugin;

impl Plugin for TapPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<Tap>()
            .add_systems(Update, collect_taps.in_set(GamePhase::Input));
    }
}

/// A tap or click on the screen.
#[derive(Clone, Copy, Debug, Event, PartialEq)]
pub struct Tap {
    /// Position in screen space, origin bottom-left, y up.
    pub screen: Vec2,
}

/// Converts a window position (origin top-left, y down) to screen space.
pub fn to_screen_space(window_height: f32, position: Vec2) -> Vec2 {
    Vec2::new(position.x, window_height - position.y)
}

/// Reads fresh left clicks and touches from the primary window.
pub fn collect_taps(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    mut taps: EventWriter<Tap>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let height = window.height();

    if let Some(mouse) = mouse {
        if mouse.just_pressed(MouseButton::Left) {
            if let Some(position) = window.cursor_position() {
                taps.send(Tap {
                    screen: to_screen_space(height, position),
                });
            }
        }
    }

    if let Some(touches) = touches {
        for touch in touches.iter_just_pressed() {
            taps.send(Tap {
                screen: to_screen_space(height, touch.position()),
            });
        }
    }
}
