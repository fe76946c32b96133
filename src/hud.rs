//! Screen-space labels: the start prompt, the outcome and "Next level?".

use bevy::prelude::*;

use crate::camera::{LocalCamera, Viewport};
use crate::roster::LevelScoped;
use crate::round::{RoundEffect, RoundState, NEXT_LEVEL_DROP};
use crate::GamePhase;

pub const START_PROMPT: &str = "Tap screen to run!!";
pub const NEXT_LEVEL: &str = "Next level?";

/// Contains the HUD systems.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(RoundState::StartingLevel), spawn_prompt)
            .add_systems(Update, apply_hud_effects.in_set(GamePhase::Effects))
            .add_systems(PostUpdate, pin_screen_labels.after(GamePhase::Camera));
    }
}

/// Keeps a label at a fixed screen position (origin bottom-left).
#[derive(Clone, Copy, Component, Debug, PartialEq)]
pub struct ScreenAnchor(pub Vec2);

/// The message label, showing the start prompt and later the outcome.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct MessageLabel;

/// The "Next level?" control.
#[derive(Clone, Copy, Component, Debug, Default)]
pub struct NextLevelLabel;

fn label(text: &str, font_size: f32, anchor: Vec2) -> impl Bundle {
    (
        Text2dBundle {
            text: Text::from_section(
                text,
                TextStyle {
                    font_size,
                    color: Color::WHITE,
                    ..default()
                },
            ),
            ..default()
        },
        ScreenAnchor(anchor),
        LevelScoped,
    )
}

/// Shows the start prompt at the center of the screen.
pub fn spawn_prompt(mut commands: Commands, viewport: Res<Viewport>) {
    commands.spawn((label(START_PROMPT, 32.0, viewport.0 / 2.0), MessageLabel));
}

/// Carries out the round effects that concern the HUD.
pub fn apply_hud_effects(
    mut commands: Commands,
    mut effects: EventReader<RoundEffect>,
    viewport: Res<Viewport>,
    mut message: Query<(&mut Text, &mut Visibility), With<MessageLabel>>,
) {
    for effect in effects.read() {
        match *effect {
            RoundEffect::HidePrompt => {
                for (_, mut visibility) in message.iter_mut() {
                    *visibility = Visibility::Hidden;
                }
            }
            RoundEffect::ShowOutcome(outcome) => {
                for (mut text, mut visibility) in message.iter_mut() {
                    text.sections[0].value = outcome.message().to_string();
                    *visibility = Visibility::Visible;
                }
            }
            RoundEffect::RevealNextLevel => {
                let anchor = Vec2::new(viewport.0.x / 2.0, viewport.0.y / 2.0 - NEXT_LEVEL_DROP);
                commands.spawn((label(NEXT_LEVEL, 24.0, anchor), NextLevelLabel));
            }
            _ => (),
        }
    }
}

/// Moves anchored labels along with the camera.
pub fn pin_screen_labels(
    viewport: Res<Viewport>,
    camera: Query<&Transform, With<LocalCamera>>,
    mut labels: Query<(&ScreenAnchor, &mut Transform), Without<LocalCamera>>,
) {
    let Ok(camera) = camera.get_single() else {
        return;
    };
    let screen_origin = camera.translation.truncate() - viewport.0 / 2.0;

    for (anchor, mut transform) in labels.iter_mut() {
        transform.translation = (screen_origin + anchor.0).extend(10.0);
    }
}
