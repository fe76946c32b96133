//! Gameplay reactions to contacts reported by the physics engine.
//!
//! The engine does not say which side of a pair is which, so every rule is
//! matched against both orders.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::physics::category::PhysicsCategory;
use crate::physics::controller::Controller;
use crate::player::LocalPlayer;
use crate::roster::Roster;
use crate::GamePhase;

/// Contains the contact resolver.
pub struct ContactPlugin;

impl Plugin for ContactPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>()
            .add_systems(Update, resolve_contacts.in_set(GamePhase::Contacts));
    }
}

/// A body taking part in a contact.
pub type Participant = (Entity, PhysicsCategory);

/// What a contact asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactAction {
    /// Remove a bug.
    Remove(Entity),
    /// The player was deflected; recompute its facing.
    RefacePlayer,
}

/// `(actor, target)`: when a body of category `actor` starts touching one
/// of category `target`, the target is removed.
const REMOVAL_RULES: [(PhysicsCategory, PhysicsCategory); 2] = [
    (PhysicsCategory::Player, PhysicsCategory::Prey),
    (PhysicsCategory::KillZone, PhysicsCategory::Predator),
];

/// Splits a pair into `(one, other)` where `one` has category `category`.
fn side(
    a: Participant,
    b: Participant,
    category: PhysicsCategory,
) -> Option<(Participant, Participant)> {
    if a.1 == category {
        Some((a, b))
    } else if b.1 == category {
        Some((b, a))
    } else {
        None
    }
}

/// Resolves a contact beginning.
pub fn on_contact_begin(a: Participant, b: Participant) -> Option<ContactAction> {
    REMOVAL_RULES.iter().find_map(|&(actor, target)| {
        let (_, other) = side(a, b, actor)?;
        (other.1 == target).then_some(ContactAction::Remove(other.0))
    })
}

/// Resolves a contact ending.
///
/// Only separations of the player from something that physically blocks it
/// matter; pairs without the player are ignored.
pub fn on_contact_end(a: Participant, b: Participant) -> Option<ContactAction> {
    let (_, other) = side(a, b, PhysicsCategory::Player)?;
    PhysicsCategory::Player
        .collides_with(other.1)
        .then_some(ContactAction::RefacePlayer)
}

/// Applies gameplay rules to the contacts of the last physics step.
pub fn resolve_contacts(
    mut commands: Commands,
    mut events: EventReader<CollisionEvent>,
    categories: Query<&PhysicsCategory>,
    mut roster: ResMut<Roster>,
    mut player: Query<(&Velocity, &mut Controller), With<LocalPlayer>>,
) {
    for event in events.read() {
        let (a, b, began) = match *event {
            CollisionEvent::Started(a, b, _) => (a, b, true),
            CollisionEvent::Stopped(a, b, _) => (a, b, false),
        };

        // bodies removed since the step was taken report nothing
        let (Ok(&category_a), Ok(&category_b)) = (categories.get(a), categories.get(b)) else {
            continue;
        };
        let (a, b) = ((a, category_a), (b, category_b));

        let action = if began {
            on_contact_begin(a, b)
        } else {
            on_contact_end(a, b)
        };

        match action {
            Some(ContactAction::Remove(entity)) => {
                roster.despawn(&mut commands, entity);
            }
            Some(ContactAction::RefacePlayer) => {
                if let Ok((velocity, mut con)) = player.get_single_mut() {
                    con.face_current_direction(velocity.linvel);
                }
            }
            None => (),
        }
    }
}
