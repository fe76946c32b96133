//! Physics categories and the contact filtering table.
//!
//! Every body in a level carries exactly one [`PhysicsCategory`]. What a
//! body is physically blocked by (its collision mask) and what it merely
//! detects (its contact mask) are fixed per category by [`PhysicsCategory::masks`]
//! and never configured at runtime.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// The category of a physical body.
#[derive(Clone, Copy, Component, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PhysicsCategory {
    /// The edge loop around the map.
    Boundary,
    /// The player.
    Player,
    /// Bugs the player catches by touching them.
    Prey,
    /// Static collision areas authored in the map.
    Obstacle,
    /// Killing points that burn fire bugs.
    KillZone,
    /// Breakable scenery.
    Breakable,
    /// Fire bugs, which only die in killing points.
    Predator,
}

/// The collision and contact masks of a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryMasks {
    /// Categories this body is physically blocked by.
    pub collision: u32,
    /// Categories this body reports contacts with but passes through.
    pub contact: u32,
}

impl PhysicsCategory {
    /// Every category, in bit order.
    pub const ALL: [PhysicsCategory; 7] = [
        PhysicsCategory::Boundary,
        PhysicsCategory::Player,
        PhysicsCategory::Prey,
        PhysicsCategory::Obstacle,
        PhysicsCategory::KillZone,
        PhysicsCategory::Breakable,
        PhysicsCategory::Predator,
    ];

    /// The category's bit.
    pub const fn bits(self) -> u32 {
        match self {
            PhysicsCategory::Boundary => 1 << 0,
            PhysicsCategory::Player => 1 << 1,
            PhysicsCategory::Prey => 1 << 2,
            PhysicsCategory::Obstacle => 1 << 3,
            PhysicsCategory::KillZone => 1 << 4,
            PhysicsCategory::Breakable => 1 << 5,
            PhysicsCategory::Predator => 1 << 6,
        }
    }

    /// The filtering table.
    ///
    /// Both masks are symmetric across the table: if `A` names `B`, `B`
    /// names `A`.
    pub const fn masks(self) -> CategoryMasks {
        const BOUNDARY: u32 = PhysicsCategory::Boundary.bits();
        const PLAYER: u32 = PhysicsCategory::Player.bits();
        const PREY: u32 = PhysicsCategory::Prey.bits();
        const OBSTACLE: u32 = PhysicsCategory::Obstacle.bits();
        const KILL_ZONE: u32 = PhysicsCategory::KillZone.bits();
        const BREAKABLE: u32 = PhysicsCategory::Breakable.bits();
        const PREDATOR: u32 = PhysicsCategory::Predator.bits();

        match self {
            PhysicsCategory::Boundary => CategoryMasks {
                collision: PLAYER | PREY | PREDATOR,
                contact: 0,
            },
            PhysicsCategory::Player => CategoryMasks {
                collision: BOUNDARY | OBSTACLE | KILL_ZONE,
                contact: PREY,
            },
            PhysicsCategory::Prey => CategoryMasks {
                collision: BOUNDARY | OBSTACLE | KILL_ZONE | BREAKABLE,
                contact: PLAYER,
            },
            PhysicsCategory::Obstacle => CategoryMasks {
                collision: PLAYER | PREY | PREDATOR,
                contact: 0,
            },
            PhysicsCategory::KillZone => CategoryMasks {
                collision: PLAYER | PREY,
                contact: PREDATOR,
            },
            PhysicsCategory::Breakable => CategoryMasks {
                collision: PREY | PREDATOR,
                contact: 0,
            },
            PhysicsCategory::Predator => CategoryMasks {
                collision: BOUNDARY | OBSTACLE | BREAKABLE,
                contact: KILL_ZONE,
            },
        }
    }

    pub const fn collision_mask(self) -> u32 {
        self.masks().collision
    }

    pub const fn contact_mask(self) -> u32 {
        self.masks().contact
    }

    /// Whether a body of this category is physically blocked by `other`.
    pub const fn collides_with(self, other: PhysicsCategory) -> bool {
        self.collision_mask() & other.bits() != 0
    }

    /// The components that make rapier honor this category.
    ///
    /// Detection runs over `collision | contact` through [`CollisionGroups`];
    /// only the collision mask produces forces, through [`SolverGroups`].
    pub fn bundle(self) -> CategoryBundle {
        let masks = self.masks();
        let membership = Group::from_bits_truncate(self.bits());

        CategoryBundle {
            category: self,
            collision_groups: CollisionGroups::new(
                membership,
                Group::from_bits_truncate(masks.collision | masks.contact),
            ),
            solver_groups: SolverGroups::new(
                membership,
                Group::from_bits_truncate(masks.collision),
            ),
        }
    }
}

/// Category tagging for a physical body.
#[derive(Bundle)]
pub struct CategoryBundle {
    pub category: PhysicsCategory,
    pub collision_groups: CollisionGroups,
    pub solver_groups: SolverGroups,
}
