use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// The player character
    Player = 0b0000_0010,

    /// Player-spawned fireballs
    Fireball = 0b0000_0100,

    /// Static ground, pipes, and brick terrain
    Terrain = 0b0000_1000,

    /// Things that hurt the player (enemies, spikes)
    Hazard = 0b0001_0000,

    /// Mushrooms and fire flowers
    Powerup = 0b0010_0000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The player lands on terrain, is hurt by hazards, and picks up powerups
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Terrain as u32
                    | CollisionGroups::Hazard as u32
                    | CollisionGroups::Powerup as u32,
            ),

            // Fireballs bounce on terrain and hit hazards
            CollisionGroups::Fireball => Group::from_bits_truncate(
                CollisionGroups::Terrain as u32 | CollisionGroups::Hazard as u32,
            ),

            // Terrain collides with everything
            CollisionGroups::Terrain => Group::ALL,

            // Hazards touch the player and fireballs
            CollisionGroups::Hazard => Group::from_bits_truncate(
                CollisionGroups::Player as u32 | CollisionGroups::Fireball as u32,
            ),

            // Powerups rest on terrain until the player collects them
            CollisionGroups::Powerup => Group::from_bits_truncate(
                CollisionGroups::Player as u32 | CollisionGroups::Terrain as u32,
            ),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

/// Queue for storing collision events during a physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(16))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this frame
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Contact forces are not used by the game layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_groups_unique_bits() {
        let groups = [
            CollisionGroups::Default,
            CollisionGroups::Player,
            CollisionGroups::Fireball,
            CollisionGroups::Terrain,
            CollisionGroups::Hazard,
            CollisionGroups::Powerup,
        ];

        for (i, group1) in groups.iter().enumerate() {
            for (j, group2) in groups.iter().enumerate() {
                if i != j {
                    assert_ne!(
                        *group1 as u32, *group2 as u32,
                        "Groups must have unique bits"
                    );
                }
            }
        }
    }

    #[test]
    fn test_player_collects_powerups() {
        let player_groups = CollisionGroups::Player.to_interaction_groups();
        let powerup_bit = Group::from_bits_truncate(CollisionGroups::Powerup as u32);

        assert!(player_groups.filter.contains(powerup_bit));
    }

    #[test]
    fn test_fireball_ignores_powerups() {
        let fireball_groups = CollisionGroups::Fireball.to_interaction_groups();
        let powerup_bit = Group::from_bits_truncate(CollisionGroups::Powerup as u32);

        assert!(!fireball_groups.filter.contains(powerup_bit));
    }

    #[test]
    fn test_hazard_hits_player() {
        let hazard_groups = CollisionGroups::Hazard.to_interaction_groups();
        let player_bit = Group::from_bits_truncate(CollisionGroups::Player as u32);

        assert!(hazard_groups.filter.contains(player_bit));
    }
}
