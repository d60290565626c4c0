// Power tier state machine
//
// Every (tier, event) pair maps to exactly one TierChange through a
// single total function, so the tier, the collision geometry, and the
// texture set can never drift apart across a transition.

/// The player's power level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerTier {
    Small,
    Big,
    Fire,
}

/// Collision box size class. Big and Fire share one box; the Fire tier
/// changes only the texture set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySize {
    Small,
    Big,
}

impl PowerTier {
    /// The collision box this tier uses
    pub fn body_size(self) -> BodySize {
        match self {
            PowerTier::Small => BodySize::Small,
            PowerTier::Big | PowerTier::Fire => BodySize::Big,
        }
    }
}

/// Powerup kinds the player can pick up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Mushroom,
    FireFlower,
}

/// World events that drive tier transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierEvent {
    Powerup(PowerupKind),
    Damage,
}

/// A required body replacement: target size class plus the vertical
/// nudge that keeps the character's feet at the same world height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resize {
    pub target: BodySize,
    pub vertical_offset: f32,
}

/// Everything a transition changes, decided in one place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierChange {
    /// Tier after the event (also selects the texture set)
    pub tier: PowerTier,
    /// Body replacement to perform, if the size class changed
    pub resize: Option<Resize>,
    /// Whether the invincibility window opens
    pub enters_grace: bool,
    /// Small tier taking damage: death, nothing else applies
    pub fatal: bool,
}

/// Centers move half a unit when the box height changes by one unit
const HALF_UNIT: f32 = 0.5;

const GROW: Resize = Resize {
    target: BodySize::Big,
    vertical_offset: HALF_UNIT,
};

const SHRINK: Resize = Resize {
    target: BodySize::Small,
    vertical_offset: -HALF_UNIT,
};

/// The transition function. Total over (tier, event).
pub fn transition(tier: PowerTier, event: TierEvent) -> TierChange {
    use PowerTier::*;
    use PowerupKind::*;

    match (tier, event) {
        // Pickups from Small always grow the body, whatever the kind
        (Small, TierEvent::Powerup(Mushroom)) => TierChange {
            tier: Big,
            resize: Some(GROW),
            enters_grace: false,
            fatal: false,
        },
        (Small, TierEvent::Powerup(FireFlower)) => TierChange {
            tier: Fire,
            resize: Some(GROW),
            enters_grace: false,
            fatal: false,
        },

        // A mushroom never downgrades; at Big it is simply absorbed
        (Big, TierEvent::Powerup(Mushroom)) | (Fire, TierEvent::Powerup(Mushroom)) => TierChange {
            tier,
            resize: None,
            enters_grace: false,
            fatal: false,
        },

        // A fire flower always lands on Fire; the body is already Big-sized
        (Big, TierEvent::Powerup(FireFlower)) | (Fire, TierEvent::Powerup(FireFlower)) => {
            TierChange {
                tier: Fire,
                resize: None,
                enters_grace: false,
                fatal: false,
            }
        }

        // Damage path
        (Small, TierEvent::Damage) => TierChange {
            tier: Small,
            resize: None,
            enters_grace: false,
            fatal: true,
        },
        (Big, TierEvent::Damage) => TierChange {
            tier: Small,
            resize: Some(SHRINK),
            enters_grace: true,
            fatal: false,
        },
        (Fire, TierEvent::Damage) => TierChange {
            tier: Big,
            resize: None,
            enters_grace: true,
            fatal: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TIERS: [PowerTier; 3] = [PowerTier::Small, PowerTier::Big, PowerTier::Fire];
    const ALL_EVENTS: [TierEvent; 3] = [
        TierEvent::Powerup(PowerupKind::Mushroom),
        TierEvent::Powerup(PowerupKind::FireFlower),
        TierEvent::Damage,
    ];

    fn rank(tier: PowerTier) -> u8 {
        match tier {
            PowerTier::Small => 0,
            PowerTier::Big => 1,
            PowerTier::Fire => 2,
        }
    }

    #[test]
    fn test_pickups_never_decrease_tier() {
        for tier in ALL_TIERS {
            for kind in [PowerupKind::Mushroom, PowerupKind::FireFlower] {
                let change = transition(tier, TierEvent::Powerup(kind));
                assert!(
                    rank(change.tier) >= rank(tier),
                    "{tier:?} + {kind:?} must not downgrade"
                );
            }
        }
    }

    #[test]
    fn test_mushroom_absorbed_at_fire() {
        let change = transition(PowerTier::Fire, TierEvent::Powerup(PowerupKind::Mushroom));
        assert_eq!(change.tier, PowerTier::Fire);
        assert_eq!(change.resize, None);
    }

    #[test]
    fn test_fire_flower_from_small_grows() {
        let change = transition(PowerTier::Small, TierEvent::Powerup(PowerupKind::FireFlower));
        assert_eq!(change.tier, PowerTier::Fire);
        let resize = change.resize.expect("small pickup must resize");
        assert_eq!(resize.target, BodySize::Big);
        assert_eq!(resize.vertical_offset, 0.5);
    }

    #[test]
    fn test_damage_at_big_shrinks_and_enters_grace() {
        let change = transition(PowerTier::Big, TierEvent::Damage);
        assert_eq!(change.tier, PowerTier::Small);
        assert!(change.enters_grace);
        assert!(!change.fatal);
        let resize = change.resize.expect("big damage must resize");
        assert_eq!(resize.target, BodySize::Small);
        assert_eq!(resize.vertical_offset, -0.5);
    }

    #[test]
    fn test_damage_at_fire_keeps_body_size() {
        let change = transition(PowerTier::Fire, TierEvent::Damage);
        assert_eq!(change.tier, PowerTier::Big);
        assert_eq!(change.resize, None);
        assert!(change.enters_grace);
    }

    #[test]
    fn test_damage_at_small_is_fatal_only() {
        let change = transition(PowerTier::Small, TierEvent::Damage);
        assert!(change.fatal);
        assert!(!change.enters_grace);
        assert_eq!(change.resize, None);
    }

    #[test]
    fn test_transition_is_size_consistent() {
        // After any transition the declared resize (or its absence)
        // leaves the body at exactly the next tier's size class.
        for tier in ALL_TIERS {
            for event in ALL_EVENTS {
                let change = transition(tier, event);
                if change.fatal {
                    continue;
                }
                let end_size = match change.resize {
                    Some(resize) => resize.target,
                    None => tier.body_size(),
                };
                assert_eq!(
                    end_size,
                    change.tier.body_size(),
                    "{tier:?} + {event:?} leaves geometry out of sync"
                );
            }
        }
    }

    #[test]
    fn test_grace_only_on_nonfatal_damage() {
        for tier in ALL_TIERS {
            for event in ALL_EVENTS {
                let change = transition(tier, event);
                if change.enters_grace {
                    assert_eq!(event, TierEvent::Damage);
                    assert!(!change.fatal);
                }
            }
        }
    }
}
