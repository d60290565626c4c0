// Player systems
//
// This module contains everything related to the player character:
// - Power tier state machine and its transition function
// - The player aggregate, owning the body replacement protocol
// - Post-damage grace window
// - Animation and facing selection
// - Fireball spawning and lifetime

pub mod animation;
pub mod fireball;
pub mod grace;
pub mod player;
pub mod tier;

// Re-export commonly used types
pub use animation::{AnimationSelector, TierTextures};
pub use fireball::{Fireball, FireballSpec};
pub use grace::{GraceTimer, GRACE_ALPHA};
pub use player::{DamageOutcome, Player};
pub use tier::{transition, BodySize, PowerTier, PowerupKind, TierChange, TierEvent};
