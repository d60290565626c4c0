// Game configuration
//
// Loaded once at startup and immutable afterwards. Anything invalid here
// aborts initialization; a broken config must never produce a visibly
// broken character.

use glam::Vec2;

/// Height of the small collision box in world units
pub const HEIGHT_SMALL: f32 = 1.0;
/// Height of the big collision box (shared by the Big and Fire tiers)
pub const HEIGHT_BIG: f32 = 2.0;

/// Configuration errors, all fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be nonzero")]
    ZeroFrames { name: &'static str },

    #[error("walk cycle for the {tier} tier has no textures")]
    EmptyWalkCycle { tier: &'static str },

    #[error("texture not found: {0}")]
    MissingTexture(String),
}

/// Texture names for one power tier
#[derive(Debug, Clone)]
pub struct TextureSetConfig {
    pub stand: String,
    pub jump: String,
    pub turn: String,
    pub walk: Vec<String>,
}

impl TextureSetConfig {
    fn with_prefix(prefix: &str) -> Self {
        Self {
            stand: format!("{prefix}_standing.png"),
            jump: format!("{prefix}_jumping.png"),
            turn: format!("{prefix}_turning.png"),
            walk: (1..=3).map(|i| format!("{prefix}_walking_{i}.png")).collect(),
        }
    }

    /// All texture names in this set
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [&self.stand, &self.jump, &self.turn]
            .into_iter()
            .map(|s| s.as_str())
            .chain(self.walk.iter().map(|s| s.as_str()))
    }
}

/// Static game configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Sprite scale relative to texture size
    pub scale: f32,
    /// Collision box width for the Small tier (world units)
    pub width_small: f32,
    /// Collision box width for the Big and Fire tiers
    pub width_big: f32,
    /// Where the player spawns
    pub starting_position: Vec2,
    /// Ticks between walk-cycle texture advances
    pub delta_frames: u32,
    /// Length of the post-damage invincibility window, in ticks
    pub grace_period: u32,
    /// Texture sets per tier
    pub textures_small: TextureSetConfig,
    pub textures_big: TextureSetConfig,
    pub textures_fire: TextureSetConfig,

    // Movement tuning
    /// Maximum horizontal speed (units/second)
    pub move_speed: f32,
    /// Horizontal acceleration (units/second²)
    pub accel_rate: f32,
    /// Upward velocity applied on jump
    pub jump_speed: f32,

    // Fireballs
    /// Horizontal launch speed of a fireball
    pub fireball_speed: f32,
    /// Fireball collider radius
    pub fireball_radius: f32,
    /// Ticks before a fireball despawns
    pub fireball_lifetime: u32,
    /// Fireball sprite texture name
    pub fireball_texture: String,

    /// Width of the visible area in world units (camera follow)
    pub view_width: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            width_small: 0.8,
            width_big: 1.0,
            starting_position: Vec2::new(2.0, 3.0),
            delta_frames: 6,
            grace_period: 120,
            textures_small: TextureSetConfig::with_prefix("mario"),
            textures_big: TextureSetConfig::with_prefix("mario_big"),
            textures_fire: TextureSetConfig::with_prefix("mario_fire"),
            move_speed: 8.0,
            accel_rate: 40.0,
            jump_speed: 9.0,
            fireball_speed: 12.0,
            fireball_radius: 0.25,
            fireball_lifetime: 180,
            fireball_texture: "fireball.png".to_string(),
            view_width: 20.0,
        }
    }
}

impl GameConfig {
    /// Reject configurations that would produce a broken character
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("scale", self.scale),
            ("width_small", self.width_small),
            ("width_big", self.width_big),
            ("move_speed", self.move_speed),
            ("accel_rate", self.accel_rate),
            ("jump_speed", self.jump_speed),
            ("fireball_speed", self.fireball_speed),
            ("fireball_radius", self.fireball_radius),
            ("view_width", self.view_width),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.delta_frames == 0 {
            return Err(ConfigError::ZeroFrames {
                name: "delta_frames",
            });
        }
        if self.grace_period == 0 {
            return Err(ConfigError::ZeroFrames {
                name: "grace_period",
            });
        }
        if self.fireball_lifetime == 0 {
            return Err(ConfigError::ZeroFrames {
                name: "fireball_lifetime",
            });
        }

        for (tier, set) in [
            ("small", &self.textures_small),
            ("big", &self.textures_big),
            ("fire", &self.textures_fire),
        ] {
            if set.walk.is_empty() {
                return Err(ConfigError::EmptyWalkCycle { tier });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_geometry_rejected() {
        let mut config = GameConfig::default();
        config.width_small = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "width_small",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_grace_period_rejected() {
        let mut config = GameConfig::default();
        config.grace_period = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_walk_cycle_rejected() {
        let mut config = GameConfig::default();
        config.textures_fire.walk.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyWalkCycle { tier: "fire" })
        ));
    }

    #[test]
    fn test_texture_set_names_cover_walk_cycle() {
        let set = TextureSetConfig::with_prefix("mario");
        let names: Vec<_> = set.names().collect();
        assert!(names.contains(&"mario_standing.png"));
        assert!(names.contains(&"mario_walking_3.png"));
        assert_eq!(names.len(), 3 + set.walk.len());
    }
}
