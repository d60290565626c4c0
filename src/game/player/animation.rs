// Animation and facing selection
//
// Pure texture choice: one cascade per frame, highest priority first.
// Airborne beats everything; a skid (intent against velocity) beats the
// walk cycle; the walk cycle advances on a fixed frame cadence; standing
// resets the cycle.

use crate::engine::stage::{TextureHandle, TextureLibrary};
use crate::game::config::{ConfigError, TextureSetConfig};

/// Resolved texture handles for one power tier
#[derive(Debug, Clone)]
pub struct TierTextures {
    pub stand: TextureHandle,
    pub jump: TextureHandle,
    pub turn: TextureHandle,
    pub walk: Vec<TextureHandle>,
}

impl TierTextures {
    /// Resolve a configured texture set against the library.
    /// A missing name is a fatal configuration error.
    pub fn resolve(set: &TextureSetConfig, library: &TextureLibrary) -> Result<Self, ConfigError> {
        let find = |name: &str| {
            library
                .lookup(name)
                .ok_or_else(|| ConfigError::MissingTexture(name.to_string()))
        };

        Ok(Self {
            stand: find(&set.stand)?,
            jump: find(&set.jump)?,
            turn: find(&set.turn)?,
            walk: set
                .walk
                .iter()
                .map(|name| find(name))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Chooses the sprite texture and facing each frame
#[derive(Debug)]
pub struct AnimationSelector {
    /// +1.0 facing right, -1.0 facing left; never neutral
    facing: f32,
    /// Frame counter gating the walk cycle; reset while standing
    frame: u32,
    /// Ticks between walk-cycle advances
    delta_frames: u32,
    /// Position in the cyclic walk sequence
    walk_index: usize,
}

impl AnimationSelector {
    pub fn new(delta_frames: u32) -> Self {
        Self {
            facing: 1.0,
            frame: 0,
            delta_frames,
            walk_index: 0,
        }
    }

    /// Last nonzero horizontal direction
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Pick this frame's texture.
    ///
    /// `accel` is the signed horizontal intent, `vel_x` the body's
    /// current horizontal velocity. Zero intent leaves facing unchanged.
    pub fn select(
        &mut self,
        accel: f32,
        on_ground: bool,
        vel_x: f32,
        textures: &TierTextures,
    ) -> TextureHandle {
        self.frame = self.frame.wrapping_add(1);

        if accel > 0.0 {
            self.facing = 1.0;
        } else if accel < 0.0 {
            self.facing = -1.0;
        }

        if !on_ground {
            return textures.jump;
        }

        if accel != 0.0 {
            // Intent against current motion reads as a skid
            if vel_x * accel < 0.0 {
                return textures.turn;
            }
            if self.frame % self.delta_frames == 0 {
                self.walk_index = (self.walk_index + 1) % textures.walk.len();
            }
            return textures.walk[self.walk_index];
        }

        self.frame = 0;
        textures.stand
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_textures() -> (TextureLibrary, TierTextures) {
        let mut library = TextureLibrary::new();
        let set = TextureSetConfig {
            stand: "stand.png".into(),
            jump: "jump.png".into(),
            turn: "turn.png".into(),
            walk: vec!["walk_1.png".into(), "walk_2.png".into(), "walk_3.png".into()],
        };
        for name in set.names() {
            library.register(name);
        }
        let textures = TierTextures::resolve(&set, &library).expect("all names registered");
        (library, textures)
    }

    #[test]
    fn test_resolve_missing_texture_fails() {
        let library = TextureLibrary::new();
        let set = TextureSetConfig {
            stand: "stand.png".into(),
            jump: "jump.png".into(),
            turn: "turn.png".into(),
            walk: vec!["walk_1.png".into()],
        };
        assert!(matches!(
            TierTextures::resolve(&set, &library),
            Err(ConfigError::MissingTexture(_))
        ));
    }

    #[test]
    fn test_facing_persists_on_zero_intent() {
        let (_library, textures) = test_textures();
        let mut selector = AnimationSelector::new(2);

        selector.select(-1.0, true, -1.0, &textures);
        assert_eq!(selector.facing(), -1.0);

        // Intent released: facing stays left
        selector.select(0.0, true, 0.0, &textures);
        assert_eq!(selector.facing(), -1.0);
    }

    #[test]
    fn test_airborne_beats_everything() {
        let (_library, textures) = test_textures();
        let mut selector = AnimationSelector::new(2);

        // Even with a skid-shaped intent, airborne wins
        let texture = selector.select(1.0, false, -3.0, &textures);
        assert_eq!(texture, textures.jump);
    }

    #[test]
    fn test_skid_shows_turn_texture() {
        let (_library, textures) = test_textures();
        let mut selector = AnimationSelector::new(2);

        let texture = selector.select(1.0, true, -2.0, &textures);
        assert_eq!(texture, textures.turn);
    }

    #[test]
    fn test_walk_cycle_advances_on_cadence() {
        let (_library, textures) = test_textures();
        let mut selector = AnimationSelector::new(2);

        // Frame counter starts at 1, so the cycle steps on every even frame
        let mut shown = Vec::new();
        for _ in 0..6 {
            shown.push(selector.select(1.0, true, 1.0, &textures));
        }
        assert_eq!(
            shown,
            vec![
                textures.walk[0],
                textures.walk[1],
                textures.walk[1],
                textures.walk[2],
                textures.walk[2],
                textures.walk[0],
            ]
        );
    }

    #[test]
    fn test_standing_resets_frame_counter() {
        let (_library, textures) = test_textures();
        let mut selector = AnimationSelector::new(4);

        for _ in 0..3 {
            selector.select(1.0, true, 1.0, &textures);
        }
        let texture = selector.select(0.0, true, 0.0, &textures);
        assert_eq!(texture, textures.stand);
        assert_eq!(selector.frame, 0);
    }
}
