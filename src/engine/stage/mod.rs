// Stage: the sprite tree the render backend draws each frame
//
// Game logic owns sprite ids and mutates sprite state through the stage;
// the backend only ever reads. Scrolling is a single horizontal camera
// offset, advanced as the player pushes past the middle of the view.

mod sprite;
mod textures;

pub use sprite::Sprite;
pub use textures::{TextureHandle, TextureLibrary};

/// Stable identifier for a sprite slot on the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(usize);

/// Holds every sprite in the scene plus the camera scroll state
#[derive(Debug, Default)]
pub struct Stage {
    sprites: Vec<Option<Sprite>>,
    /// Horizontal camera offset in world units
    camera_x: f32,
    /// Width of the visible area in world units
    view_width: f32,
}

impl Stage {
    pub fn new(view_width: f32) -> Self {
        Self {
            sprites: Vec::new(),
            camera_x: 0.0,
            view_width,
        }
    }

    /// Add a sprite, returning its id
    pub fn add_sprite(&mut self, sprite: Sprite) -> SpriteId {
        // Reuse a freed slot if one exists
        if let Some(index) = self.sprites.iter().position(|s| s.is_none()) {
            self.sprites[index] = Some(sprite);
            return SpriteId(index);
        }
        self.sprites.push(Some(sprite));
        SpriteId(self.sprites.len() - 1)
    }

    /// Remove a sprite from the stage
    pub fn remove_sprite(&mut self, id: SpriteId) {
        if let Some(slot) = self.sprites.get_mut(id.0) {
            *slot = None;
        }
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0).and_then(|s| s.as_ref())
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0).and_then(|s| s.as_mut())
    }

    /// Number of live sprites
    pub fn sprite_count(&self) -> usize {
        self.sprites.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate live sprites (for the render backend)
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter_map(|s| s.as_ref())
    }

    /// Current camera offset
    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    /// Scroll the camera so a forward-moving player stays at mid-screen.
    /// Moving left never scrolls back.
    pub fn follow(&mut self, world_x: f32, moving_forward: bool) {
        let midpoint = self.camera_x + self.view_width / 2.0;
        if moving_forward && world_x > midpoint {
            self.camera_x = world_x - self.view_width / 2.0;
        }
    }
}
