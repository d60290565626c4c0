// Sprite state written by game logic and read by the render backend

use super::textures::TextureHandle;
use glam::Vec2;

/// A 2D sprite on the stage
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Position in world space
    pub position: Vec2,
    /// Scale; a negative x flips the sprite to face left
    pub scale: Vec2,
    /// Opacity (1.0 = opaque, 0.5 = translucent)
    pub alpha: f32,
    /// Texture shown this frame
    pub texture: TextureHandle,
    /// Z-order for layering (higher = drawn on top)
    pub z_order: f32,
}

impl Sprite {
    /// Create a new fully opaque sprite
    pub fn new(position: Vec2, scale: f32, texture: TextureHandle) -> Self {
        Self {
            position,
            scale: Vec2::splat(scale),
            alpha: 1.0,
            texture,
            z_order: 0.0,
        }
    }

    /// Point the sprite in a horizontal direction without losing its scale.
    /// `facing` is +1.0 for right, -1.0 for left.
    pub fn set_facing(&mut self, facing: f32) {
        self.scale.x = self.scale.x.abs() * facing.signum();
    }

    /// Current horizontal facing sign (+1.0 or -1.0)
    pub fn facing(&self) -> f32 {
        self.scale.x.signum()
    }
}
