// Player-spawned fireballs
//
// The spawn contract: one unit ahead of the player in the facing
// direction, launched horizontally, added to both the physics world and
// the stage. Motion afterwards belongs to the physics step; the only
// bookkeeping here is a frame-counted lifetime so spent fireballs leave
// the world instead of accumulating forever.

use glam::Vec2;
use log::debug;

use crate::engine::physics::{body::presets, OwnerId, PhysicsWorld, RigidBodyHandle};
use crate::engine::stage::{Sprite, SpriteId, Stage, TextureHandle};

/// Spawn parameters shared by every fireball
#[derive(Debug, Clone, Copy)]
pub struct FireballSpec {
    pub speed: f32,
    pub radius: f32,
    pub lifetime: u32,
    pub texture: TextureHandle,
    pub sprite_scale: f32,
}

#[derive(Debug)]
pub struct Fireball {
    body: RigidBodyHandle,
    sprite: SpriteId,
    /// Direction of travel at spawn; +1.0 right, -1.0 left
    facing: f32,
    age: u32,
    lifetime: u32,
}

impl Fireball {
    /// Spawn one unit ahead of `origin` in the facing direction.
    pub fn spawn(
        physics: &mut PhysicsWorld,
        stage: &mut Stage,
        owner: OwnerId,
        origin: Vec2,
        facing: f32,
        spec: &FireballSpec,
    ) -> Self {
        let facing = facing.signum();
        let start = Vec2::new(origin.x + facing, origin.y);

        let body = physics.insert_body(
            presets::fireball_body(start.x, start.y, facing * spec.speed),
            presets::fireball_collider(spec.radius),
        );
        physics.set_owner(body, owner);

        let mut sprite = Sprite::new(start, spec.sprite_scale, spec.texture);
        sprite.set_facing(facing);
        let sprite = stage.add_sprite(sprite);

        debug!("fireball spawned at ({:.2}, {:.2})", start.x, start.y);

        Self {
            body,
            sprite,
            facing,
            age: 0,
            lifetime: spec.lifetime,
        }
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Advance one tick: age, mirror the body position onto the sprite.
    /// Returns true once the fireball has outlived its lifetime.
    pub fn update(&mut self, physics: &PhysicsWorld, stage: &mut Stage) -> bool {
        self.age += 1;

        if let (Some(body), Some(sprite)) = (
            physics.get_rigid_body(self.body),
            stage.sprite_mut(self.sprite),
        ) {
            let pos = body.translation();
            sprite.position = Vec2::new(pos.x, pos.y);
        }

        self.age > self.lifetime
    }

    /// Remove the fireball from the world and the stage
    pub fn despawn(self, physics: &mut PhysicsWorld, stage: &mut Stage) {
        physics.withdraw_body(self.body);
        stage.remove_sprite(self.sprite);
        debug!("fireball despawned after {} ticks", self.age);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stage::TextureLibrary;

    fn test_spec(library: &mut TextureLibrary) -> FireballSpec {
        FireballSpec {
            speed: 12.0,
            radius: 0.25,
            lifetime: 3,
            texture: library.register("fireball.png"),
            sprite_scale: 1.0,
        }
    }

    #[test]
    fn test_spawn_offsets_one_unit_in_facing_direction() {
        let mut physics = PhysicsWorld::new();
        let mut stage = Stage::new(20.0);
        let mut library = TextureLibrary::new();
        let spec = test_spec(&mut library);

        let right = Fireball::spawn(
            &mut physics,
            &mut stage,
            1,
            Vec2::new(5.0, 2.0),
            1.0,
            &spec,
        );
        let body = physics.get_rigid_body(right.body()).unwrap();
        assert_eq!(body.translation().x, 6.0);
        assert_eq!(body.translation().y, 2.0);
        assert!(body.linvel().x > 0.0);

        let left = Fireball::spawn(
            &mut physics,
            &mut stage,
            1,
            Vec2::new(5.0, 2.0),
            -1.0,
            &spec,
        );
        let body = physics.get_rigid_body(left.body()).unwrap();
        assert_eq!(body.translation().x, 4.0);
        assert!(body.linvel().x < 0.0);
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut physics = PhysicsWorld::new();
        let mut stage = Stage::new(20.0);
        let mut library = TextureLibrary::new();
        let spec = test_spec(&mut library);

        let mut fireball =
            Fireball::spawn(&mut physics, &mut stage, 1, Vec2::ZERO, 1.0, &spec);

        for _ in 0..spec.lifetime {
            assert!(!fireball.update(&physics, &mut stage));
        }
        assert!(fireball.update(&physics, &mut stage));
    }

    #[test]
    fn test_despawn_clears_world_and_stage() {
        let mut physics = PhysicsWorld::new();
        let mut stage = Stage::new(20.0);
        let mut library = TextureLibrary::new();
        let spec = test_spec(&mut library);

        let fireball = Fireball::spawn(&mut physics, &mut stage, 1, Vec2::ZERO, 1.0, &spec);
        let body = fireball.body();

        fireball.despawn(&mut physics, &mut stage);
        assert!(!physics.contains_body(body));
        assert_eq!(stage.sprite_count(), 0);
    }
}
