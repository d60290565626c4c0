// Game assembly
//
// Wires the player, the physics world, and the stage together: world
// construction, entity bookkeeping, input application, and per-tick
// collision dispatch. Collision callbacks hand back collider handles;
// the owner map in the physics layer turns those into entities here.

pub mod config;
pub mod player;

use std::collections::HashMap;

use glam::Vec2;
use log::{debug, info};
use rapier2d::prelude::vector;

use crate::core::math;
use crate::engine::game_loop::FIXED_TIMESTEP;
use crate::engine::input::{Action, InputState};
use crate::engine::physics::{body::presets, CollisionEvent, OwnerId, PhysicsWorld};
use crate::engine::stage::{Sprite, SpriteId, Stage, TextureLibrary};

use config::{ConfigError, GameConfig};
use player::{Player, PowerupKind};

/// What kind of thing an owner id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityKind {
    Terrain,
    Powerup(PowerupKind),
    Hazard,
}

#[derive(Debug)]
struct WorldEntity {
    kind: EntityKind,
    body: crate::engine::physics::RigidBodyHandle,
    sprite: Option<SpriteId>,
}

pub struct Game {
    config: GameConfig,
    physics: PhysicsWorld,
    stage: Stage,
    textures: TextureLibrary,
    player: Player,
    entities: HashMap<OwnerId, WorldEntity>,
    next_owner: OwnerId,
}

impl Game {
    /// Validate the config, build the world, and spawn the player on a
    /// flat stretch of ground.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut textures = TextureLibrary::new();
        for set in [
            &config.textures_small,
            &config.textures_big,
            &config.textures_fire,
        ] {
            for name in set.names() {
                textures.register(name);
            }
        }
        textures.register(&config.fireball_texture);

        let mut physics = PhysicsWorld::new();
        let mut stage = Stage::new(config.view_width);

        let player_owner: OwnerId = 1;
        let fireball_owner: OwnerId = 2;
        let player = Player::new(
            &config,
            player_owner,
            fireball_owner,
            &mut physics,
            &mut stage,
            &textures,
        )?;

        let mut game = Self {
            config,
            physics,
            stage,
            textures,
            player,
            entities: HashMap::new(),
            next_owner: 3,
        };

        // Flat ground under the whole playable strip
        game.spawn_terrain(50.0, -0.5, 100.0, 1.0);

        Ok(game)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn game_over(&self) -> bool {
        !self.player.is_alive()
    }

    fn allocate_owner(&mut self) -> OwnerId {
        let owner = self.next_owner;
        self.next_owner += 1;
        owner
    }

    /// Add a static terrain block centered at (x, y)
    pub fn spawn_terrain(&mut self, x: f32, y: f32, width: f32, height: f32) -> OwnerId {
        let owner = self.allocate_owner();
        let body = self.physics.insert_body(
            presets::terrain_body(x, y),
            presets::terrain_collider(width, height),
        );
        self.physics.set_owner(body, owner);
        self.entities.insert(
            owner,
            WorldEntity {
                kind: EntityKind::Terrain,
                body,
                sprite: None,
            },
        );
        owner
    }

    /// Place a powerup pickup at (x, y)
    pub fn spawn_powerup(&mut self, x: f32, y: f32, kind: PowerupKind) -> OwnerId {
        let owner = self.allocate_owner();
        let body = self.physics.insert_body(
            presets::terrain_body(x, y),
            presets::powerup_collider(0.8, 0.8),
        );
        self.physics.set_owner(body, owner);

        let texture_name = match kind {
            PowerupKind::Mushroom => "mushroom.png",
            PowerupKind::FireFlower => "fire_flower.png",
        };
        let texture = self.textures.register(texture_name);
        let sprite = self
            .stage
            .add_sprite(Sprite::new(Vec2::new(x, y), self.config.scale, texture));

        self.entities.insert(
            owner,
            WorldEntity {
                kind: EntityKind::Powerup(kind),
                body,
                sprite: Some(sprite),
            },
        );
        debug!("powerup {kind:?} placed at ({x:.1}, {y:.1})");
        owner
    }

    /// Place a hazard at (x, y)
    pub fn spawn_hazard(&mut self, x: f32, y: f32) -> OwnerId {
        let owner = self.allocate_owner();
        let body = self.physics.insert_body(
            presets::terrain_body(x, y),
            presets::hazard_collider(0.9, 0.9),
        );
        self.physics.set_owner(body, owner);

        let texture = self.textures.register("goomba.png");
        let sprite = self
            .stage
            .add_sprite(Sprite::new(Vec2::new(x, y), self.config.scale, texture));

        self.entities.insert(
            owner,
            WorldEntity {
                kind: EntityKind::Hazard,
                body,
                sprite: Some(sprite),
            },
        );
        debug!("hazard placed at ({x:.1}, {y:.1})");
        owner
    }

    fn despawn_entity(&mut self, owner: OwnerId) {
        if let Some(entity) = self.entities.remove(&owner) {
            self.physics.withdraw_body(entity.body);
            if let Some(sprite) = entity.sprite {
                self.stage.remove_sprite(sprite);
            }
        }
    }

    /// Advance the simulation by one fixed tick
    pub fn update(&mut self, input: &mut InputState) {
        if self.player.is_alive() {
            self.apply_input(input);
        }

        self.physics.step();
        self.dispatch_collisions();

        self.player.update(&mut self.physics, &mut self.stage);

        let moving_forward = input.horizontal_accel() > 0.0;
        let player_x = self.player.position(&self.physics).x;
        self.stage.follow(player_x, moving_forward);

        input.end_frame();
    }

    fn apply_input(&mut self, input: &InputState) {
        let accel = input.horizontal_accel();
        self.player.set_accel(accel);

        if let Some(handle) = self.player.live_handle() {
            if input.just_pressed(Action::Jump) && self.player.on_ground() {
                if let Some(body) = self.physics.get_rigid_body_mut(handle) {
                    let vel = *body.linvel();
                    body.set_linvel(vector![vel.x, self.config.jump_speed], true);
                }
                self.player.clear_on_ground();
                debug!("jump");
            }

            // Ramp horizontal velocity toward the intended speed
            if let Some(body) = self.physics.get_rigid_body_mut(handle) {
                let vel = *body.linvel();
                let target = accel * self.config.move_speed;
                let vel_x = math::approach(vel.x, target, self.config.accel_rate * FIXED_TIMESTEP);
                body.set_linvel(vector![vel_x, vel.y], true);
            }
        }

        if input.just_pressed(Action::Fire) {
            self.player.spawn_fireball(&mut self.physics, &mut self.stage);
        }
    }

    /// Route this tick's contact events to the player
    fn dispatch_collisions(&mut self) {
        let player_owner = self.player.owner();
        let fireball_owner = self.player.fireball_owner();

        for event in self.physics.collision_events() {
            let CollisionEvent::Started {
                collider1,
                collider2,
            } = event
            else {
                continue;
            };

            let (Some(owner1), Some(owner2)) = (
                self.physics.owner_of_collider(collider1),
                self.physics.owner_of_collider(collider2),
            ) else {
                continue;
            };

            // Orient the pair so the player (or a fireball) comes first
            let (first, second, second_collider) = if owner1 == player_owner
                || owner1 == fireball_owner
            {
                (owner1, owner2, collider2)
            } else if owner2 == player_owner || owner2 == fireball_owner {
                (owner2, owner1, collider1)
            } else {
                continue;
            };

            let Some(kind) = self.entities.get(&second).map(|e| e.kind) else {
                continue;
            };

            if first == player_owner {
                match kind {
                    EntityKind::Powerup(powerup) => {
                        info!("powerup collected: {powerup:?}");
                        self.despawn_entity(second);
                        self.player.apply_powerup(&mut self.physics, powerup);
                    }
                    EntityKind::Hazard => {
                        self.player.apply_damage(&mut self.physics, &mut self.stage);
                    }
                    EntityKind::Terrain => {
                        let other_pos = self
                            .physics
                            .collider_parent(second_collider)
                            .and_then(|h| self.physics.get_rigid_body(h))
                            .map(|b| Vec2::new(b.translation().x, b.translation().y));
                        if let Some(pos) = other_pos {
                            self.player.hit(&self.physics, pos);
                        }
                    }
                }
            } else if kind == EntityKind::Hazard {
                // A fireball spends itself on the hazard it kills
                info!("hazard destroyed by fireball");
                self.despawn_entity(second);
                let fireball_body = match (
                    self.physics.collider_parent(collider1),
                    self.physics.owner_of_collider(collider1),
                ) {
                    (Some(body), Some(owner)) if owner == fireball_owner => Some(body),
                    _ => self.physics.collider_parent(collider2),
                };
                if let Some(body) = fireball_body {
                    self.player
                        .remove_fireball_by_body(body, &mut self.physics, &mut self.stage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use player::PowerTier;

    fn test_game() -> Game {
        let mut config = GameConfig::default();
        config.grace_period = 10;
        Game::new(config).expect("default config must build")
    }

    #[test]
    fn test_new_game_has_player_and_ground() {
        let game = test_game();
        assert!(game.player().is_alive());
        assert_eq!(game.player().tier(), PowerTier::Small);
        // Player body plus the ground strip
        assert_eq!(game.physics().body_count(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.move_speed = 0.0;
        assert!(Game::new(config).is_err());
    }

    #[test]
    fn test_spawned_entities_have_distinct_owners() {
        let mut game = test_game();
        let a = game.spawn_powerup(8.0, 1.0, PowerupKind::Mushroom);
        let b = game.spawn_hazard(12.0, 1.0);
        assert_ne!(a, b);
        assert_ne!(a, game.player().owner());
        assert_ne!(b, game.player().fireball_owner());
    }

    #[test]
    fn test_despawn_entity_clears_body_and_sprite() {
        let mut game = test_game();
        let sprites_before = game.stage().sprite_count();
        let bodies_before = game.physics().body_count();

        let owner = game.spawn_powerup(8.0, 1.0, PowerupKind::Mushroom);
        assert_eq!(game.stage().sprite_count(), sprites_before + 1);
        assert_eq!(game.physics().body_count(), bodies_before + 1);

        game.despawn_entity(owner);
        assert_eq!(game.stage().sprite_count(), sprites_before);
        assert_eq!(game.physics().body_count(), bodies_before);
    }

    #[test]
    fn test_update_ticks_without_input() {
        let mut game = test_game();
        let mut input = InputState::new();
        for _ in 0..10 {
            game.update(&mut input);
        }
        assert!(game.player().is_alive());
        assert!(!game.game_over());
    }

    #[test]
    fn test_movement_input_accelerates_player() {
        let mut game = test_game();
        let mut input = InputState::new();

        input.press(Action::MoveRight);
        let x_before = game.player().position(game.physics()).x;
        for _ in 0..30 {
            game.update(&mut input);
        }
        let x_after = game.player().position(game.physics()).x;
        assert!(x_after > x_before);
        assert_eq!(game.player().facing(), 1.0);
    }

    #[test]
    fn test_jump_clears_ground_contact() {
        let mut game = test_game();
        let mut input = InputState::new();

        // Let the player settle onto the ground first
        for _ in 0..30 {
            game.update(&mut input);
        }
        assert!(game.player().on_ground());

        input.press(Action::Jump);
        game.update(&mut input);
        assert!(!game.player().on_ground());

        let handle = game.player().live_handle().expect("player body is live");
        let vel_y = game.physics().get_rigid_body(handle).unwrap().linvel().y;
        assert!(vel_y > 0.0);
    }

    #[test]
    fn test_walking_into_powerup_upgrades() {
        let mut game = test_game();
        let mut input = InputState::new();
        game.spawn_powerup(5.0, 0.5, PowerupKind::Mushroom);

        input.press(Action::MoveRight);
        for _ in 0..240 {
            game.update(&mut input);
            if game.player().tier() == PowerTier::Big {
                break;
            }
        }
        assert_eq!(game.player().tier(), PowerTier::Big);
        // The pickup is gone
        assert!(!game
            .entities
            .values()
            .any(|e| matches!(e.kind, EntityKind::Powerup(_))));
    }

    #[test]
    fn test_walking_into_hazard_while_small_is_fatal() {
        let mut game = test_game();
        let mut input = InputState::new();
        game.spawn_hazard(5.0, 0.5);

        input.press(Action::MoveRight);
        for _ in 0..240 {
            game.update(&mut input);
            if game.game_over() {
                break;
            }
        }
        assert!(game.game_over());
    }

    #[test]
    fn test_hazard_hit_while_big_opens_grace_then_recovers() {
        let mut game = test_game();
        let mut input = InputState::new();
        game.spawn_powerup(4.0, 0.5, PowerupKind::Mushroom);
        let hazard = game.spawn_hazard(8.0, 0.5);

        input.press(Action::MoveRight);
        for _ in 0..240 {
            game.update(&mut input);
            if game.player().in_grace() {
                break;
            }
        }
        assert!(game.player().in_grace());
        assert_eq!(game.player().tier(), PowerTier::Small);
        assert!(game.player().live_handle().is_none());

        // Clear the hazard so the re-inserted body does not land back
        // inside it, then let grace run out
        game.despawn_entity(hazard);
        input.release(Action::MoveRight);
        for _ in 0..20 {
            game.update(&mut input);
        }
        assert!(!game.player().in_grace());
        assert!(game.player().live_handle().is_some());
        assert!(game.player().is_alive());
    }
}
