// The player-controlled character
//
// Owns the collision body, the power tier, the grace window, and the
// sprite state, and keeps the three consistent across every transition.
// The body is never resized in place: any size change goes through
// replace_body, and during grace the body is parked here, out of the
// physics world entirely.

use glam::Vec2;
use log::{debug, info};
use rapier2d::prelude::vector;

use crate::engine::physics::{
    body::{presets, BodyMaterial},
    OwnerId, PhysicsWorld, RigidBody, RigidBodyHandle,
};
use crate::engine::stage::{Sprite, SpriteId, Stage, TextureLibrary};
use crate::game::config::{ConfigError, GameConfig, HEIGHT_BIG, HEIGHT_SMALL};

use super::animation::{AnimationSelector, TierTextures};
use super::fireball::{Fireball, FireballSpec};
use super::grace::{GraceTimer, GRACE_ALPHA};
use super::tier::{self, BodySize, PowerTier, PowerupKind, Resize, TierEvent};

/// Result of a damage event, for the caller that must react to death
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Tier dropped (or stayed) and the grace window opened
    Survived,
    /// Damage at the Small tier: the character is dead
    Fatal,
}

/// Where the player's body currently lives. Exactly one of these at any
/// time; the world never holds two player bodies.
#[derive(Debug)]
enum BodySlot {
    /// Inserted in the physics world
    Live(RigidBodyHandle),
    /// Withdrawn for the grace window, waiting to be re-inserted
    Parked(Box<RigidBody>),
}

pub struct Player {
    owner: OwnerId,
    /// Separate owner id for spawned fireballs, so collision dispatch
    /// never mistakes a fireball contact for a player contact
    fireball_owner: OwnerId,
    tier: PowerTier,
    slot: BodySlot,
    half_extents: Vec2,
    material: BodyMaterial,
    grace: GraceTimer,
    selector: AnimationSelector,
    /// Set by the ground-contact collision callback, cleared by the jump path
    on_ground: bool,
    alive: bool,
    /// Horizontal intent for this tick, fed in from input
    accel: f32,
    sprite: SpriteId,
    textures_small: TierTextures,
    textures_big: TierTextures,
    textures_fire: TierTextures,
    fireballs: Vec<Fireball>,
    fireball_spec: FireballSpec,
    width_small: f32,
    width_big: f32,
}

impl Player {
    /// Build the player from config and insert its body into the world.
    /// Fails if any configured texture is missing from the library.
    pub fn new(
        config: &GameConfig,
        owner: OwnerId,
        fireball_owner: OwnerId,
        physics: &mut PhysicsWorld,
        stage: &mut Stage,
        library: &TextureLibrary,
    ) -> Result<Self, ConfigError> {
        let textures_small = TierTextures::resolve(&config.textures_small, library)?;
        let textures_big = TierTextures::resolve(&config.textures_big, library)?;
        let textures_fire = TierTextures::resolve(&config.textures_fire, library)?;

        let fireball_spec = FireballSpec {
            speed: config.fireball_speed,
            radius: config.fireball_radius,
            lifetime: config.fireball_lifetime,
            texture: library
                .lookup(&config.fireball_texture)
                .ok_or_else(|| ConfigError::MissingTexture(config.fireball_texture.clone()))?,
            sprite_scale: config.scale,
        };

        let material = BodyMaterial::default();
        let half_extents = Vec2::new(config.width_small / 2.0, HEIGHT_SMALL / 2.0);
        let spawn = config.starting_position;

        let handle = physics.insert_body(
            presets::player_body(spawn.x, spawn.y, &material),
            presets::player_collider(half_extents.x, half_extents.y, &material),
        );
        physics.set_owner(handle, owner);

        let sprite = stage.add_sprite(Sprite::new(spawn, config.scale, textures_small.stand));

        info!("player spawned at ({:.1}, {:.1})", spawn.x, spawn.y);

        Ok(Self {
            owner,
            fireball_owner,
            tier: PowerTier::Small,
            slot: BodySlot::Live(handle),
            half_extents,
            material,
            grace: GraceTimer::new(config.grace_period),
            selector: AnimationSelector::new(config.delta_frames),
            on_ground: true,
            alive: true,
            accel: 0.0,
            sprite,
            textures_small,
            textures_big,
            textures_fire,
            fireballs: Vec::new(),
            fireball_spec,
            width_small: config.width_small,
            width_big: config.width_big,
        })
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn fireball_owner(&self) -> OwnerId {
        self.fireball_owner
    }

    pub fn tier(&self) -> PowerTier {
        self.tier
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn in_grace(&self) -> bool {
        self.grace.is_active()
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// The jump path clears this after consuming the contact
    pub fn clear_on_ground(&mut self) {
        self.on_ground = false;
    }

    pub fn facing(&self) -> f32 {
        self.selector.facing()
    }

    pub fn sprite_id(&self) -> SpriteId {
        self.sprite
    }

    /// Current collision half-extents
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Handle of the body while it is inserted in the world
    pub fn live_handle(&self) -> Option<RigidBodyHandle> {
        match self.slot {
            BodySlot::Live(handle) => Some(handle),
            BodySlot::Parked(_) => None,
        }
    }

    pub fn fireball_count(&self) -> usize {
        self.fireballs.len()
    }

    /// Horizontal intent for this tick, from the input layer
    pub fn set_accel(&mut self, accel: f32) {
        self.accel = accel;
    }

    /// World position of the body, live or parked
    pub fn position(&self, physics: &PhysicsWorld) -> Vec2 {
        match &self.slot {
            BodySlot::Live(handle) => physics
                .get_rigid_body(*handle)
                .map(|body| Vec2::new(body.translation().x, body.translation().y))
                .unwrap_or_default(),
            BodySlot::Parked(body) => Vec2::new(body.translation().x, body.translation().y),
        }
    }

    fn velocity_x(&self, physics: &PhysicsWorld) -> f32 {
        match &self.slot {
            BodySlot::Live(handle) => physics
                .get_rigid_body(*handle)
                .map(|body| body.linvel().x)
                .unwrap_or(0.0),
            BodySlot::Parked(_) => 0.0,
        }
    }

    /// Collision callback entry point: a contact below the body's center
    /// means the player is standing on something.
    pub fn hit(&mut self, physics: &PhysicsWorld, other_pos: Vec2) {
        if other_pos.y < self.position(physics).y {
            self.on_ground = true;
        }
    }

    /// Apply a powerup pickup.
    pub fn apply_powerup(&mut self, physics: &mut PhysicsWorld, kind: PowerupKind) {
        if !self.alive {
            return;
        }

        let change = tier::transition(self.tier, TierEvent::Powerup(kind));
        if let Some(resize) = change.resize {
            self.replace_body(physics, resize);
        }
        if change.tier != self.tier {
            info!("power tier {:?} -> {:?} ({kind:?})", self.tier, change.tier);
        }
        self.tier = change.tier;
    }

    /// Apply a damage event. Non-fatal damage opens the grace window and
    /// withdraws the body from the world; at the Small tier it is death.
    pub fn apply_damage(&mut self, physics: &mut PhysicsWorld, stage: &mut Stage) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Fatal;
        }

        let change = tier::transition(self.tier, TierEvent::Damage);
        if change.fatal {
            self.alive = false;
            info!("player died at tier {:?}", self.tier);
            return DamageOutcome::Fatal;
        }

        if let Some(resize) = change.resize {
            self.replace_body(physics, resize);
        }
        info!("power tier {:?} -> {:?} (damage)", self.tier, change.tier);
        self.tier = change.tier;

        // Open (or restart) the grace window and pull the body out of
        // the simulation.
        self.grace.enter();
        if let Some(sprite) = stage.sprite_mut(self.sprite) {
            sprite.alpha = GRACE_ALPHA;
        }
        self.park_body(physics);
        debug!("grace window opened");

        DamageOutcome::Survived
    }

    /// Spawn a fireball one unit ahead in the facing direction.
    /// Only the Fire tier can throw.
    pub fn spawn_fireball(&mut self, physics: &mut PhysicsWorld, stage: &mut Stage) {
        if !self.alive || self.tier != PowerTier::Fire {
            return;
        }
        let origin = self.position(physics);
        let fireball = Fireball::spawn(
            physics,
            stage,
            self.fireball_owner,
            origin,
            self.selector.facing(),
            &self.fireball_spec,
        );
        self.fireballs.push(fireball);
    }

    /// Remove the fireball whose body matches `body`, if any. Used when
    /// a fireball hits something and is spent on impact.
    pub fn remove_fireball_by_body(
        &mut self,
        body: RigidBodyHandle,
        physics: &mut PhysicsWorld,
        stage: &mut Stage,
    ) -> bool {
        if let Some(index) = self.fireballs.iter().position(|f| f.body() == body) {
            let fireball = self.fireballs.remove(index);
            fireball.despawn(physics, stage);
            true
        } else {
            false
        }
    }

    /// Per-tick update: fireball lifetimes, the grace window, and the
    /// sprite (facing, texture, position, alpha).
    pub fn update(&mut self, physics: &mut PhysicsWorld, stage: &mut Stage) {
        if !self.alive {
            return;
        }

        self.update_fireballs(physics, stage);
        self.update_grace(physics, stage);

        let position = self.position(physics);
        let vel_x = self.velocity_x(physics);
        let textures = match self.tier {
            PowerTier::Small => &self.textures_small,
            PowerTier::Big => &self.textures_big,
            PowerTier::Fire => &self.textures_fire,
        };
        let texture = self
            .selector
            .select(self.accel, self.on_ground, vel_x, textures);
        let facing = self.selector.facing();

        if let Some(sprite) = stage.sprite_mut(self.sprite) {
            sprite.position = position;
            sprite.texture = texture;
            sprite.set_facing(facing);
        }
    }

    fn update_fireballs(&mut self, physics: &mut PhysicsWorld, stage: &mut Stage) {
        let mut index = 0;
        while index < self.fireballs.len() {
            if self.fireballs[index].update(physics, stage) {
                let expired = self.fireballs.remove(index);
                expired.despawn(physics, stage);
            } else {
                index += 1;
            }
        }
    }

    fn update_grace(&mut self, physics: &mut PhysicsWorld, stage: &mut Stage) {
        if !self.grace.is_active() {
            return;
        }

        // The body should already be parked; if it is somehow still in
        // the world this tick, pin it in place.
        match &mut self.slot {
            BodySlot::Live(handle) => {
                if let Some(body) = physics.get_rigid_body_mut(*handle) {
                    body.set_linvel(vector![0.0, 0.0], true);
                }
            }
            BodySlot::Parked(body) => {
                body.set_linvel(vector![0.0, 0.0], false);
            }
        }

        if self.grace.tick() {
            if let Some(sprite) = stage.sprite_mut(self.sprite) {
                sprite.alpha = 1.0;
            }
            self.unpark_body(physics);
            debug!("grace window closed");
        }
    }

    /// Replace the collision body with one sized for `resize.target`,
    /// vertically nudged so the feet stay planted. Material properties
    /// are copied forward from the outgoing body. A replacement during
    /// grace stays parked until the window closes.
    fn replace_body(&mut self, physics: &mut PhysicsWorld, resize: Resize) {
        let target = self.half_extents_for(resize.target);

        match &self.slot {
            BodySlot::Live(handle) => {
                let handle = *handle;
                if let (Some(body), Some(collider)) =
                    (physics.get_rigid_body(handle), physics.body_collider(handle))
                {
                    self.material = BodyMaterial::of(body, collider);
                }
                let position = self.position(physics);
                physics.withdraw_body(handle);

                let replacement = physics.insert_body(
                    presets::player_body(
                        position.x,
                        position.y + resize.vertical_offset,
                        &self.material,
                    ),
                    presets::player_collider(target.x, target.y, &self.material),
                );
                physics.set_owner(replacement, self.owner);
                self.slot = BodySlot::Live(replacement);
            }
            BodySlot::Parked(body) => {
                let position = *body.translation();
                let replacement = presets::player_body(
                    position.x,
                    position.y + resize.vertical_offset,
                    &self.material,
                );
                self.slot = BodySlot::Parked(Box::new(replacement));
            }
        }

        self.half_extents = target;
        debug!(
            "body replaced: half-extents ({:.2}, {:.2}), dy {:+.1}",
            target.x, target.y, resize.vertical_offset
        );
    }

    fn park_body(&mut self, physics: &mut PhysicsWorld) {
        if let BodySlot::Live(handle) = self.slot {
            if let Some(mut body) = physics.withdraw_body(handle) {
                body.set_linvel(vector![0.0, 0.0], false);
                self.slot = BodySlot::Parked(Box::new(body));
            }
        }
    }

    fn unpark_body(&mut self, physics: &mut PhysicsWorld) {
        if matches!(self.slot, BodySlot::Parked(_)) {
            let BodySlot::Parked(body) =
                std::mem::replace(&mut self.slot, BodySlot::Live(RigidBodyHandle::invalid()))
            else {
                unreachable!();
            };
            let handle = physics.insert_body(
                *body,
                presets::player_collider(self.half_extents.x, self.half_extents.y, &self.material),
            );
            physics.set_owner(handle, self.owner);
            self.slot = BodySlot::Live(handle);
        }
    }

    fn half_extents_for(&self, size: BodySize) -> Vec2 {
        match size {
            BodySize::Small => Vec2::new(self.width_small / 2.0, HEIGHT_SMALL / 2.0),
            BodySize::Big => Vec2::new(self.width_big / 2.0, HEIGHT_BIG / 2.0),
        }
    }
}
