use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Physical material properties carried across body replacements.
///
/// A body is never resized in place; every size change builds a fresh
/// body and collider, and this snapshot is what keeps the character
/// feeling identical before and after the swap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMaterial {
    /// Total mass of the body
    pub mass: Real,
    /// Contact friction coefficient
    pub friction: Real,
    /// Bounciness on contact
    pub restitution: Real,
    /// Air resistance applied to linear velocity
    pub linear_damping: Real,
}

impl BodyMaterial {
    /// Read the material back off a live body and its collider
    pub fn of(body: &RigidBody, collider: &Collider) -> Self {
        Self {
            mass: body.mass(),
            friction: collider.friction(),
            restitution: collider.restitution(),
            linear_damping: body.linear_damping(),
        }
    }
}

impl Default for BodyMaterial {
    fn default() -> Self {
        Self {
            mass: 1.0,
            friction: 0.1,
            restitution: 0.0,
            linear_damping: 0.5,
        }
    }
}

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    linear_damping: Real,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            linear_damping: 0.0,
            gravity_scale: 1.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            linear_damping: 0.0,
            gravity_scale: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    /// Set air resistance
    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (used for characters so they never tip over)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .linear_damping(self.linear_damping)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ShapeBuilder {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    mass: Real,
}

impl ShapeBuilder {
    /// Create a box-shaped collider from half-extents
    pub fn cuboid(half_width: Real, half_height: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_width, half_height),
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            mass: 1.0,
        }
    }

    /// Create a circle-shaped collider
    pub fn ball(radius: Real) -> Self {
        Self {
            shape: SharedShape::ball(radius),
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            mass: 1.0,
        }
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Make this a sensor (detects overlap without physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Set friction coefficient
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set mass directly
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = mass;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution)
            .mass(self.mass)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build()
    }
}

/// Common body/collider configurations for game objects
pub mod presets {
    use super::*;

    /// Create the player body (dynamic, rotation locked, never sleeps)
    pub fn player_body(x: Real, y: Real, material: &BodyMaterial) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .linear_damping(material.linear_damping)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Create the player collider from half-extents and material
    pub fn player_collider(half_width: Real, half_height: Real, material: &BodyMaterial) -> Collider {
        ShapeBuilder::cuboid(half_width, half_height)
            .collision_groups(CollisionGroups::Player)
            .friction(material.friction)
            .restitution(material.restitution)
            .mass(material.mass)
            .build()
    }

    /// Create a terrain body (fixed/static)
    pub fn terrain_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a terrain collider (box shape, full width/height)
    pub fn terrain_collider(width: Real, height: Real) -> Collider {
        ShapeBuilder::cuboid(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Terrain)
            .friction(0.3)
            .build()
    }

    /// Create a fireball body launched horizontally
    pub fn fireball_body(x: Real, y: Real, vel_x: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .linvel(vel_x, 0.0)
            .can_sleep(false)
            .build()
    }

    /// Create a fireball collider (bouncy little ball)
    pub fn fireball_collider(radius: Real) -> Collider {
        ShapeBuilder::ball(radius)
            .collision_groups(CollisionGroups::Fireball)
            .friction(0.0)
            .restitution(0.8)
            .mass(0.1)
            .build()
    }

    /// Create a hazard sensor collider (damage on touch, no blocking)
    pub fn hazard_collider(width: Real, height: Real) -> Collider {
        ShapeBuilder::cuboid(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Hazard)
            .sensor(true)
            .build()
    }

    /// Create a powerup sensor collider (pickup detection only)
    pub fn powerup_collider(width: Real, height: Real) -> Collider {
        ShapeBuilder::cuboid(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Powerup)
            .sensor(true)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic()
            .position(10.0, 20.0)
            .linvel(5.0, 0.0)
            .build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
    }

    #[test]
    fn test_player_preset_locks_rotation() {
        let material = BodyMaterial::default();
        let body = presets::player_body(0.0, 0.0, &material);
        let collider = presets::player_collider(0.5, 1.0, &material);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert!(!collider.is_sensor());
    }

    #[test]
    fn test_material_roundtrip() {
        let material = BodyMaterial {
            mass: 2.5,
            friction: 0.2,
            restitution: 0.1,
            linear_damping: 0.7,
        };
        let body = presets::player_body(0.0, 0.0, &material);
        let collider = presets::player_collider(0.5, 1.0, &material);

        let read_back = BodyMaterial::of(&body, &collider);
        assert_eq!(read_back.friction, material.friction);
        assert_eq!(read_back.restitution, material.restitution);
        assert_eq!(read_back.linear_damping, material.linear_damping);
        assert!((read_back.mass - material.mass).abs() < 1e-5);
    }

    #[test]
    fn test_powerup_collider_is_sensor() {
        let collider = presets::powerup_collider(1.0, 1.0);
        assert!(collider.is_sensor());
    }
}
