use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Identifier for the game entity owning a body.
///
/// Collision callbacks hand back collider handles; this map is how the
/// game layer finds the entity that owns the touched body, instead of
/// stashing a back-reference on the body itself.
pub type OwnerId = u64;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,

    /// Mapping from body handles to owning game entities
    body_to_owner: HashMap<RigidBodyHandle, OwnerId>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            body_to_owner: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Clear previous frame's collision events
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            event_handler,
        );
    }

    /// Insert a rigid body with an attached collider.
    ///
    /// Returns the new body handle. Handles from a previous insertion of
    /// the "same" body are invalid after a withdraw; the caller is
    /// expected to replace its stored handle with this one.
    pub fn insert_body(&mut self, body: RigidBody, collider: Collider) -> RigidBodyHandle {
        let handle = self.rigid_body_set.insert(body);
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Remove a body from the simulation, returning it by value.
    ///
    /// The attached colliders are destroyed and the owner mapping is
    /// dropped. Withdrawing a handle that is not in the world is a no-op
    /// returning `None`, so remove/insert ordering bugs stay harmless.
    pub fn withdraw_body(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        self.body_to_owner.remove(&handle);
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        )
    }

    /// Check whether a body is currently inserted in the simulation
    pub fn contains_body(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    /// Number of bodies currently inserted
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get the first collider attached to a body
    pub fn body_collider(&self, handle: RigidBodyHandle) -> Option<&Collider> {
        let body = self.rigid_body_set.get(handle)?;
        body.colliders()
            .first()
            .and_then(|ch| self.collider_set.get(*ch))
    }

    /// Get the body a collider is attached to
    pub fn collider_parent(&self, handle: ColliderHandle) -> Option<RigidBodyHandle> {
        self.collider_set.get(handle).and_then(|c| c.parent())
    }

    /// Associate a game entity with a rigid body
    pub fn set_owner(&mut self, body_handle: RigidBodyHandle, owner: OwnerId) {
        self.body_to_owner.insert(body_handle, owner);
    }

    /// Look up the entity owning a rigid body
    pub fn owner_of(&self, body_handle: RigidBodyHandle) -> Option<OwnerId> {
        self.body_to_owner.get(&body_handle).copied()
    }

    /// Look up the entity owning the body a collider is attached to
    pub fn owner_of_collider(&self, collider: ColliderHandle) -> Option<OwnerId> {
        self.collider_parent(collider)
            .and_then(|body| self.owner_of(body))
    }

    /// Get all collision events from this frame
    pub fn collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Set gravity for the physics world
    pub fn set_gravity(&mut self, gravity: Vector<Real>) {
        self.gravity = gravity;
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
