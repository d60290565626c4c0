// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{BodyMaterial, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionGroups};
pub use world::{OwnerId, PhysicsWorld};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{Real, RigidBody, Vector};
