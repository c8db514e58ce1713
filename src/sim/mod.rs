//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies

pub mod aircraft;
pub mod entity;
pub mod factory;
pub mod hitbox;
pub mod manager;
pub mod physics;
pub mod pool;
pub mod state;
pub mod tick;

pub use aircraft::{Aircraft, BulletPattern, Role};
pub use entity::{Body, Bullet, Decor, DecorKind, Entity};
pub use factory::{Archetype, BANDS, EnemyFactory};
pub use hitbox::{Hitbox, Rect};
pub use manager::EntityManager;
pub use physics::{CollisionReport, PhysicsManager, PhysicsSet};
pub use pool::{BulletPool, Shot};
pub use state::{Category, EntityView, Event, Facing, Phase};
pub use tick::{PlayerIntents, Simulation};
