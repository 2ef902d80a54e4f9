//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded match generator only
//! - Stable iteration order (roster order, then entity ID)
//! - No I/O beyond logging

pub mod autopilot;
pub mod collision;
pub mod generation;
pub mod hex;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{CollisionRule, PendingMove, resolve_collisions};
pub use generation::generate;
pub use hex::{Coord, CubeCoord};
pub use rng::MatchRng;
pub use state::{
    Action, Cannonball, Damage, EntityId, EntityKind, GamePhase, GameState, Mine, PlayerId,
    RumBarrel, Ship,
};
pub use tick::TurnOutcome;
