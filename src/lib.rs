//! Rumrunners - referee core for a two-player hex naval combat game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hex geometry, world generation, turn engine)
//! - `protocol`: Line-based command decoding and player/viewer output
//! - `config`: Match configuration and league rulesets
//! - `driver`: In-process match loop and bots

pub mod config;
pub mod driver;
pub mod protocol;
pub mod sim;

pub use config::{League, MatchConfig, Ruleset};
pub use driver::{Bot, MatchSummary, RumHunter, run_match};

/// Game configuration constants
pub mod consts {
    /// Map dimensions (odd-r offset hex grid)
    pub const MAP_WIDTH: i32 = 23;
    pub const MAP_HEIGHT: i32 = 21;

    /// The map is mirrored between exactly two fleets
    pub const PLAYER_COUNT: usize = 2;

    /// Turns before a weapon can be used again
    pub const COOLDOWN_CANNON: i32 = 2;
    pub const COOLDOWN_MINE: i32 = 5;

    /// Ship health
    pub const INITIAL_SHIP_HEALTH: i32 = 100;
    pub const MAX_SHIP_HEALTH: i32 = 100;
    pub const MIN_SHIPS: i32 = 1;

    /// Rum barrels
    pub const MIN_RUM_BARRELS: i32 = 10;
    pub const MAX_RUM_BARRELS: i32 = 26;
    pub const MIN_RUM_BARREL_VALUE: i32 = 10;
    pub const MAX_RUM_BARREL_VALUE: i32 = 20;
    /// Cap on the barrel left behind by a sunk ship
    pub const REWARD_RUM_BARREL_VALUE: i32 = 30;

    /// Mines are only reported to players with a ship this close
    pub const MINE_VISIBILITY_RANGE: i32 = 5;
    /// Cannon range, measured from the bow
    pub const FIRE_DISTANCE_MAX: i32 = 10;

    /// Damage values
    pub const LOW_DAMAGE: i32 = 25;
    pub const HIGH_DAMAGE: i32 = 50;
    pub const MINE_DAMAGE: i32 = 25;
    pub const NEAR_MINE_DAMAGE: i32 = 10;

    /// Round limit for a match
    pub const MAX_ROUNDS: u32 = 200;
    /// Display messages longer than this are cut and suffixed with "..."
    pub const MAX_MESSAGE_LENGTH: usize = 50;
}

/// Clamp an integer into `[min, max]`
#[inline]
pub fn clamp(val: i32, min: i32, max: i32) -> i32 {
    min.max(max.min(val))
}
