//! Match configuration and league rulesets
//!
//! Read once at match start; nothing here is consulted again mid-match except
//! through the resolved [`Ruleset`] carried by the game state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// League tiers, each unlocking more of the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum League {
    /// One ship, no weapons, speed 1
    Wood3,
    /// Adds cannons and mines
    Wood2,
    /// Up to three ships
    Wood1,
    /// Max speed 2
    #[default]
    Bronze,
}

impl League {
    pub fn as_str(&self) -> &'static str {
        match self {
            League::Wood3 => "Wood3",
            League::Wood2 => "Wood2",
            League::Wood1 => "Wood1",
            League::Bronze => "Bronze",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wood3" | "0" => Some(League::Wood3),
            "wood2" | "1" => Some(League::Wood2),
            "wood1" | "2" => Some(League::Wood1),
            "bronze" | "3" => Some(League::Bronze),
            _ => None,
        }
    }
}

/// Rule switches derived from a league tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub league: League,
    pub max_ships: i32,
    pub cannons_enabled: bool,
    pub mines_enabled: bool,
    pub min_mines: i32,
    pub max_mines: i32,
    pub max_ship_speed: i32,
    /// End the match as soon as no rum barrel is left
    pub barrels_exhausted_ends_match: bool,
}

impl From<League> for Ruleset {
    fn from(league: League) -> Self {
        match league {
            League::Wood3 => Self {
                league,
                max_ships: 1,
                cannons_enabled: false,
                mines_enabled: false,
                min_mines: 0,
                max_mines: 0,
                max_ship_speed: 1,
                barrels_exhausted_ends_match: true,
            },
            League::Wood2 => Self {
                league,
                max_ships: 1,
                cannons_enabled: true,
                mines_enabled: true,
                min_mines: 5,
                max_mines: 10,
                max_ship_speed: 1,
                barrels_exhausted_ends_match: false,
            },
            League::Wood1 => Self {
                league,
                max_ships: 3,
                cannons_enabled: true,
                mines_enabled: true,
                min_mines: 5,
                max_mines: 10,
                max_ship_speed: 1,
                barrels_exhausted_ends_match: false,
            },
            League::Bronze => Self {
                league,
                max_ships: 3,
                cannons_enabled: true,
                mines_enabled: true,
                min_mines: 5,
                max_mines: 10,
                max_ship_speed: 2,
                barrels_exhausted_ends_match: false,
            },
        }
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset::from(League::default())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read match configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid match configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: i32 },
    #[error("unknown league {0:?}")]
    UnknownLeague(String),
}

/// Match parameters; every field is optional and unset ones are drawn from
/// the match generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    pub seed: Option<i64>,
    pub ships_per_player: Option<i32>,
    pub mine_count: Option<i32>,
    pub barrel_count: Option<i32>,
    pub league: League,
    /// Overrides the league's barrel exhaustion rule
    pub barrels_exhausted_ends_match: Option<bool>,
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_seed(seed: i64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Command line form: `[SEED | CONFIG.json] [LEAGUE]`.
    ///
    /// A league given on the command line overrides the one in the file.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut config = match args.next() {
            None => Self::default(),
            Some(arg) => match arg.parse::<i64>() {
                Ok(seed) => Self::with_seed(seed),
                Err(_) => Self::load(&arg)?,
            },
        };
        if let Some(name) = args.next() {
            config.league = League::from_str(&name).ok_or(ConfigError::UnknownLeague(name))?;
        }
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("shipsPerPlayer", self.ships_per_player),
            ("mineCount", self.mine_count),
            ("barrelCount", self.barrel_count),
        ];
        for (field, value) in fields {
            if let Some(value) = value.filter(|v| *v < 0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Resolved rule switches for this match
    pub fn ruleset(&self) -> Ruleset {
        let mut rules = Ruleset::from(self.league);
        if let Some(flag) = self.barrels_exhausted_ends_match {
            rules.barrels_exhausted_ends_match = flag;
        }
        rules
    }

    /// Seed to use, drawing a fresh one when none was given
    pub fn resolve_seed(&self) -> i64 {
        self.seed.unwrap_or_else(rand::random::<i64>)
    }
}

/// Parameters actually used by a running match, reported back to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub seed: i64,
    pub ships_per_player: i32,
    pub mine_count: i32,
    pub barrel_count: i32,
}
