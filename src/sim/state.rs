//! Game state and entity types
//!
//! Everything a match needs to replay deterministically lives here.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::hex::{Coord, opposite};
use crate::config::{ResolvedConfig, Ruleset};
use crate::consts::*;

pub type EntityId = u32;
pub type PlayerId = usize;

/// Entity type tag as sent to players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Barrel,
    Mine,
    Cannonball,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Ship => "SHIP",
            EntityKind::Barrel => "BARREL",
            EntityKind::Mine => "MINE",
            EntityKind::Cannonball => "CANNONBALL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "SHIP" => Some(EntityKind::Ship),
            "BARREL" => Some(EntityKind::Barrel),
            "MINE" => Some(EntityKind::Mine),
            "CANNONBALL" => Some(EntityKind::Cannonball),
            _ => None,
        }
    }
}

/// The single action a ship performs this round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Wait,
    Faster,
    Slower,
    Port,
    Starboard,
    Fire(Coord),
    Mine,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Wait => "WAIT",
            Action::Faster => "FASTER",
            Action::Slower => "SLOWER",
            Action::Port => "PORT",
            Action::Starboard => "STARBOARD",
            Action::Fire(_) => "FIRE",
            Action::Mine => "MINE",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// A ship occupying three cells: bow, center and stern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: EntityId,
    pub position: Coord,
    pub orientation: u8,
    pub speed: i32,
    pub health: i32,
    pub owner: PlayerId,
    pub action: Action,
    pub mine_cooldown: i32,
    pub cannon_cooldown: i32,
    pub message: Option<String>,
}

impl Ship {
    pub fn new(id: EntityId, position: Coord, orientation: u8, owner: PlayerId) -> Self {
        Self {
            id,
            position,
            orientation: orientation % 6,
            speed: 0,
            health: INITIAL_SHIP_HEALTH,
            owner,
            action: Action::Wait,
            mine_cooldown: 0,
            cannon_cooldown: 0,
            message: None,
        }
    }

    pub fn bow(&self) -> Coord {
        self.position.neighbor(self.orientation)
    }

    pub fn stern(&self) -> Coord {
        self.position.neighbor(opposite(self.orientation))
    }

    /// True when `coord` is one of the three occupied cells
    pub fn at(&self, coord: Coord) -> bool {
        self.stern() == coord || self.bow() == coord || self.position == coord
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(MAX_SHIP_HEALTH);
    }

    /// Store a display message, cutting overly long ones
    pub fn set_message(&mut self, message: Option<&str>) {
        self.message = message.filter(|m| !m.is_empty()).map(|m| {
            if m.chars().count() > MAX_MESSAGE_LENGTH {
                let cut: String = m.chars().take(MAX_MESSAGE_LENGTH).collect();
                format!("{cut}...")
            } else {
                m.to_string()
            }
        });
    }

    /// Steer toward `target`, picking this round's action
    pub fn move_to(&mut self, target: Coord) {
        self.action = autopilot::steer(self.position, self.orientation, self.speed, target);
    }

    pub fn faster(&mut self) {
        self.action = Action::Faster;
    }

    pub fn slower(&mut self) {
        self.action = Action::Slower;
    }

    pub fn port(&mut self) {
        self.action = Action::Port;
    }

    pub fn starboard(&mut self) {
        self.action = Action::Starboard;
    }

    pub fn place_mine(&mut self, rules: &Ruleset) {
        if rules.mines_enabled {
            self.action = Action::Mine;
        }
    }

    pub fn fire(&mut self, target: Coord, rules: &Ruleset) {
        if rules.cannons_enabled {
            self.action = Action::Fire(target);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mine {
    pub id: EntityId,
    pub position: Coord,
}

/// A cannonball in flight; `position` is where it will land
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cannonball {
    pub id: EntityId,
    pub position: Coord,
    pub owner_id: EntityId,
    pub origin: Coord,
    pub initial_remaining_turns: i32,
    pub remaining_turns: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RumBarrel {
    pub id: EntityId,
    pub position: Coord,
    /// Rum carried, healed into the ship that picks it up
    pub health: i32,
}

/// Damage dealt this round, for the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    pub position: Coord,
    pub amount: i32,
    /// False for splashes that hit nothing
    pub hit: bool,
}

impl Damage {
    pub fn hit(position: Coord, amount: i32) -> Self {
        Self {
            position,
            amount,
            hit: true,
        }
    }

    pub fn miss(position: Coord) -> Self {
        Self {
            position,
            amount: 0,
            hit: false,
        }
    }
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: i64,
    pub rules: Ruleset,
    pub ships_per_player: i32,
    pub mine_count: i32,
    pub barrel_count: i32,
    pub player_count: usize,
    /// Rounds completed so far
    pub round: u32,
    pub phase: GamePhase,
    /// Live roster, grouped by owner
    pub ships: Vec<Ship>,
    /// Ships removed from the roster after sinking, in removal order
    pub sunk: Vec<Ship>,
    pub mines: Vec<Mine>,
    pub cannonballs: Vec<Cannonball>,
    pub barrels: Vec<RumBarrel>,
    /// Damage events of the current round
    pub damage: Vec<Damage>,
    /// Impact cells still to resolve this round
    pub(crate) explosions: Vec<Coord>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Empty board for `player_count` players
    pub fn new(seed: i64, rules: Ruleset, player_count: usize) -> Self {
        Self {
            seed,
            rules,
            ships_per_player: 0,
            mine_count: 0,
            barrel_count: 0,
            player_count,
            round: 0,
            phase: GamePhase::Running,
            ships: Vec::new(),
            sunk: Vec::new(),
            mines: Vec::new(),
            cannonballs: Vec::new(),
            barrels: Vec::new(),
            damage: Vec::new(),
            explosions: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a ship, keeping the roster grouped by owner. Returns its ID.
    pub fn spawn_ship(&mut self, position: Coord, orientation: u8, owner: PlayerId) -> EntityId {
        let id = self.next_entity_id();
        let at = self.ships.partition_point(|s| s.owner <= owner);
        self.ships.insert(at, Ship::new(id, position, orientation, owner));
        id
    }

    pub fn spawn_mine(&mut self, position: Coord) -> EntityId {
        let id = self.next_entity_id();
        self.mines.push(Mine { id, position });
        id
    }

    pub fn spawn_barrel(&mut self, position: Coord, health: i32) -> EntityId {
        let id = self.next_entity_id();
        self.barrels.push(RumBarrel {
            id,
            position,
            health,
        });
        id
    }

    /// Look up a ship by ID, sunk or not
    pub fn ship(&self, id: EntityId) -> Option<&Ship> {
        self.ships.iter().chain(&self.sunk).find(|s| s.id == id)
    }

    /// Every ship the player ever had, sunk or not, in spawn order
    pub fn player_ships(&self, player: PlayerId) -> Vec<&Ship> {
        let mut fleet: Vec<&Ship> = self
            .ships
            .iter()
            .chain(&self.sunk)
            .filter(|s| s.owner == player)
            .collect();
        fleet.sort_by_key(|s| s.id);
        fleet
    }

    /// The player's live roster
    pub fn ships_alive(&self, player: PlayerId) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(move |s| s.owner == player)
    }

    /// Sink every ship of a player that broke protocol or timed out
    pub fn set_player_dead(&mut self, player: PlayerId) {
        for ship in self.ships.iter_mut().filter(|s| s.owner == player) {
            ship.health = 0;
        }
    }

    /// Move ships at zero health off the live roster
    pub(crate) fn remove_sunk_ships(&mut self) {
        let (sunk, afloat): (Vec<Ship>, Vec<Ship>) =
            self.ships.drain(..).partition(|s| s.is_dead());
        self.ships = afloat;
        self.sunk.extend(sunk);
    }

    pub fn set_player_timeout(&mut self, player: PlayerId) {
        log::warn!("Player {} timed out, sinking its fleet", player);
        self.set_player_dead(player);
    }

    /// Clear per-round state before collecting orders
    pub fn prepare_round(&mut self) {
        for ship in &mut self.ships {
            ship.action = Action::Wait;
            ship.message = None;
        }
        self.explosions.clear();
        self.damage.clear();
    }

    /// Sum of health across all of the player's ships
    pub fn score(&self, player: PlayerId) -> i32 {
        self.player_ships(player).iter().map(|s| s.health).sum()
    }

    pub fn scores(&self) -> Vec<i32> {
        (0..self.player_count).map(|p| self.score(p)).collect()
    }

    /// The last fleet afloat, or the best score if several are; `None` on a tie
    pub fn winner(&self) -> Option<PlayerId> {
        let afloat: Vec<PlayerId> = (0..self.player_count)
            .filter(|&p| self.ships_alive(p).next().is_some())
            .collect();
        if let &[only] = afloat.as_slice() {
            return Some(only);
        }

        let scores = self.scores();
        let best = scores.iter().copied().max()?;
        let mut leaders = (0..self.player_count).filter(|&p| scores[p] == best);
        match (leaders.next(), leaders.next()) {
            (Some(leader), None) => Some(leader),
            _ => None,
        }
    }

    pub fn configuration(&self) -> ResolvedConfig {
        ResolvedConfig {
            seed: self.seed,
            ships_per_player: self.ships_per_player,
            mine_count: self.mine_count,
            barrel_count: self.barrel_count,
        }
    }

    /// True if any live ship other than `except` covers `coord`
    pub fn ship_covers(&self, coord: Coord, except: Option<EntityId>) -> bool {
        self.ships.iter().any(|s| Some(s.id) != except && s.at(coord))
    }

    pub fn mine_at(&self, coord: Coord) -> bool {
        self.mines.iter().any(|m| m.position == coord)
    }

    pub fn barrel_at(&self, coord: Coord) -> bool {
        self.barrels.iter().any(|b| b.position == coord)
    }
}
