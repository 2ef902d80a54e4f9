//! Output for players and viewers
//!
//! Players get the entity list they are allowed to see each round. Viewers get
//! the full frame, either as space-separated lines or as a serializable
//! [`FrameSnapshot`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{
    Cannonball, Coord, Damage, EntityKind, GameState, Mine, PlayerId, RumBarrel, Ship,
};

/// Anything that shows up in a player's entity list
#[derive(Debug, Clone, Copy)]
enum Entity<'a> {
    Ship(&'a Ship),
    Barrel(&'a RumBarrel),
    Mine(&'a Mine),
    Cannonball(&'a Cannonball),
}

impl Entity<'_> {
    fn kind(&self) -> EntityKind {
        match self {
            Entity::Ship(_) => EntityKind::Ship,
            Entity::Barrel(_) => EntityKind::Barrel,
            Entity::Mine(_) => EntityKind::Mine,
            Entity::Cannonball(_) => EntityKind::Cannonball,
        }
    }

    /// `id TYPE x y arg1 arg2 arg3 arg4`
    fn player_line(&self, player: PlayerId) -> String {
        let (id, position, args) = match *self {
            Entity::Ship(s) => (
                s.id,
                s.position,
                [
                    s.orientation as i32,
                    s.speed,
                    s.health,
                    (s.owner == player) as i32,
                ],
            ),
            Entity::Barrel(b) => (b.id, b.position, [b.health, 0, 0, 0]),
            Entity::Mine(m) => (m.id, m.position, [0; 4]),
            Entity::Cannonball(c) => (
                c.id,
                c.position,
                [c.owner_id as i32, c.remaining_turns, 0, 0],
            ),
        };
        format!(
            "{} {} {} {} {} {} {} {}",
            id,
            self.kind().as_str(),
            position.x,
            position.y,
            args[0],
            args[1],
            args[2],
            args[3]
        )
    }
}

impl GameState {
    /// Mines within sight of any of the player's ships, sunk ones included
    pub fn visible_mines(&self, player: PlayerId) -> impl Iterator<Item = &Mine> {
        let lookouts: Vec<Coord> = self
            .player_ships(player)
            .iter()
            .map(|s| s.position)
            .collect();
        self.mines.iter().filter(move |m| {
            lookouts
                .iter()
                .any(|p| p.distance_to(m.position) <= MINE_VISIBILITY_RANGE)
        })
    }

    /// Round input for one player: live ship count, entity count, entities
    pub fn player_input_lines(&self, player: PlayerId) -> Vec<String> {
        let own = self.ships_alive(player).map(Entity::Ship);
        let others = self
            .ships
            .iter()
            .filter(|s| s.owner != player)
            .map(Entity::Ship);

        let entities: Vec<Entity> = own
            .chain(others)
            .chain(self.visible_mines(player).map(Entity::Mine))
            .chain(self.cannonballs.iter().map(Entity::Cannonball))
            .chain(self.barrels.iter().map(Entity::Barrel))
            .collect();

        let mut lines = Vec::with_capacity(entities.len() + 2);
        lines.push(self.ships_alive(player).count().to_string());
        lines.push(entities.len().to_string());
        lines.extend(entities.iter().map(|e| e.player_line(player)));
        lines
    }

    /// Header sent to the viewer once
    pub fn init_view_lines(&self) -> Vec<String> {
        vec![format!(
            "{} {} {} {}",
            MAP_WIDTH, MAP_HEIGHT, self.ships_per_player, MINE_VISIBILITY_RANGE
        )]
    }

    /// Full frame for the viewer
    pub fn frame_view_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for player in 0..self.player_count {
            lines.push(player.to_string());
            for ship in self.player_ships(player) {
                lines.push(ship_view_line(ship));
            }
        }

        lines.push(self.cannonballs.len().to_string());
        lines.extend(self.cannonballs.iter().map(|c| {
            format!(
                "{} {} {} {} {} {} {} {}",
                c.id,
                c.position.y,
                c.position.x,
                c.origin.y,
                c.origin.x,
                c.initial_remaining_turns,
                c.remaining_turns,
                c.owner_id
            )
        }));

        lines.push(self.mines.len().to_string());
        lines.extend(
            self.mines
                .iter()
                .map(|m| format!("{} {} {}", m.id, m.position.y, m.position.x)),
        );

        lines.push(self.barrels.len().to_string());
        lines.extend(self.barrels.iter().map(|b| {
            format!("{} {} {} {}", b.id, b.position.y, b.position.x, b.health)
        }));

        lines.push(self.damage.len().to_string());
        lines.extend(self.damage.iter().map(|d| {
            format!(
                "{} {} {} {}",
                d.position.y, d.position.x, d.amount, d.hit as i32
            )
        }));

        lines
    }
}

/// The message field is set off by two spaces
fn ship_view_line(ship: &Ship) -> String {
    let bow = ship.bow();
    let stern = ship.stern();
    format!(
        "{} {} {} {} {} {} {} {} {} {} {}  ;{}",
        ship.id,
        ship.position.y,
        ship.position.x,
        ship.orientation,
        ship.health,
        ship.speed,
        ship.action.as_str(),
        bow.y,
        bow.x,
        stern.y,
        stern.x,
        ship.message.as_deref().unwrap_or("")
    )
}

/// One ship as the viewer draws it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub id: u32,
    pub position: Coord,
    pub orientation: u8,
    pub health: i32,
    pub speed: i32,
    pub action: String,
    pub bow: Coord,
    pub stern: Coord,
    pub message: Option<String>,
}

impl From<&Ship> for ShipView {
    fn from(ship: &Ship) -> Self {
        Self {
            id: ship.id,
            position: ship.position,
            orientation: ship.orientation,
            health: ship.health,
            speed: ship.speed,
            action: ship.action.as_str().to_string(),
            bow: ship.bow(),
            stern: ship.stern(),
            message: ship.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetView {
    pub player: PlayerId,
    pub score: i32,
    pub ships: Vec<ShipView>,
}

/// Everything the viewer needs for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub round: u32,
    pub fleets: Vec<FleetView>,
    pub cannonballs: Vec<Cannonball>,
    pub mines: Vec<Mine>,
    pub barrels: Vec<RumBarrel>,
    pub damage: Vec<Damage>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let fleets = (0..state.player_count)
            .map(|player| FleetView {
                player,
                score: state.score(player),
                ships: state
                    .player_ships(player)
                    .into_iter()
                    .map(ShipView::from)
                    .collect(),
            })
            .collect();

        Self {
            round: state.round,
            fleets,
            cannonballs: state.cannonballs.clone(),
            mines: state.mines.clone(),
            barrels: state.barrels.clone(),
            damage: state.damage.clone(),
        }
    }
}
