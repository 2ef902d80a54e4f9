//! Player command decoding
//!
//! Each live ship gets exactly one line per round:
//!
//! ```text
//! MOVE x y [message]    FIRE x y [message]
//! FASTER | SLOWER | PORT | STARBOARD | MINE | WAIT [message]
//! ```
//!
//! Keywords are case-insensitive. Anything after the arguments is a display
//! message for the viewer.

use thiserror::Error;

use crate::config::Ruleset;
use crate::sim::{Coord, GameState, PlayerId, Ship};

/// Longest coordinate argument accepted, in digits
const MAX_COORDINATE_DIGITS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("invalid action: {line:?}")]
    UnknownCommand { line: String },
    #[error("invalid coordinate {value:?} in {line:?}")]
    BadCoordinate { line: String, value: String },
    #[error("expected {expected} lines of output, got {got}")]
    LineCount { expected: usize, got: usize },
}

/// Decoded order for one ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Coord),
    Faster,
    Slower,
    Port,
    Starboard,
    Fire(Coord),
    Mine,
    Wait,
}

/// A command plus its optional display message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipOrder {
    pub command: Command,
    pub message: Option<String>,
}

impl ShipOrder {
    /// Set the ship's action for this round. Weapons the league has not
    /// unlocked are ignored.
    pub fn apply_to(&self, ship: &mut Ship, rules: &Ruleset) {
        ship.set_message(self.message.as_deref());
        match self.command {
            Command::Move(target) => ship.move_to(target),
            Command::Faster => ship.faster(),
            Command::Slower => ship.slower(),
            Command::Port => ship.port(),
            Command::Starboard => ship.starboard(),
            Command::Fire(target) => ship.fire(target, rules),
            Command::Mine => ship.place_mine(rules),
            Command::Wait => {}
        }
    }
}

/// Split off the first whitespace-delimited word
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}

fn parse_coordinate(line: &str, value: &str) -> Result<i32, CommandError> {
    let valid = !value.is_empty()
        && value.len() <= MAX_COORDINATE_DIGITS
        && value.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(CommandError::BadCoordinate {
            line: line.to_string(),
            value: value.to_string(),
        });
    }
    // At most 8 digits always fits
    value.parse().map_err(|_| CommandError::BadCoordinate {
        line: line.to_string(),
        value: value.to_string(),
    })
}

/// Decode one line of player output
pub fn parse_command(line: &str) -> Result<ShipOrder, CommandError> {
    let (keyword, rest) = split_word(line);

    let (command, message) = match keyword.to_ascii_uppercase().as_str() {
        "MOVE" | "FIRE" => {
            let (x, rest) = split_word(rest);
            let (y, rest) = split_word(rest);
            let target = Coord::new(parse_coordinate(line, x)?, parse_coordinate(line, y)?);
            let command = if keyword.eq_ignore_ascii_case("MOVE") {
                Command::Move(target)
            } else {
                Command::Fire(target)
            };
            (command, rest)
        }
        "FASTER" => (Command::Faster, rest),
        "SLOWER" => (Command::Slower, rest),
        "PORT" => (Command::Port, rest),
        "STARBOARD" => (Command::Starboard, rest),
        "MINE" => (Command::Mine, rest),
        "WAIT" => (Command::Wait, rest),
        _ => {
            return Err(CommandError::UnknownCommand {
                line: line.to_string(),
            });
        }
    };

    let message = message.trim_end();
    Ok(ShipOrder {
        command,
        message: (!message.is_empty()).then(|| message.to_string()),
    })
}

impl GameState {
    /// Apply one round of output from a player, one line per live ship in
    /// roster order. Any bad line forfeits the player's whole fleet.
    pub fn handle_player_output<S: AsRef<str>>(
        &mut self,
        player: PlayerId,
        lines: &[S],
    ) -> Result<(), CommandError> {
        let result = self.apply_orders(player, lines);
        if let Err(err) = &result {
            log::warn!("Player {} forfeits: {}", player, err);
            self.set_player_dead(player);
        }
        result
    }

    fn apply_orders<S: AsRef<str>>(
        &mut self,
        player: PlayerId,
        lines: &[S],
    ) -> Result<(), CommandError> {
        let expected = self.ships_alive(player).count();
        if lines.len() != expected {
            return Err(CommandError::LineCount {
                expected,
                got: lines.len(),
            });
        }

        let orders = lines
            .iter()
            .map(|line| parse_command(line.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let rules = self.rules;
        let fleet = self.ships.iter_mut().filter(|s| s.owner == player);
        for (ship, order) in fleet.zip(&orders) {
            order.apply_to(ship, &rules);
        }
        Ok(())
    }
}
