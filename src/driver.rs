//! In-process match loop
//!
//! Bots see exactly what a remote player would: the round's input lines in,
//! one command line per live ship out.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{League, MatchConfig, ResolvedConfig};
use crate::consts::*;
use crate::sim::{Coord, EntityId, EntityKind, PlayerId, TurnOutcome, generate};

/// A player driven from inside the process
pub trait Bot {
    fn name(&self) -> &str;

    /// Answer one round of input with one command per live ship
    fn play(&mut self, player: PlayerId, input: &[String]) -> Vec<String>;
}

/// Result of a finished match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub config: ResolvedConfig,
    pub league: League,
    pub bots: Vec<String>,
    pub rounds: u32,
    pub scores: Vec<i32>,
    pub winner: Option<PlayerId>,
    /// Players whose output was rejected
    pub forfeits: Vec<PlayerId>,
}

/// Play a full match between `bots`, player 0 first
pub fn run_match(config: &MatchConfig, bots: &mut [Box<dyn Bot>; PLAYER_COUNT]) -> MatchSummary {
    let mut state = generate(config);
    let mut forfeits = Vec::new();

    while state.round < MAX_ROUNDS {
        state.prepare_round();

        for (player, bot) in bots.iter_mut().enumerate() {
            if state.ships_alive(player).next().is_none() {
                continue;
            }
            let input = state.player_input_lines(player);
            let output = bot.play(player, &input);
            if state.handle_player_output(player, &output).is_err() {
                forfeits.push(player);
            }
        }

        if state.update_round() == TurnOutcome::GameOver {
            break;
        }
    }

    let summary = MatchSummary {
        config: state.configuration(),
        league: state.rules.league,
        bots: bots.iter().map(|b| b.name().to_string()).collect(),
        rounds: state.round,
        scores: state.scores(),
        winner: state.winner(),
        forfeits,
    };

    match summary.winner {
        Some(player) => log::info!(
            "{} (player {}) wins after {} rounds, scores {:?}",
            summary.bots[player],
            player,
            summary.rounds,
            summary.scores
        ),
        None => log::info!(
            "Draw after {} rounds, scores {:?}",
            summary.rounds,
            summary.scores
        ),
    }

    summary
}

/// One entity line from the round input
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sighting {
    id: EntityId,
    kind: EntityKind,
    position: Coord,
    args: [i32; 4],
}

impl Sighting {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let id = parts.next()?.parse().ok()?;
        let kind = EntityKind::from_str(parts.next()?)?;
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        let mut args = [0; 4];
        for arg in &mut args {
            *arg = parts.next()?.parse().ok()?;
        }
        Some(Self {
            id,
            kind,
            position: Coord::new(x, y),
            args,
        })
    }

    fn is_ship(&self) -> bool {
        self.kind == EntityKind::Ship
    }

    fn is_own_ship(&self) -> bool {
        self.is_ship() && self.args[3] == 1
    }

    /// Where a ship will be next round if it holds course
    fn lead(&self) -> Coord {
        let (orientation, speed) = (self.args[0] as u8, self.args[1]);
        (0..speed).fold(self.position, |at, _| at.neighbor(orientation))
    }
}

/// Collects rum and shoots at whatever comes in range
#[derive(Debug, Default)]
pub struct RumHunter {
    round: u32,
    last_shot: HashMap<EntityId, u32>,
}

impl RumHunter {
    /// Range at which the hunter opens fire, center to center
    const FIRE_RANGE: i32 = 7;

    fn command(&mut self, ship: &Sighting, sightings: &[Sighting]) -> String {
        let nearest = |kind: EntityKind, own: bool| {
            sightings
                .iter()
                .filter(|s| s.kind == kind && s.is_own_ship() == own)
                .min_by_key(|s| ship.position.distance_to(s.position))
        };

        let reloaded = self
            .last_shot
            .get(&ship.id)
            .is_none_or(|&shot| self.round >= shot + COOLDOWN_CANNON as u32);

        if let Some(enemy) = nearest(EntityKind::Ship, false) {
            let target = enemy.lead();
            if reloaded
                && target.is_inside_map()
                && ship.position.distance_to(target) <= Self::FIRE_RANGE
            {
                self.last_shot.insert(ship.id, self.round);
                return format!("FIRE {} {}", target.x, target.y);
            }
        }

        let goal = nearest(EntityKind::Barrel, false).or_else(|| nearest(EntityKind::Ship, false));
        match goal {
            Some(goal) => format!("MOVE {} {}", goal.position.x, goal.position.y),
            None => "WAIT".to_string(),
        }
    }
}

impl Bot for RumHunter {
    fn name(&self) -> &str {
        "RumHunter"
    }

    fn play(&mut self, _player: PlayerId, input: &[String]) -> Vec<String> {
        let sightings: Vec<Sighting> = input
            .iter()
            .skip(2)
            .filter_map(|line| Sighting::parse(line))
            .collect();
        let own: Vec<Sighting> = sightings.iter().copied().filter(Sighting::is_own_ship).collect();

        let commands = own.iter().map(|ship| self.command(ship, &sightings)).collect();
        self.round += 1;
        commands
    }
}
