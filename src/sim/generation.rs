//! World generation
//!
//! Lays out a map mirrored about the horizontal midline: every ship, mine and
//! barrel in the top half has a twin in the bottom half, so neither player
//! starts with an advantage.

use super::hex::Coord;
use super::rng::MatchRng;
use super::state::GameState;
use crate::clamp;
use crate::config::MatchConfig;
use crate::consts::*;

/// Generate the starting state for a match
pub fn generate(config: &MatchConfig) -> GameState {
    let seed = config.resolve_seed();
    let rules = config.ruleset();
    let mut rng = MatchRng::new(seed);

    // Counts are always drawn, so an override never shifts the layout
    let drawn = rng.next_int(1 + rules.max_ships - MIN_SHIPS) + MIN_SHIPS;
    let ships_per_player = clamp(
        config.ships_per_player.unwrap_or(drawn),
        MIN_SHIPS,
        rules.max_ships,
    );

    let mine_count = if rules.max_mines > rules.min_mines {
        let drawn = rng.next_int(rules.max_mines - rules.min_mines) + rules.min_mines;
        clamp(
            config.mine_count.unwrap_or(drawn),
            rules.min_mines,
            rules.max_mines,
        )
    } else {
        rules.min_mines
    };

    let drawn = rng.next_int(MAX_RUM_BARRELS - MIN_RUM_BARRELS) + MIN_RUM_BARRELS;
    let barrel_count = clamp(
        config.barrel_count.unwrap_or(drawn),
        MIN_RUM_BARRELS,
        MAX_RUM_BARRELS,
    );

    let mut state = GameState::new(seed, rules, PLAYER_COUNT);
    state.ships_per_player = ships_per_player;

    place_ships(&mut state, &mut rng, ships_per_player);
    place_mines(&mut state, &mut rng, mine_count);
    place_barrels(&mut state, &mut rng, barrel_count);

    state.mine_count = state.mines.len() as i32;
    state.barrel_count = barrel_count;

    log::info!(
        "Match seed {} ({}): {} ships per player, {} mines, {} barrels",
        seed,
        rules.league.as_str(),
        ships_per_player,
        state.mines.len(),
        state.barrels.len()
    );

    state
}

/// One ship per vertical band, player 1 mirroring player 0
fn place_ships(state: &mut GameState, rng: &mut MatchRng, per_player: i32) {
    for band in 0..per_player {
        let x_min = 1 + band * MAP_WIDTH / per_player;
        let x_max = (band + 1) * MAP_WIDTH / per_player - 2;

        let y = 1 + rng.next_int(MAP_HEIGHT / 2 - 2);
        let x = x_min + rng.next_int(1 + x_max - x_min);
        let orientation = rng.next_int(6) as u8;

        let position = Coord::new(x, y);
        state.spawn_ship(position, orientation, 0);
        state.spawn_ship(position.mirrored(), (6 - orientation) % 6, 1);
    }
}

/// Random cell in the top half, away from the border
fn sample_cell(rng: &mut MatchRng) -> Coord {
    let x = 1 + rng.next_int(MAP_WIDTH - 2);
    let y = 1 + rng.next_int(MAP_HEIGHT / 2);
    Coord::new(x, y)
}

fn cell_is_free(state: &GameState, cell: Coord) -> bool {
    !state.ship_covers(cell, None) && !state.mine_at(cell) && !state.barrel_at(cell)
}

/// Twin cells are pushed mirror first; the count may overshoot by one
fn place_mines(state: &mut GameState, rng: &mut MatchRng, count: i32) {
    while (state.mines.len() as i32) < count {
        let cell = sample_cell(rng);
        if !cell_is_free(state, cell) {
            continue;
        }
        let mirror = cell.mirrored();
        if mirror != cell {
            state.spawn_mine(mirror);
        }
        state.spawn_mine(cell);
    }
}

fn place_barrels(state: &mut GameState, rng: &mut MatchRng, count: i32) {
    while (state.barrels.len() as i32) < count {
        let cell = sample_cell(rng);
        let value =
            MIN_RUM_BARREL_VALUE + rng.next_int(1 + MAX_RUM_BARREL_VALUE - MIN_RUM_BARREL_VALUE);
        if !cell_is_free(state, cell) {
            continue;
        }
        let mirror = cell.mirrored();
        if mirror != cell {
            state.spawn_barrel(mirror, value);
        }
        state.spawn_barrel(cell, value);
    }
}
