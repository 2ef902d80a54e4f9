//! Round resolution
//!
//! Advances the match by one round once every player's orders are in. The
//! phase order is fixed and every loop runs in roster order, so replaying the
//! same orders from the same seed always lands on the same state.

use super::collision::{CollisionRule, PendingMove, resolve_collisions};
use super::hex::{Coord, opposite};
use super::state::{Action, Cannonball, Damage, GamePhase, GameState, Ship};
use crate::consts::*;

/// What the driver should do after a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    GameOver,
}

/// Heading the ship asks for this round
fn heading_after(ship: &Ship) -> u8 {
    match ship.action {
        Action::Port => (ship.orientation + 1) % 6,
        Action::Starboard => (ship.orientation + 5) % 6,
        _ => ship.orientation,
    }
}

impl GameState {
    /// Play out one round with the actions already set on each ship
    pub fn update_round(&mut self) -> TurnOutcome {
        if self.phase == GamePhase::GameOver {
            return TurnOutcome::GameOver;
        }

        self.move_cannonballs();
        self.decrement_rum();

        // Health before this round's damage caps the wreck's barrel
        let health_before: Vec<i32> = self.ships.iter().map(|s| s.health).collect();

        self.apply_actions();
        self.move_ships();
        self.rotate_ships();

        self.explode_ships();
        self.explode_mines();
        self.explode_barrels();

        self.drop_wreck_barrels(&health_before);

        for position in self.explosions.drain(..) {
            self.damage.push(Damage::miss(position));
        }

        self.remove_sunk_ships();
        self.round += 1;

        if self.game_is_over() {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over after {} rounds, scores {:?}",
                self.round,
                self.scores()
            );
            return TurnOutcome::GameOver;
        }

        TurnOutcome::Continue
    }

    /// Drop balls that landed last round, then advance the rest
    fn move_cannonballs(&mut self) {
        self.cannonballs.retain(|b| b.remaining_turns > 0);

        for ball in &mut self.cannonballs {
            ball.remaining_turns -= 1;
            if ball.remaining_turns == 0 {
                self.explosions.push(ball.position);
            }
        }
    }

    fn decrement_rum(&mut self) {
        for ship in &mut self.ships {
            ship.damage(1);
        }
    }

    fn apply_actions(&mut self) {
        for i in 0..self.ships.len() {
            let ship = &mut self.ships[i];
            if ship.mine_cooldown > 0 {
                ship.mine_cooldown -= 1;
            }
            if ship.cannon_cooldown > 0 {
                ship.cannon_cooldown -= 1;
            }

            let action = ship.action;
            match action {
                Action::Faster => {
                    if ship.speed < self.rules.max_ship_speed {
                        ship.speed += 1;
                    }
                }
                Action::Slower => {
                    if ship.speed > 0 {
                        ship.speed -= 1;
                    }
                }
                Action::Mine if ship.mine_cooldown == 0 => self.drop_mine(i),
                Action::Fire(target) if ship.cannon_cooldown == 0 => self.fire_cannon(i, target),
                // Turns are staged during rotation; weapons may still be cooling down
                _ => {}
            }
        }
    }

    /// Lay a mine one cell behind the stern if that cell is open water
    fn drop_mine(&mut self, index: usize) {
        let ship = &self.ships[index];
        let target = ship.stern().neighbor(opposite(ship.orientation));
        let id = ship.id;

        if !target.is_inside_map()
            || self.ship_covers(target, Some(id))
            || self.mine_at(target)
            || self.barrel_at(target)
        {
            return;
        }

        self.ships[index].mine_cooldown = COOLDOWN_MINE;
        self.spawn_mine(target);
        log::debug!("Round {}: ship {} drops a mine at {}", self.round, id, target);
    }

    /// Launch a ball from the bow; flight time grows with distance
    fn fire_cannon(&mut self, index: usize, target: Coord) {
        let ship = &self.ships[index];
        let origin = ship.bow();
        let owner_id = ship.id;
        let distance = origin.distance_to(target);

        if !target.is_inside_map() || distance > FIRE_DISTANCE_MAX {
            return;
        }

        let flight = 1 + (distance as f64 / 3.0).round() as i32;
        let id = self.next_entity_id();
        self.cannonballs.push(Cannonball {
            id,
            position: target,
            owner_id,
            origin,
            initial_remaining_turns: flight,
            remaining_turns: flight,
        });
        self.ships[index].cannon_cooldown = COOLDOWN_CANNON;
        log::debug!(
            "Round {}: ship {} fires at {} ({} turns)",
            self.round,
            owner_id,
            target,
            flight
        );
    }

    /// Advance one cell per speed step, all ships at once
    fn move_ships(&mut self) {
        for step in 1..=self.rules.max_ship_speed {
            let mut pending = Vec::with_capacity(self.ships.len());
            for ship in &mut self.ships {
                let mut next = PendingMove::current(ship);
                if step <= ship.speed {
                    let ahead = ship.bow();
                    if ahead.is_inside_map() {
                        next = PendingMove::new(ahead, ship.orientation);
                    } else {
                        ship.speed = 0;
                    }
                }
                pending.push(next);
            }

            let stopped = resolve_collisions(&mut self.ships, &mut pending, CollisionRule::Bow);
            if !stopped.is_empty() {
                log::debug!("Round {}: ships {:?} collided", self.round, stopped);
            }

            for (i, next) in pending.iter().enumerate() {
                self.ships[i].position = next.position;
                self.check_collisions(i);
            }
        }
    }

    fn rotate_ships(&mut self) {
        let mut pending: Vec<PendingMove> = self
            .ships
            .iter()
            .map(|s| PendingMove::new(s.position, heading_after(s)))
            .collect();

        let stopped = resolve_collisions(&mut self.ships, &mut pending, CollisionRule::Footprint);
        if !stopped.is_empty() {
            log::debug!("Round {}: ships {:?} blocked turning", self.round, stopped);
        }

        for (i, next) in pending.iter().enumerate() {
            if self.ships[i].is_dead() {
                continue;
            }
            self.ships[i].orientation = next.orientation;
            self.check_collisions(i);
        }
    }

    /// Pick up barrels under the ship, then set off any mine a ship touches
    fn check_collisions(&mut self, index: usize) {
        let ship = &self.ships[index];
        let (picked, left): (Vec<_>, Vec<_>) = std::mem::take(&mut self.barrels)
            .into_iter()
            .partition(|b| ship.at(b.position));
        self.barrels = left;
        for barrel in picked {
            self.ships[index].heal(barrel.health);
        }

        for mine in std::mem::take(&mut self.mines) {
            let events = mine.explode(&mut self.ships, false);
            if events.is_empty() {
                self.mines.push(mine);
            } else {
                log::debug!("Round {}: mine {} went off", self.round, mine.id);
                self.damage.extend(events);
            }
        }
    }

    /// Impacts on a ship: the first ship in roster order takes the hit
    fn explode_ships(&mut self) {
        let ships = &mut self.ships;
        let damage = &mut self.damage;
        self.explosions.retain(|&position| {
            let Some(ship) = ships.iter_mut().find(|s| s.at(position)) else {
                return true;
            };
            let amount = if position == ship.position {
                HIGH_DAMAGE
            } else {
                LOW_DAMAGE
            };
            damage.push(Damage::hit(position, amount));
            ship.damage(amount);
            false
        });
    }

    /// Impacts on a mine force it to go off
    fn explode_mines(&mut self) {
        let mut unresolved = Vec::new();
        for position in std::mem::take(&mut self.explosions) {
            match self.mines.iter().position(|m| m.position == position) {
                Some(index) => {
                    let mine = self.mines.remove(index);
                    let events = mine.explode(&mut self.ships, true);
                    self.damage.extend(events);
                }
                None => unresolved.push(position),
            }
        }
        self.explosions = unresolved;
    }

    fn explode_barrels(&mut self) {
        let mut unresolved = Vec::new();
        for position in std::mem::take(&mut self.explosions) {
            match self.barrels.iter().position(|b| b.position == position) {
                Some(index) => {
                    self.barrels.remove(index);
                    self.damage.push(Damage::hit(position, 0));
                }
                None => unresolved.push(position),
            }
        }
        self.explosions = unresolved;
    }

    /// Each ship sunk this round leaves rum behind, worth at most what it had
    fn drop_wreck_barrels(&mut self, health_before: &[i32]) {
        let wrecks: Vec<_> = self
            .ships
            .iter()
            .zip(health_before)
            .filter(|(ship, _)| ship.is_dead())
            .map(|(ship, &before)| (ship.id, ship.position, before.min(REWARD_RUM_BARREL_VALUE)))
            .collect();

        for (id, position, value) in wrecks {
            log::debug!("Round {}: ship {} sunk at {}", self.round, id, position);
            if value > 0 {
                self.spawn_barrel(position, value);
            }
        }
    }

    fn game_is_over(&self) -> bool {
        let fleet_lost = (0..self.player_count).any(|p| self.ships_alive(p).next().is_none());
        fleet_lost || self.rules.barrels_exhausted_ends_match && self.barrels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{League, MatchConfig, Ruleset};
    use crate::sim::generation::generate;

    /// Two-player board with no mines or barrels
    fn board() -> GameState {
        GameState::new(0, Ruleset::default(), 2)
    }

    fn incoming(state: &mut GameState, target: Coord, remaining_turns: i32) {
        let id = state.next_entity_id();
        state.cannonballs.push(Cannonball {
            id,
            position: target,
            owner_id: 99,
            origin: target,
            initial_remaining_turns: remaining_turns,
            remaining_turns,
        });
    }

    fn ship_mut(state: &mut GameState, id: u32) -> &mut Ship {
        state.ships.iter_mut().find(|s| s.id == id).unwrap()
    }

    #[test]
    fn test_rum_burns_every_round() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(5, 5), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        assert_eq!(state.update_round(), TurnOutcome::Continue);
        assert_eq!(state.ship(a).unwrap().health, INITIAL_SHIP_HEALTH - 1);
        assert_eq!(state.round, 1);
    }

    #[test]
    fn test_cannonball_flight_and_center_hit() {
        let mut state = board();
        let gunner = state.spawn_ship(Coord::new(5, 5), 0, 0);
        let target = state.spawn_ship(Coord::new(10, 5), 0, 1);

        // Bow (6,5) to (10,5): four cells, two rounds of flight
        ship_mut(&mut state, gunner).fire(Coord::new(10, 5), &Ruleset::default());
        state.update_round();
        assert_eq!(state.cannonballs.len(), 1);
        assert_eq!(state.cannonballs[0].remaining_turns, 2);
        assert_eq!(state.cannonballs[0].origin, Coord::new(6, 5));
        assert_eq!(state.ship(gunner).unwrap().cannon_cooldown, COOLDOWN_CANNON);

        state.prepare_round();
        state.update_round();
        assert_eq!(state.cannonballs[0].remaining_turns, 1);
        assert!(state.damage.is_empty());

        state.prepare_round();
        state.update_round();
        assert_eq!(state.damage, vec![Damage::hit(Coord::new(10, 5), HIGH_DAMAGE)]);
        assert_eq!(state.ship(target).unwrap().health, INITIAL_SHIP_HEALTH - 3 - HIGH_DAMAGE);
        assert_eq!(state.ship(gunner).unwrap().cannon_cooldown, 0);

        // Landed balls are cleared at the start of the next round
        state.prepare_round();
        state.update_round();
        assert!(state.cannonballs.is_empty());
    }

    #[test]
    fn test_fire_out_of_range_or_cooling_down_is_ignored() {
        let mut state = board();
        let gunner = state.spawn_ship(Coord::new(2, 5), 0, 0);
        state.spawn_ship(Coord::new(20, 15), 0, 1);

        ship_mut(&mut state, gunner).fire(Coord::new(20, 5), &Ruleset::default());
        state.update_round();
        assert!(state.cannonballs.is_empty());

        state.prepare_round();
        ship_mut(&mut state, gunner).cannon_cooldown = 2;
        ship_mut(&mut state, gunner).fire(Coord::new(6, 5), &Ruleset::default());
        state.update_round();
        assert!(state.cannonballs.is_empty());
    }

    #[test]
    fn test_bow_and_stern_hits_are_low_damage() {
        let mut state = board();
        let ship = state.spawn_ship(Coord::new(10, 5), 0, 0);
        state.spawn_ship(Coord::new(10, 15), 0, 1);
        incoming(&mut state, Coord::new(11, 5), 1);
        incoming(&mut state, Coord::new(9, 5), 1);
        state.update_round();
        assert_eq!(
            state.ship(ship).unwrap().health,
            INITIAL_SHIP_HEALTH - 1 - 2 * LOW_DAMAGE
        );
        assert_eq!(state.damage.len(), 2);
    }

    #[test]
    fn test_miss_mine_and_barrel_impacts() {
        let mut state = board();
        state.spawn_ship(Coord::new(2, 2), 0, 0);
        state.spawn_ship(Coord::new(2, 18), 0, 1);
        state.spawn_mine(Coord::new(12, 12));
        state.spawn_barrel(Coord::new(15, 8), 14);
        incoming(&mut state, Coord::new(12, 12), 1);
        incoming(&mut state, Coord::new(15, 8), 1);
        incoming(&mut state, Coord::new(6, 10), 1);

        state.update_round();
        assert!(state.mines.is_empty());
        assert!(state.barrels.is_empty());
        assert_eq!(
            state.damage,
            vec![
                Damage::hit(Coord::new(12, 12), MINE_DAMAGE),
                Damage::hit(Coord::new(15, 8), 0),
                Damage::miss(Coord::new(6, 10)),
            ]
        );
    }

    #[test]
    fn test_head_on_collision_stops_both() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(3, 4), 0, 0);
        let b = state.spawn_ship(Coord::new(7, 4), 3, 1);
        for ship in &mut state.ships {
            ship.speed = 1;
        }
        state.update_round();

        let a = state.ship(a).unwrap();
        let b = state.ship(b).unwrap();
        assert_eq!((a.position, a.speed), (Coord::new(3, 4), 0));
        assert_eq!((b.position, b.speed), (Coord::new(7, 4), 0));
    }

    #[test]
    fn test_speed_two_moves_two_cells_and_is_capped() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(5, 5), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        ship_mut(&mut state, a).speed = 2;
        ship_mut(&mut state, a).faster();
        state.update_round();
        let ship = state.ship(a).unwrap();
        assert_eq!(ship.speed, 2);
        assert_eq!(ship.position, Coord::new(7, 5));

        state.prepare_round();
        let ship = ship_mut(&mut state, a);
        ship.speed = 0;
        ship.slower();
        state.update_round();
        assert_eq!(state.ship(a).unwrap().speed, 0);
    }

    #[test]
    fn test_wood_leagues_cap_speed_at_one() {
        let mut state = GameState::new(0, Ruleset::from(League::Wood1), 2);
        let a = state.spawn_ship(Coord::new(5, 5), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        ship_mut(&mut state, a).speed = 1;
        ship_mut(&mut state, a).faster();
        state.update_round();
        assert_eq!(state.ship(a).unwrap().speed, 1);
        assert_eq!(state.ship(a).unwrap().position, Coord::new(6, 5));
    }

    #[test]
    fn test_map_edge_stops_ship() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(22, 5), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        ship_mut(&mut state, a).speed = 1;
        state.update_round();
        let ship = state.ship(a).unwrap();
        assert_eq!((ship.position, ship.speed), (Coord::new(22, 5), 0));
    }

    #[test]
    fn test_barrel_pickup_heals() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(5, 5), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        state.spawn_barrel(Coord::new(7, 5), 20);
        let ship = ship_mut(&mut state, a);
        ship.speed = 1;
        ship.health = 50;
        state.update_round();
        assert_eq!(state.ship(a).unwrap().health, 50 - 1 + 20);
        assert!(state.barrels.is_empty());
    }

    #[test]
    fn test_sailing_onto_mine() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(5, 5), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        state.spawn_mine(Coord::new(7, 5));
        ship_mut(&mut state, a).speed = 1;
        state.update_round();
        assert_eq!(state.ship(a).unwrap().health, INITIAL_SHIP_HEALTH - 1 - MINE_DAMAGE);
        assert!(state.mines.is_empty());
        assert_eq!(state.damage, vec![Damage::hit(Coord::new(7, 5), MINE_DAMAGE)]);
    }

    #[test]
    fn test_mine_dropped_behind_stern_with_cooldown() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(5, 5), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        ship_mut(&mut state, a).place_mine(&Ruleset::default());
        state.update_round();
        assert_eq!(state.mines.len(), 1);
        assert_eq!(state.mines[0].position, Coord::new(3, 5));
        assert_eq!(state.ship(a).unwrap().mine_cooldown, COOLDOWN_MINE);

        state.prepare_round();
        ship_mut(&mut state, a).place_mine(&Ruleset::default());
        state.update_round();
        assert_eq!(state.mines.len(), 1);
        assert_eq!(state.ship(a).unwrap().mine_cooldown, COOLDOWN_MINE - 1);
    }

    #[test]
    fn test_mine_not_dropped_on_barrel() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(5, 5), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        state.spawn_barrel(Coord::new(3, 5), 12);
        ship_mut(&mut state, a).place_mine(&Ruleset::default());
        state.update_round();
        assert!(state.mines.is_empty());
        assert_eq!(state.ship(a).unwrap().mine_cooldown, 0);
    }

    #[test]
    fn test_rotation() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(10, 10), 0, 0);
        state.spawn_ship(Coord::new(5, 15), 0, 1);
        ship_mut(&mut state, a).port();
        state.update_round();
        assert_eq!(state.ship(a).unwrap().orientation, 1);

        state.prepare_round();
        ship_mut(&mut state, a).starboard();
        state.update_round();
        state.prepare_round();
        ship_mut(&mut state, a).starboard();
        state.update_round();
        assert_eq!(state.ship(a).unwrap().orientation, 5);
    }

    #[test]
    fn test_blocked_rotation_rolls_back() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(5, 5), 0, 0);
        let b = state.spawn_ship(Coord::new(7, 4), 3, 1);
        // Turning to port would swing a's bow onto b's bow at (6,4)
        ship_mut(&mut state, a).port();
        state.update_round();
        assert_eq!(state.ship(a).unwrap().orientation, 0);
        assert_eq!(state.ship(b).unwrap().orientation, 3);
    }

    #[test]
    fn test_blocked_rotation_stops_the_ship() {
        let mut state = board();
        let a = state.spawn_ship(Coord::new(4, 5), 0, 0);
        state.spawn_ship(Coord::new(7, 4), 3, 1);
        // Sails to (5,5), then the port turn would put the bow on (6,4)
        ship_mut(&mut state, a).speed = 1;
        ship_mut(&mut state, a).port();
        state.update_round();
        let ship = state.ship(a).unwrap();
        assert_eq!(ship.position, Coord::new(5, 5));
        assert_eq!(ship.orientation, 0);
        assert_eq!(ship.speed, 0);
    }

    #[test]
    fn test_impact_hits_first_ship_in_roster_only() {
        let mut state = board();
        // Overlapping hulls: (10,5) is a's bow and b's center
        let a = state.spawn_ship(Coord::new(9, 5), 0, 0);
        let b = state.spawn_ship(Coord::new(10, 5), 0, 1);
        incoming(&mut state, Coord::new(10, 5), 1);
        state.update_round();

        assert_eq!(state.damage, vec![Damage::hit(Coord::new(10, 5), LOW_DAMAGE)]);
        assert_eq!(state.ship(a).unwrap().health, INITIAL_SHIP_HEALTH - 1 - LOW_DAMAGE);
        assert_eq!(state.ship(b).unwrap().health, INITIAL_SHIP_HEALTH - 1);
    }

    #[test]
    fn test_sink_rewards_capped_by_health_before_damage() {
        for (health, reward) in [(46, Some(30)), (6, Some(5)), (1, None)] {
            let mut state = board();
            state.spawn_ship(Coord::new(2, 2), 0, 0);
            let victim = state.spawn_ship(Coord::new(10, 10), 0, 1);
            state.spawn_ship(Coord::new(2, 18), 0, 1);
            ship_mut(&mut state, victim).health = health;
            incoming(&mut state, Coord::new(10, 10), 1);

            assert_eq!(state.update_round(), TurnOutcome::Continue);
            assert!(state.ships_alive(1).all(|s| s.id != victim));
            assert_eq!(state.player_ships(1).len(), 2);
            let barrels: Vec<i32> = state.barrels.iter().map(|b| b.health).collect();
            match reward {
                Some(value) => {
                    assert_eq!(barrels, vec![value]);
                    assert_eq!(state.barrels[0].position, Coord::new(10, 10));
                }
                None => assert!(barrels.is_empty()),
            }
        }
    }

    #[test]
    fn test_game_over_when_a_fleet_is_gone() {
        let mut state = board();
        state.spawn_ship(Coord::new(2, 2), 0, 0);
        state.spawn_ship(Coord::new(2, 18), 0, 1);
        state.set_player_dead(1);
        assert_eq!(state.update_round(), TurnOutcome::GameOver);
        assert_eq!(state.phase, GamePhase::GameOver);
        // A fleet sunk by forfeit leaves no rum behind
        assert!(state.barrels.is_empty());
        assert_eq!(state.scores(), vec![INITIAL_SHIP_HEALTH - 1, 0]);

        let round = state.round;
        assert_eq!(state.update_round(), TurnOutcome::GameOver);
        assert_eq!(state.round, round);
    }

    #[test]
    fn test_barrel_exhaustion_policy() {
        let mut state = GameState::new(0, Ruleset::from(League::Wood3), 2);
        state.spawn_ship(Coord::new(2, 2), 0, 0);
        state.spawn_ship(Coord::new(2, 18), 0, 1);
        assert_eq!(state.update_round(), TurnOutcome::GameOver);

        let mut state = board();
        state.spawn_ship(Coord::new(2, 2), 0, 0);
        state.spawn_ship(Coord::new(2, 18), 0, 1);
        assert_eq!(state.update_round(), TurnOutcome::Continue);
    }

    #[test]
    fn test_prepare_round_is_idempotent() {
        let mut state = generate(&MatchConfig::with_seed(17));
        for ship in &mut state.ships {
            ship.faster();
            ship.set_message(Some("yo ho"));
        }
        state.update_round();

        state.prepare_round();
        let once = serde_json::to_value(&state).unwrap();
        state.prepare_round();
        let twice = serde_json::to_value(&state).unwrap();
        assert_eq!(once, twice);
        assert!(state.ships.iter().all(|s| s.action == Action::Wait && s.message.is_none()));
        assert!(state.damage.is_empty());
        assert!(state.ships.iter().all(|s| s.speed <= 1));
    }

    #[test]
    fn test_replay_is_deterministic() {
        fn play(seed: i64) -> serde_json::Value {
            let mut state = generate(&MatchConfig::with_seed(seed));
            let center = Coord::map_center();
            for _ in 0..40 {
                state.prepare_round();
                for ship in &mut state.ships {
                    if ship.id % 3 == 0 && ship.cannon_cooldown == 0 {
                        ship.fire(center, &Ruleset::default());
                    } else {
                        ship.move_to(center);
                    }
                }
                if state.update_round() == TurnOutcome::GameOver {
                    break;
                }
            }
            serde_json::to_value(&state).unwrap()
        }

        assert_eq!(play(2024), play(2024));
    }

    #[test]
    fn test_health_and_speed_stay_in_bounds() {
        let mut state = generate(&MatchConfig::with_seed(8));
        for round in 0..60 {
            state.prepare_round();
            for ship in &mut state.ships {
                match (ship.id + round) % 4 {
                    0 => ship.faster(),
                    1 => ship.place_mine(&Ruleset::default()),
                    2 => ship.fire(Coord::map_center(), &Ruleset::default()),
                    _ => ship.port(),
                }
            }
            let outcome = state.update_round();
            for ship in state.ships.iter().chain(&state.sunk) {
                assert!((0..=MAX_SHIP_HEALTH).contains(&ship.health));
                assert!((0..=state.rules.max_ship_speed).contains(&ship.speed));
                assert!(ship.mine_cooldown >= 0 && ship.cannon_cooldown >= 0);
            }
            if outcome == TurnOutcome::GameOver {
                break;
            }
        }
    }
}
