//! Ship collision and mine detonation
//!
//! Movement and rotation are staged for every ship before any of them is
//! committed. A staged move that runs into another ship's staged footprint is
//! discarded and the ship stops; this repeats until nothing collides, so two
//! ships heading for the same cell both stay put.

use super::hex::{Coord, opposite};
use super::state::{Damage, Mine, Ship};
use crate::consts::{MINE_DAMAGE, NEAR_MINE_DAMAGE};

/// Tentative footprint for one ship during a movement or rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub position: Coord,
    pub orientation: u8,
    pub bow: Coord,
    pub stern: Coord,
}

impl PendingMove {
    pub fn new(position: Coord, orientation: u8) -> Self {
        Self {
            position,
            orientation,
            bow: position.neighbor(orientation),
            stern: position.neighbor(opposite(orientation)),
        }
    }

    /// The ship as it stands now
    pub fn current(ship: &Ship) -> Self {
        Self::new(ship.position, ship.orientation)
    }

    fn cells(&self) -> [Coord; 3] {
        [self.bow, self.position, self.stern]
    }

    fn covers(&self, coord: Coord) -> bool {
        self.cells().contains(&coord)
    }

    /// Our bow runs into any part of `other`
    pub fn bow_intersects(&self, other: &PendingMove) -> bool {
        other.covers(self.bow)
    }

    /// Any part of us overlaps any part of `other`
    pub fn intersects(&self, other: &PendingMove) -> bool {
        self.cells().iter().any(|c| other.covers(*c))
    }
}

/// How two staged footprints are tested against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRule {
    /// Moving forward: only the bow can ram
    Bow,
    /// Rotating: the whole footprint sweeps
    Footprint,
}

impl CollisionRule {
    fn test(self, a: &PendingMove, b: &PendingMove) -> bool {
        match self {
            CollisionRule::Bow => a.bow_intersects(b),
            CollisionRule::Footprint => a.intersects(b),
        }
    }
}

/// Roll back colliding staged moves until none collide.
///
/// `pending[i]` is the staged footprint for `ships[i]`. Every ship caught in
/// a pass goes back to where it stands and loses its speed. Returns the IDs of
/// ships that were rolled back, in roll-back order.
pub fn resolve_collisions(
    ships: &mut [Ship],
    pending: &mut [PendingMove],
    rule: CollisionRule,
) -> Vec<u32> {
    debug_assert_eq!(ships.len(), pending.len());
    let mut rolled_back = Vec::new();

    loop {
        let colliding: Vec<usize> = (0..pending.len())
            .filter(|&i| {
                (0..pending.len()).any(|j| i != j && rule.test(&pending[i], &pending[j]))
            })
            .collect();

        if colliding.is_empty() {
            return rolled_back;
        }

        for i in colliding {
            pending[i] = PendingMove::current(&ships[i]);
            ships[i].speed = 0;
            rolled_back.push(ships[i].id);
        }
    }
}

impl Mine {
    /// Detonate against `ships` (the live roster).
    ///
    /// Without `force` the mine only goes off if a ship sits on it. Every ship
    /// on the mine takes full damage; the last one found counts as the
    /// victim, and every other ship with a cell next to the mine takes splash
    /// damage once. Returns the damage events; an empty list means the mine
    /// did not go off. The caller removes the mine.
    pub fn explode(&self, ships: &mut [Ship], force: bool) -> Vec<Damage> {
        let mut damage = Vec::new();
        let mut victim: Option<usize> = None;

        for (i, ship) in ships.iter_mut().enumerate() {
            if ship.at(self.position) {
                damage.push(Damage::hit(self.position, MINE_DAMAGE));
                ship.damage(MINE_DAMAGE);
                victim = Some(i);
            }
        }

        if !force && victim.is_none() {
            return damage;
        }

        if victim.is_none() {
            damage.push(Damage::hit(self.position, MINE_DAMAGE));
        }

        for (i, ship) in ships.iter_mut().enumerate() {
            if Some(i) == victim {
                continue;
            }
            // Center over bow over stern when more than one cell is in reach
            let impact = [ship.position, ship.bow(), ship.stern()]
                .into_iter()
                .find(|cell| cell.distance_to(self.position) <= 1);
            if let Some(impact) = impact {
                ship.damage(NEAR_MINE_DAMAGE);
                damage.push(Damage::hit(impact, NEAR_MINE_DAMAGE));
            }
        }

        damage
    }
}
