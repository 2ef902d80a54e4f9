//! MOVE command steering
//!
//! Turns "go to (x, y)" into one of the discrete per-round actions. This is a
//! greedy heuristic, not pathfinding, and its tie-breaks are part of the game:
//! two referees must pick the same action for the same state.

use super::hex::Coord;
use super::state::Action;

/// Angular gaps (in sixths of a turn) between a bearing and the three
/// headings reachable this round
#[derive(Debug, Clone, Copy)]
struct Headings {
    straight: f64,
    port: f64,
    starboard: f64,
}

impl Headings {
    fn toward(orientation: u8, bearing: f64) -> Self {
        let o = orientation as f64;
        Self {
            straight: (o - bearing).abs().min(6.0 - (o - bearing).abs()),
            port: ((o + 1.0) - bearing).abs().min(((o - 5.0) - bearing).abs()),
            starboard: ((o + 5.0) - bearing).abs().min(((o - 1.0) - bearing).abs()),
        }
    }
}

/// Pick the action that brings a ship at `position` closer to `target`
pub fn steer(position: Coord, orientation: u8, speed: i32, target: Coord) -> Action {
    if position == target {
        return Action::Slower;
    }

    match speed {
        0 => steer_from_standstill(position, orientation, target),
        1 => steer_underway(position, orientation, target),
        _ => Action::Slower,
    }
}

/// Stopped: rotate toward the target, or get going if already facing it
fn steer_from_standstill(position: Coord, orientation: u8, target: Coord) -> Action {
    let to_target = Headings::toward(orientation, position.angle(target));
    let to_center = Headings::toward(orientation, position.angle(Coord::map_center()));

    let mut action = Action::Wait;

    if to_target.port <= to_target.starboard {
        action = Action::Port;
    }

    if to_target.starboard < to_target.port
        || to_target.starboard == to_target.port && to_center.starboard < to_center.port
        || to_target.starboard == to_target.port
            && to_center.starboard == to_center.port
            && (orientation == 1 || orientation == 4)
    {
        action = Action::Starboard;
    }

    let forward = position.neighbor(orientation);
    if forward.is_inside_map()
        && to_target.straight <= to_target.port
        && to_target.straight <= to_target.starboard
    {
        action = Action::Faster;
    }

    action
}

/// Moving at speed 1: reason from the cell we will reach this round
fn steer_underway(position: Coord, orientation: u8, target: Coord) -> Action {
    let ahead = position.neighbor(orientation);
    if !ahead.is_inside_map() {
        return Action::Slower;
    }

    // Arriving next round
    if ahead == target {
        return Action::Wait;
    }

    let to_target = Headings::toward(orientation, ahead.angle(target));
    let to_center = Headings::toward(orientation, ahead.angle(Coord::map_center()));

    // Next to the target at a bad angle: stop and turn rather than circle it
    if ahead.distance_to(target) == 1 && to_target.straight > 1.5 {
        return Action::Slower;
    }

    let mut best: Option<i32> = None;
    let mut action = Action::Wait;

    let forward = ahead.neighbor(orientation);
    if forward.is_inside_map() {
        best = Some(forward.distance_to(target));
        action = Action::Wait;
    }

    let port = ahead.neighbor((orientation + 1) % 6);
    if port.is_inside_map() {
        let distance = port.distance_to(target);
        let better = match best {
            None => true,
            Some(min) => {
                distance < min
                    || distance == min && to_target.port < to_target.straight - 0.5
            }
        };
        if better {
            best = Some(distance);
            action = Action::Port;
        }
    }

    let starboard = ahead.neighbor((orientation + 5) % 6);
    if starboard.is_inside_map() {
        let distance = starboard.distance_to(target);
        let porting = action == Action::Port;
        let holding = action == Action::Wait;
        let better = match best {
            None => true,
            Some(min) => {
                distance < min
                    || distance == min
                        && porting
                        && to_target.starboard < to_target.port - 0.5
                    || distance == min
                        && holding
                        && to_target.starboard < to_target.straight - 0.5
                    || distance == min
                        && porting
                        && to_target.starboard == to_target.port
                        && to_center.starboard < to_center.port
                    || distance == min
                        && porting
                        && to_target.starboard == to_target.port
                        && to_center.starboard == to_center.port
                        && (orientation == 1 || orientation == 4)
            }
        };
        if better {
            action = Action::Starboard;
        }
    }

    action
}
