#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic two-turn forward model of a single ship.
//!
//! Given a ship and the controls of a candidate command, the lookahead moves
//! the ship through the command's turn and one further turn of waiting,
//! applying map-edge clipping, cannon and mine damage and barrel pickups, and
//! reduces the outcome to a [`Projection`] the helm can rank.

use rum_fleet_core::{
    Controls, Cube, Direction, Entity, Hull, Rules, Ship, TurnSnapshot, MAX_SPEED, RUM_PER_TURN,
};
use rum_fleet_system_hazards::HazardIndex;

/// Outcome of sailing a candidate command for two turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Projection {
    /// Net rum change: fuel, cannon and mine damage, barrel pickups.
    pub rum_delta: i32,
    /// How close the ship ends up to what it is chasing.
    pub targeting: Targeting,
    /// How far the ship ends up from what it should stay away from.
    pub avoiding: Avoidance,
    /// Speed the ship sails at after both turns.
    pub speed: i32,
    /// Cannon and mine damage taken over both turns, before any pickups.
    pub damage: i32,
}

/// Negated distances from the final bow to the ship's targets; higher is closer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Targeting {
    /// Negated distance to the closest barrel.
    pub barrel: i32,
    /// Negated distance to the toughest enemy ship.
    pub enemy: i32,
}

/// Distances from the final bow to nearby dangers; higher is safer.
///
/// Each field saturates at the rules' not-found value once the danger is
/// beyond its check distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Avoidance {
    /// Distance to the nearest map edge.
    pub edge: i32,
    /// Distance to the nearest mine.
    pub mine: i32,
    /// Distance to the nearest enemy ship.
    pub enemy: i32,
}

/// Two-turn simulator that reuses its scratch buffer between predictions.
#[derive(Debug, Default)]
pub struct Lookahead {
    visited: Vec<Cube>,
}

impl Lookahead {
    /// Creates a lookahead with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects `ship` two turns ahead under `controls`.
    ///
    /// The first turn applies the controls: the throttle changes speed before
    /// moving and the rudder rotates the ship after it moved. The second turn
    /// assumes the ship waits. Cannonballs are matched against the hull on the
    /// turn they land, while mines and barrels count once for every distinct
    /// cell the hull covered on either turn.
    pub fn predict(
        &mut self,
        ship: &Ship,
        controls: Controls,
        snapshot: &TurnSnapshot,
        rules: &Rules,
    ) -> Projection {
        let hazards = HazardIndex::new(snapshot, rules);
        self.visited.clear();

        let mut damage = 0;
        let speed = (ship.speed + controls.throttle).clamp(0, MAX_SPEED);
        let first = advance(ship.cube(), ship.orientation, speed, rules);
        let heading = ship.orientation.rotated(controls.turn);
        let hull = Hull::at(first.location, heading);
        damage += hazards.cannon_impact_damage(&hull, 1);
        self.record(&hull);

        let second = advance(first.location, heading, first.speed, rules);
        let hull = Hull::at(second.location, heading);
        damage += hazards.cannon_impact_damage(&hull, 2);
        self.record(&hull);

        let mut pickups = 0;
        for cell in &self.visited {
            pickups += hazards.barrel_rum_at(*cell);
            damage += hazards.mine_damage(*cell);
        }

        Projection {
            rum_delta: pickups - damage - 2 * RUM_PER_TURN,
            targeting: targeting(ship, hull.bow, snapshot, rules),
            avoiding: avoidance(hull.bow, snapshot, rules),
            speed: second.speed,
            damage,
        }
    }

    fn record(&mut self, hull: &Hull) {
        for cell in hull.cells() {
            if !self.visited.contains(&cell) {
                self.visited.push(cell);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Leg {
    location: Cube,
    speed: i32,
}

/// Moves `speed` cells along `heading`, clipping against the map edge.
///
/// A full-speed move that leaves the map is retried one cell at a time and
/// the retried cell is kept when it is on the map. The bounds re-check after
/// the retry still tests the full-speed landing cell, so any clipped move ends
/// at speed zero even when the retry succeeded.
fn advance(start: Cube, heading: Direction, speed: i32, rules: &Rules) -> Leg {
    let on_map = |cell: Cube| cell.to_offset().is_within(rules.map_width, rules.map_height);

    let landing = start.neighbor(heading, speed);
    if on_map(landing) {
        return Leg {
            location: landing,
            speed,
        };
    }

    let location = if speed == MAX_SPEED {
        let retry = start.neighbor(heading, 1);
        if on_map(retry) {
            retry
        } else {
            start
        }
    } else {
        start
    };

    // Re-checks the full-speed landing cell, not the retried one.
    let speed = if on_map(landing) { speed } else { 0 };

    Leg { location, speed }
}

fn targeting(ship: &Ship, bow: Cube, snapshot: &TurnSnapshot, rules: &Rules) -> Targeting {
    let barrel = snapshot
        .barrels
        .closest_to(bow)
        .map_or(-rules.not_found, |barrel| -barrel.distance_to(bow));

    // The toughest ally stops chasing enemies in no-barrel mode.
    let toughest_ally = snapshot.ships.ally().toughest().map(|toughest| toughest.id);
    let enemy = if rules.no_barrel_mode && toughest_ally == Some(ship.id) {
        -rules.not_found
    } else {
        snapshot
            .ships
            .enemy()
            .toughest()
            .map_or(-rules.not_found, |enemy| -enemy.distance_to(bow))
    };

    Targeting { barrel, enemy }
}

fn avoidance(bow: Cube, snapshot: &TurnSnapshot, rules: &Rules) -> Avoidance {
    let cell = bow.to_offset();
    let edge = cell
        .x()
        .min(rules.map_width - 1 - cell.x())
        .min(cell.y())
        .min(rules.map_height - 1 - cell.y());
    let mine = snapshot
        .mines
        .closest_to(bow)
        .map(|mine| mine.distance_to(bow));
    let enemy = snapshot
        .ships
        .enemy()
        .closest_to(bow)
        .map(|enemy| enemy.distance_to(bow));

    Avoidance {
        edge: rules.remoteness(Some(edge), rules.edge_check_distance),
        mine: rules.remoteness(mine, rules.mine_check_distance),
        enemy: rules.remoteness(enemy, rules.enemy_check_distance),
    }
}
