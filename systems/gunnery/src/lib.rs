#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides whether a ship should fire its cannon this turn.

use rum_fleet_core::{Entity, Offset, Rules, Ship, TurnSnapshot};
use tracing::debug;

/// Cannon targeting policy for a single ship.
#[derive(Debug, Default)]
pub struct Gunnery;

impl Gunnery {
    /// Creates the gunnery system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Cell to fire at, if the ship should fire this turn.
    ///
    /// Only the nearest enemy ship is considered, the first reported one
    /// winning ties. It must be within firing range of the ship's center and
    /// the cannon must have cooled down. The shot aims where the enemy will be
    /// after its next move.
    #[must_use]
    pub fn aim(&self, ship: &Ship, snapshot: &TurnSnapshot, rules: &Rules) -> Option<Offset> {
        if ship.counters.turns_to_fire > 0 {
            return None;
        }

        let enemies = snapshot.ships.enemy();
        let enemy = enemies.closest_to(ship.cube())?;
        let distance = enemy.distance_to(ship.cube());
        if distance > rules.firing_range {
            return None;
        }

        let target = enemy.next_location().to_offset();
        debug!(
            ship = ship.id.get(),
            enemy = enemy.id.get(),
            distance,
            x = target.x(),
            y = target.y(),
            "aiming cannon"
        );
        Some(target)
    }
}
