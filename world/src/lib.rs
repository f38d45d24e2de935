#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative per-turn state for the Rum Fleet engine.
//!
//! The game only reports what is visible on the current turn. The world
//! combines that report with the [`Ledger`] of previous turns so ships carry
//! their cooldown and idling counters forward, then exposes the result as an
//! immutable [`TurnSnapshot`] for the systems to read.

mod ledger;

use rum_fleet_core::{Decision, Observation, Rules, Ship, ShipCounters, TurnSnapshot};
use tracing::debug;

pub use ledger::{Ledger, Recorded};

/// Represents the authoritative Rum Fleet world state.
#[derive(Debug)]
pub struct World {
    rules: Rules,
    ledger: Ledger,
    snapshot: TurnSnapshot,
    turn: u64,
}

impl World {
    /// Creates a world with no history that plays by the provided rules.
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        let ledger = Ledger::new(rules.history_depth);
        Self {
            rules,
            ledger,
            snapshot: TurnSnapshot::default(),
            turn: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

/// Replaces the current snapshot with the entities observed this turn.
///
/// Ships are seeded with the counters recorded for the same id on the
/// previous turn: cooldowns tick down by one and the halted counter carries
/// over unchanged. Ships the ledger has never seen start with zeroed counters.
pub fn observe<I>(world: &mut World, observations: I)
where
    I: IntoIterator<Item = Observation>,
{
    let mut snapshot = TurnSnapshot::default();
    for observation in observations {
        match observation {
            Observation::Ship(observed) => {
                let counters = world
                    .ledger
                    .last_ship(observed.id)
                    .map(|previous| ShipCounters::carried_forward(&previous.counters))
                    .unwrap_or_default();
                snapshot.ships.push(Ship::from_observation(observed, counters));
            }
            Observation::Barrel(barrel) => snapshot.barrels.push(barrel),
            Observation::Cannonball(cannonball) => snapshot.cannonballs.push(cannonball),
            Observation::Mine(mine) => snapshot.mines.push(mine),
        }
    }

    world.turn = world.turn.saturating_add(1);
    debug!(
        turn = world.turn,
        ships = snapshot.ships.len(),
        barrels = snapshot.barrels.len(),
        cannonballs = snapshot.cannonballs.len(),
        mines = snapshot.mines.len(),
        "observed turn"
    );
    world.snapshot = snapshot;
}

/// Records the decisions taken this turn and closes the turn in the ledger.
///
/// Must run after every ship of the turn has been decided so that no decision
/// ever reads the entry of its own turn.
pub fn commit(world: &mut World, decisions: &[Decision]) {
    let cannon_cooldown = world.rules.cannon_cooldown;
    let ships = world.snapshot.ships.iter().map(|ship| {
        let mut recorded = *ship;
        match decisions.iter().find(|decision| decision.ship == ship.id) {
            Some(decision) => {
                recorded.counters.turns_halted = decision.turns_halted;
                if decision.command.is_fire() {
                    recorded.counters.turns_to_fire = cannon_cooldown;
                }
            }
            None => {
                recorded.counters.turns_halted = ship.counters.halted_after(ship.speed);
            }
        }
        Recorded::Ship(recorded)
    });
    let barrels = world.snapshot.barrels.iter().copied().map(Recorded::Barrel);
    let mines = world.snapshot.mines.iter().copied().map(Recorded::Mine);

    world.ledger.append(ships.chain(barrels).chain(mines));
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use rum_fleet_core::{Fleet, Rules, Ship, TurnSnapshot};

    use super::{Ledger, World};

    /// Entities observed on the current turn.
    #[must_use]
    pub fn snapshot(world: &World) -> &TurnSnapshot {
        &world.snapshot
    }

    /// Rules the world was configured with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Ships controlled by the local player on the current turn.
    #[must_use]
    pub fn ally_ships(world: &World) -> Fleet<Ship> {
        world.snapshot.ships.ally()
    }

    /// History of the turns committed so far.
    #[must_use]
    pub fn ledger(world: &World) -> &Ledger {
        &world.ledger
    }

    /// Number of turns observed so far, starting at one on the first turn.
    #[must_use]
    pub fn turn(world: &World) -> u64 {
        world.turn
    }
}
