#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rum Fleet engine.
//!
//! This crate defines the vocabulary every other crate speaks: hex geometry,
//! the entities reported each turn, ordered [`Fleet`] collections with their
//! nearest and toughest queries, the [`ShipCommand`] values emitted for owned
//! ships and the [`Rules`] that parameterise every system. The world crate
//! turns raw [`Observation`] records into a [`TurnSnapshot`], and pure systems
//! read that snapshot to decide what each ship does next.

mod command;
mod entity;
mod fleet;
mod hex;
mod rules;

pub use command::{Controls, ShipCommand, Steering};
pub use entity::{
    Barrel, Cannonball, Entity, EntityId, HasOwner, Hull, HullPart, Mine, Observation, PlayerId,
    Ship, ShipCounters, ShipObservation, MAX_SPEED,
};
pub use fleet::{Fleet, TurnSnapshot};
pub use hex::{Cube, Direction, Offset};
pub use rules::Rules;

/// Rum every ship burns per turn regardless of its command.
pub const RUM_PER_TURN: i32 = 1;

/// Errors raised when values fall outside the ranges the game allows.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A direction or orientation index was outside `0..6`.
    #[error("direction index {0} is outside 0..6")]
    InvalidDirection(i32),
    /// A ship speed was outside `0..=MAX_SPEED`.
    #[error("ship speed {0} is outside 0..=2")]
    InvalidSpeed(i32),
    /// A command keyword did not name any known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

/// Decision emitted for a single owned ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Ship the command is addressed to.
    pub ship: EntityId,
    /// Command to print for the ship.
    pub command: ShipCommand,
    /// Halted-turn counter after accounting for this turn.
    pub turns_halted: u32,
}
