//! Commands a ship can be given for a single turn.

use std::{fmt, str::FromStr};

use crate::{CoreError, Offset};

/// Rudder and throttle changes requested by a steering command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Controls {
    /// Rotation applied at the end of the turn, positive towards port.
    pub turn: i32,
    /// Change of speed applied before moving.
    pub throttle: i32,
}

impl Controls {
    /// Creates a control pair.
    #[must_use]
    pub const fn new(turn: i32, throttle: i32) -> Self {
        Self { turn, throttle }
    }
}

/// The five movement commands considered by the helm each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Steering {
    /// Keep heading and speed.
    Wait,
    /// Rotate one step counter-clockwise.
    Port,
    /// Rotate one step clockwise.
    Starboard,
    /// Increase speed by one.
    Faster,
    /// Decrease speed by one.
    Slower,
}

impl Steering {
    /// Every steering command in evaluation order.
    pub const ALL: [Steering; 5] = [
        Steering::Wait,
        Steering::Port,
        Steering::Starboard,
        Steering::Faster,
        Steering::Slower,
    ];

    /// Controls applied by the command.
    #[must_use]
    pub const fn controls(self) -> Controls {
        match self {
            Self::Wait => Controls::new(0, 0),
            Self::Port => Controls::new(1, 0),
            Self::Starboard => Controls::new(-1, 0),
            Self::Faster => Controls::new(0, 1),
            Self::Slower => Controls::new(0, -1),
        }
    }

    /// Final tie-break priority; higher wins when every objective is equal.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Faster => 4,
            Self::Wait => 3,
            Self::Starboard => 2,
            Self::Port => 1,
            Self::Slower => 0,
        }
    }

    /// Protocol keyword for the command.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wait => "WAIT",
            Self::Port => "PORT",
            Self::Starboard => "STARBOARD",
            Self::Faster => "FASTER",
            Self::Slower => "SLOWER",
        }
    }
}

impl FromStr for Steering {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|steering| steering.name() == value)
            .ok_or_else(|| CoreError::UnknownCommand(value.to_owned()))
    }
}

impl fmt::Display for Steering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Command emitted for a ship on the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShipCommand {
    /// Movement command.
    Steer(Steering),
    /// Fire the cannon at the provided cell instead of moving.
    Fire {
        /// Cell the cannonball is aimed at.
        target: Offset,
    },
}

impl ShipCommand {
    /// Command used whenever no decision could be made.
    pub const FALLBACK: Self = Self::Steer(Steering::Wait);

    /// Reports whether the command fires the cannon.
    #[must_use]
    pub const fn is_fire(&self) -> bool {
        matches!(self, Self::Fire { .. })
    }
}

impl fmt::Display for ShipCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steer(steering) => f.write_str(steering.name()),
            Self::Fire { target } => write!(f, "FIRE {} {}", target.x(), target.y()),
        }
    }
}
