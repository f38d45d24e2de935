#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks the command for each owned ship.
//!
//! Every steering command is projected two turns ahead by the [`Lookahead`]
//! and ranked by its [`Candidate`] key. Two overrides follow: a ship that has
//! idled for too long is forced to accelerate, and a ship that would take no
//! damage by waiting may shoot at a nearby enemy instead of moving.

use rum_fleet_core::{Decision, Rules, Ship, ShipCommand, Steering, TurnSnapshot};
use rum_fleet_system_gunnery::Gunnery;
use rum_fleet_system_lookahead::{Avoidance, Lookahead, Projection, Targeting};
use tracing::debug;

/// Rank key of a steering command; the greatest candidate wins.
///
/// Fields compare in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    /// Net rum change over both turns.
    pub rum_delta: i32,
    /// Closeness to barrels and hunted enemies.
    pub targeting: Targeting,
    /// Distance from edges, mines and enemies.
    pub avoiding: Avoidance,
    /// Speed after both turns.
    pub speed: i32,
    /// Fixed preference of the command.
    pub weight: u8,
    /// Protocol keyword of the command.
    pub name: &'static str,
    /// Command the key belongs to.
    pub steering: Steering,
}

impl Candidate {
    /// Builds the rank key of `steering` from its projection.
    #[must_use]
    pub fn new(steering: Steering, projection: Projection) -> Self {
        Self {
            rum_delta: projection.rum_delta,
            targeting: projection.targeting,
            avoiding: projection.avoiding,
            speed: projection.speed,
            weight: steering.weight(),
            name: steering.name(),
            steering,
        }
    }
}

/// Command selector that reuses its lookahead scratch space between ships.
#[derive(Debug, Default)]
pub struct Helm {
    lookahead: Lookahead,
    gunnery: Gunnery,
    candidates: Vec<Candidate>,
}

impl Helm {
    /// Creates a helm with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranks the steering commands of `ship` and applies the overrides.
    pub fn decide(&mut self, ship: &Ship, snapshot: &TurnSnapshot, rules: &Rules) -> Decision {
        self.candidates.clear();
        let mut quiet = false;
        for steering in Steering::ALL {
            let projection = self
                .lookahead
                .predict(ship, steering.controls(), snapshot, rules);
            if steering == Steering::Wait {
                quiet = projection.damage == 0;
            }
            let candidate = Candidate::new(steering, projection);
            debug!(ship = ship.id.get(), ?candidate, "ranked command");
            self.candidates.push(candidate);
        }

        let turns_halted = ship.counters.halted_after(ship.speed);
        let command = match self.steering(turns_halted, rules) {
            Some(steering) if quiet => self.fire_or(steering, ship, snapshot, rules),
            Some(steering) => ShipCommand::Steer(steering),
            None => ShipCommand::FALLBACK,
        };

        debug!(
            ship = ship.id.get(),
            %command,
            turns_halted,
            "decided command"
        );
        Decision {
            ship: ship.id,
            command,
            turns_halted,
        }
    }

    fn candidate(&self, steering: Steering) -> Option<&Candidate> {
        self.candidates
            .iter()
            .find(|candidate| candidate.steering == steering)
    }

    fn steering(&self, turns_halted: u32, rules: &Rules) -> Option<Steering> {
        let best = self.candidates.iter().max()?;
        if turns_halted > rules.halted_turns_threshold {
            if let Some(faster) = self.candidate(Steering::Faster) {
                if faster.rum_delta >= best.rum_delta {
                    debug!(turns_halted, "forcing acceleration");
                    return Some(Steering::Faster);
                }
            }
        }
        Some(best.steering)
    }

    fn fire_or(
        &self,
        steering: Steering,
        ship: &Ship,
        snapshot: &TurnSnapshot,
        rules: &Rules,
    ) -> ShipCommand {
        match self.gunnery.aim(ship, snapshot, rules) {
            Some(target) => ShipCommand::Fire { target },
            None => ShipCommand::Steer(steering),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Candidate;
    use rum_fleet_core::Steering;
    use rum_fleet_system_lookahead::{Avoidance, Projection, Targeting};

    fn projection() -> Projection {
        Projection {
            rum_delta: -2,
            targeting: Targeting {
                barrel: -4,
                enemy: -1000,
            },
            avoiding: Avoidance {
                edge: 1000,
                mine: 1000,
                enemy: 1000,
            },
            speed: 1,
            damage: 0,
        }
    }

    #[test]
    fn equal_projections_fall_back_to_command_weight() {
        let best = Steering::ALL
            .into_iter()
            .map(|steering| Candidate::new(steering, projection()))
            .max()
            .map(|candidate| candidate.steering);
        assert_eq!(best, Some(Steering::Faster));
    }

    #[test]
    fn rum_outranks_every_other_objective() {
        let richer = Candidate::new(
            Steering::Slower,
            Projection {
                rum_delta: -1,
                speed: 0,
                ..projection()
            },
        );
        let closer = Candidate::new(
            Steering::Faster,
            Projection {
                targeting: Targeting {
                    barrel: 0,
                    enemy: -1000,
                },
                ..projection()
            },
        );
        assert!(richer > closer);
    }

    #[test]
    fn targeting_outranks_avoidance() {
        let closer = Candidate::new(
            Steering::Port,
            Projection {
                targeting: Targeting {
                    barrel: -1,
                    enemy: -1000,
                },
                avoiding: Avoidance {
                    edge: 0,
                    mine: 1000,
                    enemy: 1000,
                },
                ..projection()
            },
        );
        let safer = Candidate::new(Steering::Wait, projection());
        assert!(closer > safer);
    }
}
