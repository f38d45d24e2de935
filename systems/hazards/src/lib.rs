#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure queries answering what a cell will cost or yield on a given turn.

use rum_fleet_core::{Cube, Entity, Hull, HullPart, Rules, TurnSnapshot};

/// Read-only hazard and reward lookups over a single turn snapshot.
///
/// Every query is a pure function of the snapshot and rules.
#[derive(Clone, Copy, Debug)]
pub struct HazardIndex<'a> {
    snapshot: &'a TurnSnapshot,
    rules: &'a Rules,
}

impl<'a> HazardIndex<'a> {
    /// Captures a hazard index over the provided snapshot.
    #[must_use]
    pub fn new(snapshot: &'a TurnSnapshot, rules: &'a Rules) -> Self {
        Self { snapshot, rules }
    }

    /// Damage dealt to `hull` by cannonballs landing exactly `turns_from_now` turns ahead.
    ///
    /// A hit on the center cell deals high damage and a hit on the bow or stern
    /// deals low damage. Several cannonballs landing on the hull add up.
    #[must_use]
    pub fn cannon_impact_damage(&self, hull: &Hull, turns_from_now: i32) -> i32 {
        self.snapshot
            .cannonballs
            .iter()
            .filter(|cannonball| cannonball.turns_to_impact == turns_from_now)
            .map(|cannonball| match hull.part_at(cannonball.cube()) {
                Some(HullPart::Center) => self.rules.cannon_high_damage,
                Some(HullPart::Bow | HullPart::Stern) => self.rules.cannon_low_damage,
                None => 0,
            })
            .sum()
    }

    /// Damage taken by sailing onto `cell`.
    ///
    /// Only a mine on the cell itself counts; blasts reaching neighbouring
    /// cells are not modelled.
    #[must_use]
    pub fn mine_damage(&self, cell: Cube) -> i32 {
        if self.snapshot.mines.iter().any(|mine| mine.cube() == cell) {
            self.rules.mine_damage
        } else {
            0
        }
    }

    /// Rum of the barrel floating on `cell`, or zero.
    #[must_use]
    pub fn barrel_rum_at(&self, cell: Cube) -> i32 {
        self.snapshot
            .barrels
            .iter()
            .find(|barrel| barrel.cube() == cell)
            .map_or(0, |barrel| barrel.rum)
    }
}
