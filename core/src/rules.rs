//! Tunable constants consumed by the hazard, lookahead, helm and gunnery systems.

use serde::{Deserialize, Serialize};

/// Game constants and tuning parameters shared by every system.
///
/// Every field has a default matching the reference game, so configuration
/// files only need to list the values they override.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Number of map columns.
    pub map_width: i32,
    /// Number of map rows.
    pub map_height: i32,
    /// Damage dealt by a cannonball landing on a hull's center cell.
    pub cannon_high_damage: i32,
    /// Damage dealt by a cannonball landing on a hull's bow or stern.
    pub cannon_low_damage: i32,
    /// Damage dealt by sailing into a mine.
    pub mine_damage: i32,
    /// Turns a cannon needs between consecutive shots.
    pub cannon_cooldown: u32,
    /// Maximum hex distance at which an enemy is fired upon.
    pub firing_range: i32,
    /// Edge distance beyond which the map border no longer matters.
    pub edge_check_distance: i32,
    /// Mine distance beyond which a mine no longer matters.
    pub mine_check_distance: i32,
    /// Enemy distance beyond which an enemy ship no longer matters.
    pub enemy_check_distance: i32,
    /// Magnitude reported for absent or irrelevant targets and hazards.
    pub not_found: i32,
    /// Halted turns after which the helm forces acceleration.
    pub halted_turns_threshold: u32,
    /// Hunts enemy ships instead of barrels even while barrels remain.
    pub no_barrel_mode: bool,
    /// Number of past turns retained by the history ledger.
    pub history_depth: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            map_width: 23,
            map_height: 21,
            cannon_high_damage: 50,
            cannon_low_damage: 25,
            mine_damage: 25,
            cannon_cooldown: 2,
            firing_range: 4,
            edge_check_distance: 2,
            mine_check_distance: 2,
            enemy_check_distance: 3,
            not_found: 1000,
            halted_turns_threshold: 2,
            no_barrel_mode: false,
            history_depth: 1,
        }
    }
}

impl Rules {
    /// Caps `distance` at the not-found value once it exceeds `threshold`.
    ///
    /// Distances inside the threshold are returned unchanged so nearer
    /// hazards rank lower.
    #[must_use]
    pub fn remoteness(&self, distance: Option<i32>, threshold: i32) -> i32 {
        match distance {
            Some(distance) if distance <= threshold => distance,
            _ => self.not_found,
        }
    }
}
