//! Per-entity memory of recent turns.

use std::collections::{HashMap, VecDeque};

use rum_fleet_core::{Barrel, EntityId, Mine, Ship};

/// Entity as it was recorded at the end of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recorded {
    /// Ship including the counters it ended the turn with.
    Ship(Ship),
    /// Barrel that was floating during the turn.
    Barrel(Barrel),
    /// Mine that was on the map during the turn.
    Mine(Mine),
}

/// Bounded history of the entities seen on recent turns, keyed by id.
///
/// The front entry is the most recent turn. Entries older than `depth` turns
/// are evicted on append so memory stays constant over a match.
#[derive(Clone, Debug)]
pub struct Ledger {
    depth: usize,
    entries: VecDeque<HashMap<EntityId, Recorded>>,
}

impl Ledger {
    /// Creates an empty ledger retaining at most `depth` turns (at least one).
    #[must_use]
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            depth,
            entries: VecDeque::with_capacity(depth),
        }
    }

    /// Records the entities seen on the turn that just finished.
    pub fn append<I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = Recorded>,
    {
        let entry: HashMap<EntityId, Recorded> = entities
            .into_iter()
            .map(|recorded| (recorded.id(), recorded))
            .collect();
        self.entries.push_front(entry);
        self.entries.truncate(self.depth);
    }

    /// Entity with `id` as recorded `turns_ago` turns back, `1` being the previous turn.
    ///
    /// Returns `None` when that turn is not retained or the entity was absent.
    #[must_use]
    pub fn last(&self, id: EntityId, turns_ago: usize) -> Option<&Recorded> {
        let index = turns_ago.checked_sub(1)?;
        self.entries.get(index)?.get(&id)
    }

    /// Ship with `id` as recorded on the previous turn.
    #[must_use]
    pub fn last_ship(&self, id: EntityId) -> Option<&Ship> {
        match self.last(id, 1)? {
            Recorded::Ship(ship) => Some(ship),
            Recorded::Barrel(_) | Recorded::Mine(_) => None,
        }
    }

    /// Number of turns currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no turn has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Recorded {
    /// Identifier of the recorded entity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Self::Ship(ship) => ship.id,
            Self::Barrel(barrel) => barrel.id,
            Self::Mine(mine) => mine.id,
        }
    }
}
