//! Ordered entity collections and the per-turn snapshot built from them.

use crate::{Barrel, Cannonball, Cube, Entity, EntityId, HasOwner, Mine, Ship};

/// Ordered sequence of entities of a single kind for the current turn.
///
/// Iteration order matches the order entities were reported in, which is also
/// the tie-break order of every query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fleet<T> {
    members: Vec<T>,
}

impl<T> Default for Fleet<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<T> Fleet<T> {
    /// Creates a fleet from members in reporting order.
    #[must_use]
    pub fn from_members(members: Vec<T>) -> Self {
        Self { members }
    }

    /// Iterator over the members in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.members.iter()
    }

    /// Number of members in the fleet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Reports whether the fleet has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Appends a member after all existing ones.
    pub fn push(&mut self, member: T) {
        self.members.push(member);
    }
}

impl<T: Entity> Fleet<T> {
    /// Member closest to `target`, preferring the earliest one on ties.
    ///
    /// Returns `None` when the fleet is empty.
    #[must_use]
    pub fn closest_to(&self, target: Cube) -> Option<&T> {
        let mut best: Option<(&T, i32)> = None;
        for member in &self.members {
            let distance = member.distance_to(target);
            match best {
                Some((_, closest)) if closest <= distance => {}
                _ => best = Some((member, distance)),
            }
        }
        best.map(|(member, _)| member)
    }

    /// Member with the provided identifier, if present.
    #[must_use]
    pub fn find(&self, id: EntityId) -> Option<&T> {
        self.members.iter().find(|member| member.id() == id)
    }
}

impl<T: HasOwner + Clone> Fleet<T> {
    /// Members controlled by the local player.
    #[must_use]
    pub fn ally(&self) -> Fleet<T> {
        self.filtered(|member| member.is_ally())
    }

    /// Members controlled by any other player.
    #[must_use]
    pub fn enemy(&self) -> Fleet<T> {
        self.filtered(|member| !member.is_ally())
    }

    fn filtered<F>(&self, keep: F) -> Fleet<T>
    where
        F: Fn(&T) -> bool,
    {
        Fleet::from_members(self.members.iter().filter(|m| keep(m)).cloned().collect())
    }
}

impl Fleet<Ship> {
    /// Ship carrying the most rum, preferring the earliest one on ties.
    ///
    /// Returns `None` when the fleet is empty.
    #[must_use]
    pub fn toughest(&self) -> Option<&Ship> {
        let mut best: Option<&Ship> = None;
        for ship in &self.members {
            match best {
                Some(toughest) if toughest.rum >= ship.rum => {}
                _ => best = Some(ship),
            }
        }
        best
    }
}

impl<T> FromIterator<T> for Fleet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_members(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Fleet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Immutable view of every entity reported for the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnSnapshot {
    /// Ships of both players.
    pub ships: Fleet<Ship>,
    /// Barrels still floating.
    pub barrels: Fleet<Barrel>,
    /// Cannonballs in flight.
    pub cannonballs: Fleet<Cannonball>,
    /// Mines on the map.
    pub mines: Fleet<Mine>,
}
