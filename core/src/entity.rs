//! Typed records for the entities reported each turn.

use serde::{Deserialize, Serialize};

use crate::{CoreError, Cube, Direction, Offset};

/// Highest speed a ship can sail at.
pub const MAX_SPEED: i32 = 2;

/// Identifier assigned to an entity by the game, stable across turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Player that controls a ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Owner value the game reports for ships controlled by this engine.
    pub const LOCAL: Self = Self(1);

    /// Creates a new player identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Behaviour shared by every entity placed on the map.
pub trait Entity {
    /// Identifier of the entity.
    fn id(&self) -> EntityId;

    /// Cell occupied by the entity in offset coordinates.
    fn position(&self) -> Offset;

    /// Cell occupied by the entity in cube coordinates, derived on every call.
    fn cube(&self) -> Cube {
        self.position().to_cube()
    }

    /// Hex distance from the entity to the provided cell.
    fn distance_to(&self, cell: Cube) -> i32 {
        self.cube().distance(cell)
    }
}

/// Capability of entities that belong to a player.
pub trait HasOwner {
    /// Player controlling the entity.
    fn owner(&self) -> PlayerId;

    /// Reports whether the entity belongs to the local player.
    fn is_ally(&self) -> bool {
        self.owner() == PlayerId::LOCAL
    }
}

/// Counters the game does not report and that are carried between turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipCounters {
    /// Turns left before the cannon can fire again.
    pub turns_to_fire: u32,
    /// Turns left before another mine can be dropped.
    pub turns_to_mine: u32,
    /// Consecutive turns the ship has spent at speed zero.
    pub turns_halted: u32,
}

impl ShipCounters {
    /// Derives this turn's counters from the ones recorded on the previous turn.
    ///
    /// Cooldowns tick down by one and saturate at zero while the halted
    /// counter is carried unchanged; it is updated once the helm decides.
    #[must_use]
    pub fn carried_forward(previous: &ShipCounters) -> Self {
        Self {
            turns_to_fire: previous.turns_to_fire.saturating_sub(1),
            turns_to_mine: previous.turns_to_mine.saturating_sub(1),
            turns_halted: previous.turns_halted,
        }
    }

    /// Halted-turn counter once a turn sailed at `speed` is accounted for.
    #[must_use]
    pub const fn halted_after(&self, speed: i32) -> u32 {
        if speed == 0 {
            self.turns_halted.saturating_add(1)
        } else {
            0
        }
    }
}

/// Raw ship record as reported by the game for a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShipObservation {
    /// Identifier of the ship.
    pub id: EntityId,
    /// Cell occupied by the center of the hull.
    pub position: Offset,
    /// Heading of the ship.
    pub orientation: Direction,
    /// Current speed in `0..=MAX_SPEED`.
    pub speed: i32,
    /// Rum carried by the ship; zero or below means the ship sank.
    pub rum: i32,
    /// Player controlling the ship.
    pub owner: PlayerId,
}

impl ShipObservation {
    /// Builds a ship observation from raw protocol integers.
    pub fn from_raw(
        id: EntityId,
        position: Offset,
        orientation: i32,
        speed: i32,
        rum: i32,
        owner: PlayerId,
    ) -> Result<Self, CoreError> {
        if !(0..=MAX_SPEED).contains(&speed) {
            return Err(CoreError::InvalidSpeed(speed));
        }

        Ok(Self {
            id,
            position,
            orientation: Direction::new(orientation)?,
            speed,
            rum,
            owner,
        })
    }
}

/// Ship state for the current turn, including carried counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ship {
    /// Identifier of the ship.
    pub id: EntityId,
    /// Cell occupied by the center of the hull.
    pub position: Offset,
    /// Heading of the ship.
    pub orientation: Direction,
    /// Current speed in `0..=MAX_SPEED`.
    pub speed: i32,
    /// Rum carried by the ship.
    pub rum: i32,
    /// Player controlling the ship.
    pub owner: PlayerId,
    /// Cooldown and idling counters reconstructed from history.
    pub counters: ShipCounters,
}

impl Ship {
    /// Combines a raw observation with counters carried from history.
    #[must_use]
    pub fn from_observation(observation: ShipObservation, counters: ShipCounters) -> Self {
        Self {
            id: observation.id,
            position: observation.position,
            orientation: observation.orientation,
            speed: observation.speed,
            rum: observation.rum,
            owner: observation.owner,
            counters,
        }
    }

    /// Cell the ship reaches next turn if it keeps heading and speed.
    #[must_use]
    pub fn next_location(&self) -> Cube {
        self.cube().neighbor(self.orientation, self.speed)
    }

    /// Cells currently covered by the hull.
    #[must_use]
    pub fn hull(&self) -> Hull {
        Hull::at(self.cube(), self.orientation)
    }
}

impl Entity for Ship {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Offset {
        self.position
    }
}

impl HasOwner for Ship {
    fn owner(&self) -> PlayerId {
        self.owner
    }
}

/// Floating barrel of rum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Barrel {
    /// Identifier of the barrel.
    pub id: EntityId,
    /// Cell the barrel floats on.
    pub position: Offset,
    /// Rum gained by the ship that picks the barrel up.
    pub rum: i32,
}

impl Entity for Barrel {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Offset {
        self.position
    }
}

/// Cannonball in flight towards its target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cannonball {
    /// Identifier of the cannonball.
    pub id: EntityId,
    /// Cell the cannonball lands on.
    pub position: Offset,
    /// Ship that fired the cannonball.
    pub shooter: EntityId,
    /// Turns remaining until the cannonball lands.
    pub turns_to_impact: i32,
}

impl Entity for Cannonball {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Offset {
        self.position
    }
}

/// Mine anchored to a cell until something sails into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mine {
    /// Identifier of the mine.
    pub id: EntityId,
    /// Cell the mine occupies.
    pub position: Offset,
}

impl Entity for Mine {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Offset {
        self.position
    }
}

/// Entity record decoded from a turn's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// A ship belonging to either player.
    Ship(ShipObservation),
    /// A barrel of rum.
    Barrel(Barrel),
    /// A cannonball in flight.
    Cannonball(Cannonball),
    /// A mine.
    Mine(Mine),
}

/// Section of a hull covering a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HullPart {
    /// Middle cell of the ship.
    Center,
    /// Front cell of the ship.
    Bow,
    /// Rear cell of the ship.
    Stern,
}

/// The three cells covered by a ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hull {
    /// Middle cell of the ship.
    pub center: Cube,
    /// Cell ahead of the center along the heading.
    pub bow: Cube,
    /// Cell behind the center, opposite to the heading.
    pub stern: Cube,
}

impl Hull {
    /// Hull of a ship centered on `center` and heading in `orientation`.
    #[must_use]
    pub fn at(center: Cube, orientation: Direction) -> Self {
        Self {
            center,
            bow: center.neighbor(orientation, 1),
            stern: center.neighbor(orientation.opposite(), 1),
        }
    }

    /// Covered cells in center, bow, stern order.
    #[must_use]
    pub const fn cells(&self) -> [Cube; 3] {
        [self.center, self.bow, self.stern]
    }

    /// Part of the hull covering `cell`, if any.
    #[must_use]
    pub fn part_at(&self, cell: Cube) -> Option<HullPart> {
        if cell == self.center {
            Some(HullPart::Center)
        } else if cell == self.bow {
            Some(HullPart::Bow)
        } else if cell == self.stern {
            Some(HullPart::Stern)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Entity, EntityId, Hull, HullPart, PlayerId, Ship, ShipCounters, ShipObservation};
    use crate::{CoreError, Direction, Offset};

    fn ship(x: i32, y: i32, orientation: i32, speed: i32) -> Ship {
        let observation = ShipObservation::from_raw(
            EntityId::new(1),
            Offset::new(x, y),
            orientation,
            speed,
            100,
            PlayerId::LOCAL,
        )
        .expect("valid ship");
        Ship::from_observation(observation, ShipCounters::default())
    }

    #[test]
    fn next_location_follows_heading_and_speed() {
        let sailing = ship(10, 10, 0, 2);
        assert_eq!(sailing.next_location().to_offset(), Offset::new(12, 10));

        let idle = ship(10, 10, 3, 0);
        assert_eq!(idle.next_location(), idle.cube());
    }

    #[test]
    fn hull_spans_bow_and_stern_around_center() {
        let ship = ship(5, 4, 0, 1);
        let hull = ship.hull();
        assert_eq!(hull.bow.to_offset(), Offset::new(6, 4));
        assert_eq!(hull.stern.to_offset(), Offset::new(4, 4));
        assert_eq!(hull.part_at(ship.cube()), Some(HullPart::Center));
        assert_eq!(hull.part_at(hull.bow), Some(HullPart::Bow));
        assert_eq!(hull.part_at(hull.stern), Some(HullPart::Stern));
        assert_eq!(hull.part_at(Offset::new(9, 9).to_cube()), None);
    }

    #[test]
    fn hull_cells_are_adjacent_to_center() {
        let center = Offset::new(7, 3).to_cube();
        for direction in Direction::all() {
            let hull = Hull::at(center, direction);
            assert_eq!(center.distance(hull.bow), 1);
            assert_eq!(center.distance(hull.stern), 1);
            assert_eq!(hull.bow.distance(hull.stern), 2);
        }
    }

    #[test]
    fn cooldowns_tick_down_and_saturate() {
        let previous = ShipCounters {
            turns_to_fire: 2,
            turns_to_mine: 0,
            turns_halted: 3,
        };
        let carried = ShipCounters::carried_forward(&previous);
        assert_eq!(carried.turns_to_fire, 1);
        assert_eq!(carried.turns_to_mine, 0);
        assert_eq!(carried.turns_halted, 3);
        assert_eq!(carried.halted_after(0), 4);
        assert_eq!(carried.halted_after(1), 0);
    }

    #[test]
    fn raw_ship_fields_are_validated() {
        let id = EntityId::new(3);
        let position = Offset::new(1, 1);
        assert_eq!(
            ShipObservation::from_raw(id, position, 0, 3, 50, PlayerId::LOCAL),
            Err(CoreError::InvalidSpeed(3))
        );
        assert_eq!(
            ShipObservation::from_raw(id, position, 9, 1, 50, PlayerId::LOCAL),
            Err(CoreError::InvalidDirection(9))
        );
    }
}
