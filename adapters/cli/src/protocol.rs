//! Line protocol spoken with the game referee.
//!
//! Each turn starts with the number of ships the bot controls, followed by the
//! number of entity records and one record per line:
//! `id TYPE x y arg1 arg2 arg3 arg4`.

use std::io::{self, BufRead};

use rum_fleet_core::{
    Barrel, Cannonball, CoreError, EntityId, Mine, Observation, Offset, PlayerId, ShipObservation,
};
use thiserror::Error;
use tracing::trace;

/// Errors raised while reading or decoding a turn.
#[derive(Debug, Error)]
pub(crate) enum ProtocolError {
    /// Reading from the input failed.
    #[error("failed to read turn input")]
    Io(#[from] io::Error),
    /// The input ended in the middle of a turn.
    #[error("input ended while reading {expected}")]
    Truncated {
        /// Part of the turn that was still expected.
        expected: &'static str,
    },
    /// A count line did not hold a non-negative integer.
    #[error("malformed {what} count `{line}`")]
    MalformedCount {
        /// Which count was being read.
        what: &'static str,
        /// Offending line.
        line: String,
    },
    /// A record did not have the expected shape.
    #[error("malformed entity record `{record}`: {reason}")]
    MalformedRecord {
        /// Offending record line.
        record: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A ship record carried values outside the game's ranges.
    #[error("invalid ship record `{record}`")]
    InvalidShip {
        /// Offending record line.
        record: String,
        /// Validation failure reported by the entity model.
        #[source]
        source: CoreError,
    },
}

/// Undecoded lines of a single turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawTurn {
    /// Number of ships the bot must issue commands for.
    pub(crate) ally_ships: usize,
    /// Entity records in reporting order.
    pub(crate) records: Vec<String>,
}

/// Reads the next turn, returning `None` once the input is exhausted.
///
/// Only the counts are validated here so that a turn with bad records is
/// still consumed entirely and the next turn starts on the right line.
pub(crate) fn read_turn<R: BufRead>(input: &mut R) -> Result<Option<RawTurn>, ProtocolError> {
    let Some(header) = next_line(input)? else {
        return Ok(None);
    };
    let ally_ships = parse_count(&header, "ally ship")?;

    let line = next_line(input)?.ok_or(ProtocolError::Truncated {
        expected: "the entity count",
    })?;
    let entities = parse_count(&line, "entity")?;

    let mut records = Vec::with_capacity(entities);
    for _ in 0..entities {
        let record = next_line(input)?.ok_or(ProtocolError::Truncated {
            expected: "an entity record",
        })?;
        records.push(record);
    }

    Ok(Some(RawTurn {
        ally_ships,
        records,
    }))
}

/// Decodes the records of a turn, skipping entity types the bot does not know.
pub(crate) fn decode(turn: &RawTurn) -> Result<Vec<Observation>, ProtocolError> {
    let mut observations = Vec::with_capacity(turn.records.len());
    for record in &turn.records {
        if let Some(observation) = decode_record(record)? {
            observations.push(observation);
        }
    }
    Ok(observations)
}

fn decode_record(record: &str) -> Result<Option<Observation>, ProtocolError> {
    let malformed = |reason| ProtocolError::MalformedRecord {
        record: record.to_owned(),
        reason,
    };

    let fields: Vec<&str> = record.split_whitespace().collect();
    let [id, kind, x, y, args @ ..] = fields.as_slice() else {
        return Err(malformed("expected at least id, type and position"));
    };
    if args.len() < 4 {
        return Err(malformed("expected four entity arguments"));
    }

    let number = |field: &str| {
        field
            .parse::<i32>()
            .map_err(|_| malformed("non-numeric field"))
    };
    let id = EntityId::new(
        id.parse::<u32>()
            .map_err(|_| malformed("entity id is not a non-negative integer"))?,
    );
    let position = Offset::new(number(*x)?, number(*y)?);

    let observation = match *kind {
        "SHIP" => {
            let owner = PlayerId::new(
                args[3]
                    .parse::<u32>()
                    .map_err(|_| malformed("owner is not a non-negative integer"))?,
            );
            let ship = ShipObservation::from_raw(
                id,
                position,
                number(args[0])?,
                number(args[1])?,
                number(args[2])?,
                owner,
            )
            .map_err(|source| ProtocolError::InvalidShip {
                record: record.to_owned(),
                source,
            })?;
            Observation::Ship(ship)
        }
        "BARREL" => Observation::Barrel(Barrel {
            id,
            position,
            rum: number(args[0])?,
        }),
        "CANNONBALL" => Observation::Cannonball(Cannonball {
            id,
            position,
            shooter: EntityId::new(
                args[0]
                    .parse::<u32>()
                    .map_err(|_| malformed("shooter is not a non-negative integer"))?,
            ),
            turns_to_impact: number(args[1])?,
        }),
        "MINE" => Observation::Mine(Mine { id, position }),
        other => {
            trace!(kind = other, "skipping unknown entity type");
            return Ok(None);
        }
    };
    Ok(Some(observation))
}

fn next_line<R: BufRead>(input: &mut R) -> Result<Option<String>, ProtocolError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim_end().to_owned();
    trace!(line = %line, "input");
    Ok(Some(line))
}

fn parse_count(line: &str, what: &'static str) -> Result<usize, ProtocolError> {
    line.trim()
        .parse()
        .map_err(|_| ProtocolError::MalformedCount {
            what,
            line: line.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::{decode, read_turn, ProtocolError, RawTurn};
    use rum_fleet_core::{EntityId, Observation, Offset, PlayerId};

    const TURN: &str = "\
2
5
0 SHIP 10 10 0 1 100 1
1 BARREL 12 10 5 0 0 0
2 CANNONBALL 4 6 7 2 0 0
3 MINE 1 2 0 0 0 0
4 SHIP 5 5 3 2 60 0
";

    fn raw(records: &[&str]) -> RawTurn {
        RawTurn {
            ally_ships: 1,
            records: records.iter().map(|record| (*record).to_owned()).collect(),
        }
    }

    #[test]
    fn reads_a_complete_turn() {
        let mut input = TURN.as_bytes();
        let turn = read_turn(&mut input)
            .expect("turn reads")
            .expect("turn present");
        assert_eq!(turn.ally_ships, 2);
        assert_eq!(turn.records.len(), 5);
        assert!(read_turn(&mut input).expect("end reads").is_none());
    }

    #[test]
    fn decodes_every_entity_kind() {
        let mut input = TURN.as_bytes();
        let turn = read_turn(&mut input)
            .expect("turn reads")
            .expect("turn present");
        let observations = decode(&turn).expect("turn decodes");

        assert_eq!(observations.len(), 5);
        match observations[0] {
            Observation::Ship(ship) => {
                assert_eq!(ship.position, Offset::new(10, 10));
                assert_eq!(ship.speed, 1);
                assert_eq!(ship.rum, 100);
                assert_eq!(ship.owner, PlayerId::LOCAL);
            }
            other => panic!("expected a ship, got {other:?}"),
        }
        match observations[2] {
            Observation::Cannonball(ball) => {
                assert_eq!(ball.shooter, EntityId::new(7));
                assert_eq!(ball.turns_to_impact, 2);
            }
            other => panic!("expected a cannonball, got {other:?}"),
        }
        assert!(matches!(observations[3], Observation::Mine(_)));
    }

    #[test]
    fn unknown_entity_types_are_skipped() {
        let turn = raw(&["9 KRAKEN 3 3 0 0 0 0", "1 MINE 2 2 0 0 0 0"]);
        let observations = decode(&turn).expect("turn decodes");
        assert_eq!(observations.len(), 1);
    }

    #[test]
    fn truncated_turn_is_reported() {
        let mut input = "1\n3\n0 MINE 1 1 0 0 0 0\n".as_bytes();
        let error = read_turn(&mut input).expect_err("turn is truncated");
        assert!(matches!(error, ProtocolError::Truncated { .. }));
    }

    #[test]
    fn malformed_count_is_reported() {
        let mut input = "two\n".as_bytes();
        let error = read_turn(&mut input).expect_err("count is malformed");
        assert!(matches!(error, ProtocolError::MalformedCount { .. }));
    }

    #[test]
    fn short_and_non_numeric_records_are_rejected() {
        let short = decode(&raw(&["1 BARREL 4 4"])).expect_err("record is short");
        assert!(matches!(short, ProtocolError::MalformedRecord { .. }));

        let garbled = decode(&raw(&["1 BARREL x 4 5 0 0 0"])).expect_err("record is garbled");
        assert!(matches!(garbled, ProtocolError::MalformedRecord { .. }));
    }

    #[test]
    fn out_of_range_ship_fields_are_rejected() {
        let error = decode(&raw(&["0 SHIP 3 3 6 1 100 1"])).expect_err("orientation is invalid");
        assert!(matches!(error, ProtocolError::InvalidShip { .. }));

        let error = decode(&raw(&["0 SHIP 3 3 0 3 100 1"])).expect_err("speed is invalid");
        assert!(matches!(error, ProtocolError::InvalidShip { .. }));
    }
}
