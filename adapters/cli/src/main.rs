#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that plays Rum Fleet over the referee's line protocol.
//!
//! Turns are read from stdin (or replayed from a recorded file), one command
//! per owned ship is written to stdout and all diagnostics go to stderr.

mod protocol;

use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rum_fleet_core::{Decision, Rules, ShipCommand};
use rum_fleet_system_helm::Helm;
use rum_fleet_world::{commit, observe, query, World};
use tracing::{info, warn};

use self::protocol::RawTurn;

/// Command-line arguments of the bot.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default game rules.
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Recorded turn input to replay instead of reading stdin.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Format of the diagnostics written to stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

/// Output format of the diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable single-line events.
    Compact,
    /// One JSON object per event.
    Json,
}

/// Entry point for the Rum Fleet command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);
    run(&args)
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init(),
    }
}

fn run(args: &Args) -> Result<()> {
    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => Rules::default(),
    };

    let mut input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!(path = %path.display(), "replaying recorded input");
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let mut out = io::stdout().lock();

    let mut world = World::new(rules);
    let mut helm = Helm::new();
    let mut decisions = Vec::new();

    while let Some(turn) = protocol::read_turn(&mut input).context("failed to read turn")? {
        let started = Instant::now();
        for command in play_turn(&mut world, &mut helm, &turn, &mut decisions) {
            writeln!(out, "{command}").context("failed to write command")?;
        }
        out.flush().context("failed to flush commands")?;

        info!(
            turn = query::turn(&world),
            elapsed_us = started.elapsed().as_micros() as u64,
            "turn complete"
        );
    }

    Ok(())
}

/// Decides one command per owned ship for the turn and records the outcome.
///
/// A turn whose records cannot be decoded is answered with the fallback
/// command for every ship announced in its header and leaves the world as it
/// was.
fn play_turn(
    world: &mut World,
    helm: &mut Helm,
    turn: &RawTurn,
    decisions: &mut Vec<Decision>,
) -> Vec<ShipCommand> {
    let observations = match protocol::decode(turn) {
        Ok(observations) => observations,
        Err(error) => {
            warn!(%error, ships = turn.ally_ships, "falling back to waiting");
            return vec![ShipCommand::FALLBACK; turn.ally_ships];
        }
    };

    observe(world, observations);

    decisions.clear();
    let snapshot = query::snapshot(world);
    let rules = query::rules(world);
    for ship in query::ally_ships(world).iter() {
        decisions.push(helm.decide(ship, snapshot, rules));
    }
    commit(world, decisions);

    decisions.iter().map(|decision| decision.command).collect()
}

fn load_rules(path: &Path) -> Result<Rules> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    let rules = parse_rules(&contents)
        .with_context(|| format!("failed to load rules from {}", path.display()))?;
    info!(path = %path.display(), "loaded rules");
    Ok(rules)
}

fn parse_rules(contents: &str) -> Result<Rules> {
    toml::from_str(contents).context("failed to parse rules toml contents")
}

#[cfg(test)]
mod tests {
    use super::{parse_rules, play_turn, protocol::RawTurn};
    use rum_fleet_core::{EntityId, Rules, ShipCommand, Steering};
    use rum_fleet_system_helm::Helm;
    use rum_fleet_world::{query, World};

    fn turn(ally_ships: usize, records: &[&str]) -> RawTurn {
        RawTurn {
            ally_ships,
            records: records.iter().map(|record| (*record).to_owned()).collect(),
        }
    }

    #[test]
    fn partial_rules_keep_remaining_defaults() {
        let rules = parse_rules("firing_range = 6\nno_barrel_mode = true\n").expect("rules parse");
        assert_eq!(rules.firing_range, 6);
        assert!(rules.no_barrel_mode);
        assert_eq!(rules.map_width, Rules::default().map_width);
    }

    #[test]
    fn unknown_rule_names_are_rejected() {
        assert!(parse_rules("cannon_range = 6\n").is_err());
    }

    #[test]
    fn mine_cooldown_is_not_configurable() {
        assert!(parse_rules("mine_cooldown = 5\n").is_err());
    }

    #[test]
    fn undecodable_turn_waits_for_every_announced_ship() {
        let mut world = World::default();
        let mut helm = Helm::new();
        let mut decisions = Vec::new();

        let commands = play_turn(
            &mut world,
            &mut helm,
            &turn(2, &["0 SHIP 3 3 9 1 100 1"]),
            &mut decisions,
        );
        assert_eq!(commands, vec![ShipCommand::FALLBACK; 2]);
        assert!(query::ledger(&world).is_empty());
    }

    #[test]
    fn commands_follow_ship_reporting_order() {
        let mut world = World::default();
        let mut helm = Helm::new();
        let mut decisions = Vec::new();

        let commands = play_turn(
            &mut world,
            &mut helm,
            &turn(
                2,
                &[
                    "4 SHIP 10 10 0 1 100 1",
                    "7 SHIP 3 15 0 0 90 0",
                    "2 SHIP 18 4 3 1 80 1",
                    "9 BARREL 12 10 5 0 0 0",
                ],
            ),
            &mut decisions,
        );
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], ShipCommand::Steer(Steering::Wait));
        let ids: Vec<_> = decisions.iter().map(|decision| decision.ship).collect();
        assert_eq!(ids, vec![EntityId::new(4), EntityId::new(2)]);
        assert_eq!(query::ledger(&world).len(), 1);
    }
}
