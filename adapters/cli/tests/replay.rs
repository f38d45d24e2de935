use std::{io::Write, process::{Command, Stdio}};

fn play(input: &str) -> String {
    let mut child = Command::new(env!("CARGO_BIN_EXE_rum-fleet"))
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to launch rum-fleet binary");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write turn input");

    let output = child.wait_with_output().expect("rum-fleet runs to completion");
    assert!(output.status.success(), "rum-fleet should exit cleanly");
    String::from_utf8(output.stdout).expect("commands are utf-8")
}

#[test]
fn sails_towards_a_barrel_ahead() {
    let commands = play("1\n2\n0 SHIP 10 10 0 1 100 1\n1 BARREL 12 10 5 0 0 0\n");
    assert_eq!(commands, "WAIT\n");
}

#[test]
fn fires_at_an_enemy_in_range() {
    let commands = play("1\n2\n0 SHIP 10 10 0 0 100 1\n1 SHIP 13 10 0 0 100 0\n");
    assert_eq!(commands, "FIRE 13 10\n");
}

#[test]
fn cannon_cools_down_between_turns() {
    let turn = "1\n2\n0 SHIP 10 10 0 0 100 1\n1 SHIP 13 10 0 0 100 0\n";
    let commands = play(&format!("{turn}{turn}{turn}"));
    let lines: Vec<_> = commands.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "FIRE 13 10");
    assert!(!lines[1].starts_with("FIRE"));
    assert_eq!(lines[2], "FIRE 13 10");
}

#[test]
fn bad_turn_waits_and_play_continues() {
    let commands = play(
        "2\n1\n0 SHIP 3 3 9 1 100 1\n1\n2\n0 SHIP 10 10 0 1 100 1\n1 BARREL 12 10 5 0 0 0\n",
    );
    assert_eq!(commands, "WAIT\nWAIT\nWAIT\n");
}
