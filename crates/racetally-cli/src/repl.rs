//! Interactive command loop.
//!
//! Reads one command per line from stdin and drives the tracker. Command
//! dispatch is wrapped in a panic guard: a capture that trips an unexpected
//! internal fault is reported and the loop keeps running.

use std::io::{self, BufRead, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::Local;
use racetally::error::Error;
use racetally::{SnapshotId, Tracker};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Capture,
    List,
    Show(SnapshotId),
    Total,
    Remove(SnapshotId),
    Help,
    Quit,
}

/// Parse a command line. Single-letter aliases follow the long forms.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let word = parts.next()?;
    let arg = parts.next();

    let parse_id = |arg: Option<&str>| arg.and_then(|s| s.parse::<u32>().ok()).map(SnapshotId);

    match word {
        "capture" | "c" => Some(Command::Capture),
        "list" | "l" => Some(Command::List),
        "show" | "s" => parse_id(arg).map(Command::Show),
        "total" | "t" => Some(Command::Total),
        "remove" | "r" => parse_id(arg).map(Command::Remove),
        "help" | "h" | "?" => Some(Command::Help),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

pub fn run(tracker: &mut Tracker) -> anyhow::Result<()> {
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            println!("Unknown command. Type 'help' for the command list.");
            continue;
        };

        if command == Command::Quit {
            break;
        }

        // A panic inside a command must not take the session down with it.
        let outcome = catch_unwind(AssertUnwindSafe(|| dispatch(tracker, command)));
        if outcome.is_err() {
            error!("unexpected internal error while running a command");
            println!("Something went wrong inside the tracker; the session is intact.");
        }
    }

    Ok(())
}

fn dispatch(tracker: &mut Tracker, command: Command) {
    match command {
        Command::Capture => match tracker.capture_once() {
            Ok(id) => {
                let listed = tracker.list_snapshots();
                if let Some((_, map, _)) = listed.iter().find(|(i, _, _)| *i == id) {
                    println!("Recorded race {} on map {}.", id, map);
                }
                show_snapshot(tracker, id);
            }
            Err(e) => println!("{}", capture_error_message(&e)),
        },
        Command::List => {
            if tracker.session().is_empty() {
                println!("No races recorded yet.");
                return;
            }
            for (id, map, captured_at) in tracker.list_snapshots() {
                let local = captured_at.with_timezone(&Local);
                println!("{:>3}  {}  {}", id, local.format("%H:%M:%S %d.%m.%y"), map);
            }
        }
        Command::Show(id) => show_snapshot(tracker, id),
        Command::Total => {
            let standings = tracker.cumulative_leaderboard();
            if standings.is_empty() {
                println!("No races recorded yet.");
                return;
            }
            for entry in standings {
                println!("{:>3}  {:<20}  {}", entry.rank, entry.name, entry.score);
            }
        }
        Command::Remove(id) => match tracker.remove_snapshot(id) {
            Ok(()) => println!("Race {} removed.", id),
            Err(e) => println!("{}", e),
        },
        Command::Help => print_help(),
        Command::Quit => unreachable!("quit is handled in the loop"),
    }
}

fn show_snapshot(tracker: &Tracker, id: SnapshotId) {
    match tracker.per_snapshot_leaderboard(id) {
        Ok(standings) => {
            for entry in standings {
                println!("{:>3}  {:<20}  {}", entry.rank, entry.name, entry.score);
            }
        }
        Err(e) => println!("{}", e),
    }
}

/// Messages for the conditions a user will actually hit, phrased as advice.
fn capture_error_message(error: &Error) -> String {
    match error {
        Error::ProcessNotFound(name) => {
            format!("The game is not running ({} not found). Start a race first.", name)
        }
        Error::InvalidRaceType(_) => {
            "Only online race results can be recorded, not bot races.".to_string()
        }
        Error::EmptyRoster => {
            "The race reports zero players; it has probably not started yet.".to_string()
        }
        other => format!("Capture failed: {}", other),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  capture (c)      record the current race result");
    println!("  list (l)         list recorded races");
    println!("  show <id> (s)    standings for one race");
    println!("  total (t)        cumulative standings");
    println!("  remove <id> (r)  delete a recorded race");
    println!("  quit (q)         exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("capture"), Some(Command::Capture));
        assert_eq!(parse_command("c"), Some(Command::Capture));
        assert_eq!(parse_command(" list "), Some(Command::List));
        assert_eq!(parse_command("total"), Some(Command::Total));
        assert_eq!(parse_command("q"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_commands_with_id() {
        assert_eq!(parse_command("show 3"), Some(Command::Show(SnapshotId(3))));
        assert_eq!(
            parse_command("remove 12"),
            Some(Command::Remove(SnapshotId(12)))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("frobnicate"), None);
        assert_eq!(parse_command("show"), None);
        assert_eq!(parse_command("remove abc"), None);
    }

    #[test]
    fn test_capture_error_messages_are_user_facing() {
        let msg = capture_error_message(&Error::ProcessNotFound("RCCars.exe".to_string()));
        assert!(msg.contains("RCCars.exe"));

        let msg = capture_error_message(&Error::InvalidRaceType(1));
        assert!(msg.contains("online"));
    }
}
