//! Terminal client for the roguelike core.
//!
//! Assembles a session from optional config, loadout and scenario files,
//! then hands the player's turns to stdin (or a command script) and
//! everyone else's to the built-in AI.
//!
//! ```bash
//! rogue --scenario data/scenarios/arena.ron --loadout data/loadout.ron
//! rogue --script moves.txt --seed 42
//! ```

mod config;
mod input;
mod logging;
mod render;
mod session;
mod terminal;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rogue_core::{Controllers, DriverError, GameEnv, GameError, PcgRng, SessionEnd, TurnDriver};

use config::ClientConfig;
use session::SessionSources;
use terminal::{SharedSight, TerminalController};

/// Turn-based roguelike in the terminal
#[derive(Parser, Debug)]
#[command(name = "rogue")]
#[command(version, about, long_about = None)]
struct Args {
    /// Rules configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ability hotbar (RON)
    #[arg(long)]
    loadout: Option<PathBuf>,

    /// Map and initial actors (RON); a built-in arena otherwise
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Overrides the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Reads commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let client_config = ClientConfig::from_env();

    let log_dir = client_config
        .log_dir
        .clone()
        .unwrap_or_else(logging::default_log_dir);
    let log_file = logging::setup_logging(&log_dir, client_config.session_id.as_deref())?;

    let sources = SessionSources {
        config: args.config,
        loadout: args.loadout,
        scenario: args.scenario,
        seed: args.seed,
    };
    let mut session = sources.load()?;

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let sight = SharedSight::new(session.config.vision_radius);
    let terminal = TerminalController::new(
        reader,
        io::stdout(),
        sight.clone(),
        client_config.message_lines,
    );
    let mut controllers = Controllers::new(terminal);
    let mut visibility = sight;

    let rng = PcgRng;
    let env = GameEnv::new(&session.map, &rng, &session.config);
    let end = TurnDriver::new(&mut session.state, env, &mut controllers, &mut visibility)
        .run()
        .map_err(driver_failure)?;

    for line in session.state.log.messages().iter().rev().take(3).rev() {
        println!("{line}");
    }
    match end {
        SessionEnd::PlayerLost => println!("You died after {} turns.", session.state.turn.player_turns),
        SessionEnd::Quit => println!("Bye."),
    }
    tracing::info!(?end, log = %log_file.display(), "session finished");
    Ok(())
}

/// Logs a driver failure at the level its severity calls for and wraps it
/// with its stable code for the exit message.
fn driver_failure(error: DriverError) -> anyhow::Error {
    let severity = error.severity();
    let code = error.error_code();
    if severity.is_internal() {
        tracing::error!(code, severity = severity.as_str(), %error, "turn driver stopped");
    } else {
        tracing::warn!(code, severity = severity.as_str(), %error, "turn driver gave up");
    }
    anyhow::Error::new(error).context(format!("session aborted ({} error {code})", severity.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rogue_core::EntityId;

    #[test]
    fn driver_failure_carries_severity_and_code() {
        let error = driver_failure(DriverError::StaleScheduleEntry(EntityId(4)));

        assert_eq!(
            error.to_string(),
            "session aborted (fatal error DRIVER_STALE_SCHEDULE_ENTRY)"
        );
        assert_eq!(
            error.downcast_ref::<DriverError>(),
            Some(&DriverError::StaleScheduleEntry(EntityId(4)))
        );
    }
}
