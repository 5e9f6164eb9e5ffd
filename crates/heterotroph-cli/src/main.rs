//! Headless driver for the Heterotroph simulation.
//!
//! Reads commands from a script file (first argument) or stdin, plays them
//! through a session, and prints the final game snapshot as JSON on stdout.
//! Logs go to stderr; set `RUST_LOG` to change verbosity.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `heterotroph-config.yaml`
//! 3. Read the script
//! 4. Run it and print the snapshot

mod driver;

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use heterotroph_core::GameConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Configuration file looked up in the working directory.
const CONFIG_FILE: &str = "heterotroph-config.yaml";

fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("heterotroph starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        policy = ?config.rules.policy,
        default_scenario = %config.session.default_scenario,
        max_turns = config.session.max_turns,
        "Configuration loaded"
    );

    // 3. Read the script.
    let script = read_script(std::env::args().nth(1).as_deref())?;

    // 4. Run it.
    let summary = driver::run_script(&config, &script).context("script failed")?;
    info!(
        commands = summary.commands,
        stop = ?summary.stop,
        outcome = ?summary.snapshot.outcome,
        "heterotroph finished"
    );

    let json = serde_json::to_string_pretty(&summary.snapshot)
        .context("failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}

/// Load configuration from [`CONFIG_FILE`], or defaults if it is absent.
fn load_config() -> anyhow::Result<GameConfig> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        GameConfig::from_file(path).with_context(|| format!("loading {CONFIG_FILE}"))
    } else {
        info!("Config file not found, using defaults");
        Ok(GameConfig::default())
    }
}

/// Read the script from `path`, or from stdin when no path is given.
fn read_script(path: Option<&str>) -> anyhow::Result<String> {
    if let Some(path) = path {
        return std::fs::read_to_string(path).with_context(|| format!("reading script {path}"));
    }
    let mut script = String::new();
    std::io::stdin()
        .read_to_string(&mut script)
        .context("reading script from stdin")?;
    Ok(script)
}
