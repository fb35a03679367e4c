//! `libos-probe`: command-line front end for the libos API.
//!
//! # Usage
//!
//! ```text
//! libos-probe [--config <PATH>] <COMMAND>
//!
//! Commands:
//!   info                       OS and kernel identification
//!   pressed                    Keys currently held
//!   press <COMBO>              Press a combination, e.g. "Ctrl+Shift+T"
//!   release <COMBO>            Release a combination
//!   click <COMBO>              Press then release
//!   double-click <COMBO>       Click twice
//!   wait <COMBO> [--timeout-ms N]
//!                              Block until the combination is held
//! ```
//!
//! Log verbosity comes from `RUST_LOG` when set, otherwise from the
//! `[logging] level` entry of the config file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use libos::config::{default_config_path, LibosConfig};
use libos::system::{kernel, os};
use libos::Keyboard;
use libos_core::KeyCombination;

/// Poll interval of the `wait` command.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Query the OS and simulate keyboard input.
#[derive(Debug, Parser)]
#[command(name = "libos-probe", version)]
struct Cli {
    /// Config file; defaults to the per-user location.
    #[arg(long, global = true, env = "LIBOS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print OS and kernel identification.
    Info,
    /// Print the keys currently held.
    Pressed,
    /// Press every key of a combination.
    Press { combo: KeyCombination },
    /// Release every key of a combination.
    Release { combo: KeyCombination },
    /// Press then release a combination.
    Click { combo: KeyCombination },
    /// Click a combination twice.
    DoubleClick { combo: KeyCombination },
    /// Wait until every key of a combination is held.
    Wait {
        combo: KeyCombination,
        /// Give up after this many milliseconds (default: wait forever).
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => LibosConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => match default_config_path() {
            Some(path) => LibosConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => LibosConfig::default(),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let keyboard = Keyboard::from_config(&config.keyboard);

    match cli.command {
        Command::Info => print_info(),
        Command::Pressed => {
            let keys = keyboard.pressed_keys()?;
            println!("{keys}");
        }
        Command::Press { combo } => keyboard.press(&combo)?,
        Command::Release { combo } => keyboard.release(&combo)?,
        Command::Click { combo } => keyboard.click(&combo)?,
        Command::DoubleClick { combo } => keyboard.double_click(&combo)?,
        Command::Wait { combo, timeout_ms } => {
            let timeout = timeout_ms.map(Duration::from_millis);
            if !wait_for(&keyboard, &combo, timeout)? {
                info!(%combo, "timed out");
                return Ok(ExitCode::FAILURE);
            }
            println!("{combo}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_info() {
    let os = os::info();
    let kernel = kernel::info();
    println!("os.type            {}", os.os_type);
    println!("os.name            {}", os.name);
    println!("os.pretty_name     {}", os.pretty_name);
    println!("os.codename        {}", os.codename);
    println!("os.version         {}", os.version);
    println!("os.version_string  {}", os.version_string);
    println!("kernel.name        {}", kernel.name);
    println!("kernel.version     {}", kernel.version);
    println!("kernel.release     {}", kernel.version_string);
}

/// Polls until `combo` is held.  Returns `false` on timeout.
fn wait_for(
    keyboard: &Keyboard,
    combo: &KeyCombination,
    timeout: Option<Duration>,
) -> anyhow::Result<bool> {
    let started = Instant::now();
    loop {
        if keyboard.is_pressed(combo)? {
            return Ok(true);
        }
        if timeout.is_some_and(|limit| started.elapsed() >= limit) {
            return Ok(false);
        }
        thread::sleep(WAIT_POLL_INTERVAL);
    }
}
