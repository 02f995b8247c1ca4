// SPDX-License-Identifier: MIT
//
// lash: a terminal shell chrome drawn with raw ANSI escape sequences.
//
// This is the binary that wires the crates together:
//
//   lash-term → terminal geometry, palette colors, escape sequences,
//               the scoped alternate screen
//   lash-view → regions and the splash
//
// Startup order matters. The splash asset is loaded before the alternate
// screen is entered, so a missing file is reported on the user's own
// screen. Once the screen is up, every way out (exit, end of input, error,
// panic, Ctrl-C) restores it.

mod config;
mod logging;
mod shell;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use lash_term::{Tput, interrupt, surface};
use lash_view::{Rect, Region, Splash};

use config::{Cli, Config};
use shell::{Session, Shell};

/// The region drawn under the banner at startup.
const DEMO_REGION: Rect = Rect::new(0, 0, 5, 3);

fn run(config: &Config) -> Result<Session> {
    let splash = config
        .splash
        .as_deref()
        .map(|path| Splash::load(path))
        .transpose()
        .context("loading the splash")?;

    let mut shell = Shell::new(Tput::default(), config.row_span);
    if let Some(splash) = splash {
        shell = shell.with_splash(splash, config.splash_delay);
    }

    let mut region = Region::plain(DEMO_REGION)?;
    region.set_bg(config.region_style.bg);
    region.set_fg(config.region_style.fg);
    shell.add_view(region);

    info!(
        regions = shell.views().len(),
        row_span = ?config.row_span,
        "starting shell"
    );

    let stdin = io::stdin();
    shell.run(stdin.lock(), io::stdout())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let config = Config::from(Cli::parse());
    let _logging = logging::init(&config.log_dir);

    surface::install_panic_hook();
    interrupt::install_handler();

    match run(&config) {
        Ok(session) => {
            info!(exit = ?session.exit, lines = session.lines, "bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "lash failed");
            eprintln!("lash: {message}");
            ExitCode::FAILURE
        }
    }
}
