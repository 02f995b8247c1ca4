//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use lash_term::Color;
use lash_view::{RowSpan, Style};

#[derive(Debug, Parser)]
#[command(name = "lash", version, about = "A terminal shell chrome drawn with raw ANSI escapes")]
pub struct Cli {
    /// Splash asset shown at startup
    #[arg(long, env = "LASH_SPLASH", default_value = "ascii.color", value_name = "PATH")]
    splash: PathBuf,

    /// Skip the splash entirely
    #[arg(long)]
    no_splash: bool,

    /// How long the splash stays up, in milliseconds
    #[arg(long, env = "LASH_SPLASH_DELAY", default_value_t = 1000, value_name = "MS")]
    splash_delay: u64,

    /// Paint exactly `height` rows per region instead of `height + 1`
    #[arg(long)]
    exact_rows: bool,

    /// Background of the demo region (color name or palette index)
    #[arg(long, default_value = "red", value_name = "COLOR")]
    region_bg: Color,

    /// Foreground of the demo region (color name or palette index)
    #[arg(long, default_value = "black", value_name = "COLOR")]
    region_fg: Color,

    /// Directory for the rolling log file
    #[arg(long, env = "LASH_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` when the splash is disabled.
    pub splash: Option<PathBuf>,
    pub splash_delay: Duration,
    pub row_span: RowSpan,
    pub region_style: Style,
    pub log_dir: PathBuf,
}

impl Config {
    fn default_log_dir() -> PathBuf {
        std::env::temp_dir().join("lash").join("logs")
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            splash: (!cli.no_splash).then_some(cli.splash),
            splash_delay: Duration::from_millis(cli.splash_delay),
            row_span: if cli.exact_rows {
                RowSpan::Exact
            } else {
                RowSpan::Inclusive
            },
            region_style: Style::new(cli.region_bg, cli.region_fg),
            log_dir: cli.log_dir.unwrap_or_else(Self::default_log_dir),
        }
    }
}
