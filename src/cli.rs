//! Command-line interface parsing.

use clap::Parser;
use std::path::PathBuf;

/// DAYCAST - today, tomorrow and the day after from an hourly forecast
#[derive(Parser, Debug)]
#[command(name = "daycast")]
#[command(about = "Summarise an hourly forecast into today, tomorrow and the day after")]
#[command(version)]
pub struct Cli {
    /// Forecast URL (overrides DAYCAST_URL and the config file)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Path to the TOML config file
    #[arg(long, value_name = "PATH", default_value = "config.toml")]
    pub config: PathBuf,

    /// Serve the dashboard and refresh periodically instead of printing once
    #[arg(long)]
    pub serve: bool,

    /// Print the one-shot report as JSON
    #[arg(long, conflicts_with = "serve")]
    pub json: bool,
}
