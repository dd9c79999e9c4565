use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use weather_core::{Config, Dashboard};

use crate::render::{self, TerminalNotifier};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(
        long,
        global = true,
        default_value = "warn",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: String,

    /// Defaults to the interactive dashboard.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Fetch once and print the dashboard.
    Show {
        /// City name; the configured default city if absent.
        city: Option<String>,
    },

    /// Interactive dashboard: type a city and press enter, `:q` to quit.
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
            Command::Dashboard => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut cfg = Config::load_from(&path)?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Get a free key at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;

    let default_city = inquire::Text::new("Default city:")
        .with_default(&cfg.default_city)
        .prompt()
        .context("Failed to read default city")?;

    cfg.api_key = Some(api_key.trim().to_string());
    if !default_city.trim().is_empty() {
        cfg.default_city = default_city.trim().to_string();
    }

    cfg.save_to(&path)?;
    println!("Configuration saved to {}", path.display());

    if !cfg.has_api_key() {
        println!("Warning: the stored API key is empty or a placeholder; fetches will be skipped.");
    }

    Ok(())
}

fn open_dashboard() -> anyhow::Result<Dashboard> {
    let config = Config::load()?;
    Ok(Dashboard::new(&config, Arc::new(TerminalNotifier)))
}

async fn show(city: Option<String>) -> anyhow::Result<()> {
    let mut dashboard = open_dashboard()?;

    match city {
        Some(city) => {
            dashboard.update_draft(city);
            if dashboard.commit().is_none() {
                dashboard.fetch_current_city();
            }
        }
        None => {
            dashboard.fetch_current_city();
        }
    }

    dashboard.settle_all().await;
    render::print(&dashboard);
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let mut dashboard = open_dashboard()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    dashboard.fetch_current_city();
    render::print(&dashboard);
    render::prompt(dashboard.state().is_loading());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if line.trim() == ":q" {
                    break;
                }

                dashboard.update_draft(line);
                if dashboard.commit().is_some() {
                    render::print(&dashboard);
                }
                render::prompt(dashboard.state().is_loading());
            }
            Some(outcome) = dashboard.next_outcome() => {
                dashboard.apply(outcome);
                render::print(&dashboard);
                render::prompt(dashboard.state().is_loading());
            }
        }
    }

    Ok(())
}
