// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the interactive demo runs. Subcommands:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults
// - script <steps...>: Run navigation steps headlessly and print each state

use crate::config::{Config, VERSION};
use crate::effects::EffectRegistry;
use crate::headless::{self, StepReport};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

/// panelswap - panel container with directional enter/exit transitions
#[derive(Parser)]
#[command(name = "panelswap")]
#[command(version = VERSION)]
#[command(about = "Panel container with directional enter/exit transitions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Run navigation steps without a terminal UI
    Script {
        /// Steps: next, prev, end, end:N, bubble:N
        #[arg(required = true)]
        steps: Vec<String>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
}

/// What main should do after argument parsing
pub enum Dispatch {
    /// A subcommand ran to completion
    Handled,
    /// Run a headless script (needs logging, so main owns it)
    Script { steps: Vec<String>, json: bool },
    /// No subcommand: run the demo
    Demo,
}

/// Parse arguments and run the config subcommands directly
pub fn handle_cli() -> Result<Dispatch> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show()?;
            } else if reset {
                handle_config_reset()?;
            } else {
                // No flag provided, show help
                println!("Usage: panelswap config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(Dispatch::Handled)
        }
        Some(Commands::Script { steps, json }) => Ok(Dispatch::Script { steps, json }),
        None => Ok(Dispatch::Demo),
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    let unresolved = config
        .presentation
        .transition
        .unresolved(EffectRegistry::builtin());
    if !unresolved.is_empty() {
        println!();
        println!("# Unknown effects (no directional classes): {}", unresolved.join(", "));
    }

    // Show source info
    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    // Write the default config (using Config's single source of truth)
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

/// Run a headless script and print one report per step
pub fn run_script(config: &Config, steps: &[String], json: bool) -> Result<()> {
    let steps = headless::parse_steps(steps)?;
    let reports = headless::run_script(config, &steps)?;
    print_reports(&reports, json)
}

fn print_reports(reports: &[StepReport], json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, reports).context("Failed to encode reports")?;
        writeln!(out)?;
    } else {
        for report in reports {
            writeln!(out, "{}", report)?;
        }
    }
    Ok(())
}
