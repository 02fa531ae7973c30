//! CLI entry point for bhishaj

mod chat;
mod commands;

use anyhow::Result;
use bhishaj_core::config::{Config, ConfigLoader};
use bhishaj_core::habits::better_habits;
use bhishaj_core::logging::init_logging;
use bhishaj_core::media::{FsMediaPicker, MediaPicker, MediaRequest, PickOutcome};
use bhishaj_core::xray::{AnalysisState, XrayAnalysis, ANALYSIS_DISCLAIMER};
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::Confirm;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "bhishaj")]
#[command(about = "A pocket health assistant")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration
    Onboard {
        /// Overwrite an existing configuration without asking
        #[arg(short, long)]
        force: bool,
    },
    /// Show configuration
    Status,
    /// Chat with the assistant
    Chat {
        /// Start with example conversations
        #[arg(short, long)]
        seed: bool,
    },
    /// Show the better-habits cards
    Habits,
    /// Run the X-ray analysis on an image
    Xray {
        /// Image file to analyze
        image: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };

    if let Commands::Onboard { force } = cli.command {
        return run_onboard(&config_loader, force);
    }

    let config = config_loader.load()?;
    let _log_guard = init_logging(&config.logging);

    match cli.command {
        Commands::Onboard { .. } => {}
        Commands::Status => {
            info!("Showing status");
            run_status(&config_loader, &config)?;
        }
        Commands::Chat { seed } => {
            chat::run_chat(&config, seed).await?;
        }
        Commands::Habits => run_habits(),
        Commands::Xray { image } => {
            info!("Running X-ray analysis");
            run_xray(&config, image).await?;
        }
    }

    Ok(())
}

/// Write the default config file
fn run_onboard(loader: &ConfigLoader, force: bool) -> Result<()> {
    println!("{}", style("Welcome to Bhishaj!").bold().cyan());

    if loader.config_path().exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt("Configuration already exists. Overwrite?")
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Onboard cancelled.");
            return Ok(());
        }
    }

    loader.save(&Config::default())?;
    println!(
        "{} {}",
        style("Config written to").green(),
        loader.config_path().display()
    );
    Ok(())
}

fn run_status(loader: &ConfigLoader, config: &Config) -> Result<()> {
    println!("{}", style("Bhishaj Status").bold().cyan());
    println!("Version: {}\n", env!("CARGO_PKG_VERSION"));

    let exists = loader.config_path().exists();
    println!("{}", style("Configuration:").bold());
    println!(
        "  Config file: {} ({})",
        loader.config_path().display(),
        if exists {
            style("found").green()
        } else {
            style("defaults").yellow()
        }
    );
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn run_habits() {
    println!("{}", style("Better Habits").bold());
    for habit in better_habits() {
        println!("{}. {}", habit.id, style(habit.title).bold());
        println!("   {}", habit.description);
    }
}

async fn run_xray(config: &Config, image: PathBuf) -> Result<()> {
    let picker = FsMediaPicker::new(vec![image]);
    let attachment = match picker.pick(MediaRequest::Images).await? {
        PickOutcome::Picked(mut picked) if !picked.is_empty() => picked.remove(0),
        PickOutcome::Denied(reason) => {
            println!("{}", style(format!("Permission required: {}", reason)).yellow());
            return Ok(());
        }
        _ => return Ok(()),
    };

    let mut analysis = XrayAnalysis::new(config.xray.clone());
    analysis.select_image(attachment.uri);
    analysis.analyze();

    println!("Analyzing {}...", attachment.name);
    if let Some(remaining) = analysis.remaining() {
        tokio::time::sleep(remaining).await;
        analysis.advance(remaining);
    }

    if let AnalysisState::Complete { result, .. } = analysis.state() {
        println!("{}", style("Analysis Complete").bold().green());
        println!("{}", result);
        println!("{}", style(ANALYSIS_DISCLAIMER).dim());
    }
    Ok(())
}
