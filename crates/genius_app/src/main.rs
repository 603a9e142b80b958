mod cli;
mod config;
mod terminal;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use anyhow::Context;
use clap::Parser;
use genius_core::Msg;
use genius_logging::genius_debug;

use cli::{Cli, Command};
use config::{AppConfig, DEFAULT_CONFIG_FILE};
use terminal::{App, EffectRunner};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    genius_logging::initialize(&cli.log_destination(), cli.log_level());

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = AppConfig::load(&config_path, cli.config.is_some())?;
    config.apply_env(|key| std::env::var(key).ok());
    config.apply_overrides(&cli.overrides());
    genius_debug!(
        "endpoint={} output_dir={:?} token_set={}",
        config.endpoint,
        config.output_dir,
        config.token.is_some()
    );

    let (tx, rx) = mpsc::channel();
    let effects = EffectRunner::new(
        config.endpoint_settings(),
        config.output_dir.clone(),
        tx.clone(),
    )
    .context("failed to start engine")?;
    let mut app = App::new(effects, rx, io::stdout());

    match cli.command {
        Command::Submit { link } => terminal::run_once(&mut app, link, Msg::SubmitClicked)?,
        Command::Generate { text } => terminal::run_once(&mut app, text, Msg::GenerateClicked)?,
        Command::Session => {
            println!("Enter text to set the input. Commands: :submit, :generate, :quit");
            terminal::run_session(&mut app, io::BufReader::new(io::stdin()), tx)?;
        }
    }

    Ok(if app.view().failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
