use std::path::PathBuf;

use clap::{Parser, Subcommand};
use genius_logging::{LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "codebase-genius",
    version,
    about = "Send a GitHub repository to Codebase Genius, or build a Markdown stub locally"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: ./genius.ron, optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Inference endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Directory that receives generated downloads
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to ./genius.log (terminal logging stays on)
    #[arg(long, global = true)]
    pub log_file: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a repository link to the inference endpoint and print the report
    Submit {
        /// GitHub repository URL or any free-form text
        link: String,
    },
    /// Write `# Codebase Genius` plus the text to output.md
    Generate {
        /// Document body
        text: String,
    },
    /// Interactive session: plain lines set the input; :submit, :generate, :quit
    Session,
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        if self.log_file {
            LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE))
        } else {
            LogDestination::Terminal
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}
