//! Pickwise command-line runner.
//!
//! `recommend` drives the pipeline over a single message or a message file;
//! `analyze` scores recommendation files against recorded purchases.

pub mod batch;
pub mod commands;
pub mod config;
pub mod data;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::analyze::AnalyzeArgs;
use crate::commands::recommend::RecommendArgs;
use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(
    name = "pickwise",
    version,
    about = "LLM-backed product recommendations from customer messages",
    after_help = "Examples:\n  pickwise recommend --message \"need wireless earbuds\"\n  pickwise recommend -o recommendations.csv\n  pickwise analyze -r recommendations.csv --compare"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "TOML config file (defaults apply when omitted)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Generate recommendations for one message or the whole message file")]
    Recommend(RecommendArgs),
    #[command(about = "Measure recommendation accuracy against actual purchases")]
    Analyze(AnalyzeArgs),
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Recommend(args) => {
            let config = AppConfig::load(cli.config.as_deref())?;
            commands::recommend::run(&args, &config).await
        }
        Command::Analyze(args) => commands::analyze::run(&args, &mut std::io::stdout()),
    }
}
