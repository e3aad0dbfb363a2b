use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "irl",
    version,
    about = "Leaderboard for information retrieval runs scored with trec_eval"
)]
pub struct Cli {
    /// Leaderboard configuration (YAML, or the JSON config.json layout)
    #[arg(long, global = true, default_value = "config.json", env = "IRL_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a run file with trec_eval and store its scores
    Submit(SubmitArgs),
    /// Store a report already produced by trec_eval
    Ingest(IngestArgs),
    /// Print the ranked leaderboard
    Leaderboard(LeaderboardArgs),
    /// Print the stored runs of one team
    Runs(RunsArgs),
    /// Check the configuration and exit
    Validate,
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SubmitArgs {
    #[arg(long)]
    pub team: String,

    /// Team secret, as listed in the configuration
    #[arg(long, env = "IRL_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Run file in TREC result format (.txt or .res)
    pub run: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct IngestArgs {
    #[arg(long)]
    pub team: String,

    /// Store under this run id instead of the report's `runid` line
    #[arg(long)]
    pub run_id: Option<String>,

    /// trec_eval report, or `-` for stdin
    pub report: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LeaderboardArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunsArgs {
    #[arg(long)]
    pub team: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
