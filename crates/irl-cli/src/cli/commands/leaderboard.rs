use std::path::Path;

use irl_core::leaderboard;

use super::super::args::{LeaderboardArgs, OutputFormat};
use super::super::output::render_leaderboard;
use crate::exit_codes::SUCCESS;

pub(crate) fn run(config: &Path, args: LeaderboardArgs) -> anyhow::Result<i32> {
    let cfg = super::load(config)?;
    let store = super::open_store(&cfg)?;
    let board = leaderboard::build(&cfg.leaderboard(), &store)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_leaderboard(&board, &cfg.title)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&board)?),
    }
    Ok(SUCCESS)
}
