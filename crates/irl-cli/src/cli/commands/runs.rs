use std::path::Path;

use super::super::args::{OutputFormat, RunsArgs};
use super::super::output::render_runs;
use crate::exit_codes::SUCCESS;

pub(crate) fn run(config: &Path, args: RunsArgs) -> anyhow::Result<i32> {
    let cfg = super::load(config)?;
    let store = super::open_store(&cfg)?;
    let runs = store.get_all_for_team(&args.team)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_runs(&args.team, &runs)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&runs)?),
    }
    Ok(SUCCESS)
}
