use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use irl_core::{decode, EvalResult, AGGREGATE_TOPIC};
use tracing::info;

use super::super::args::IngestArgs;
use crate::exit_codes::{REJECTED, SUCCESS};

pub(crate) fn run(config: &Path, args: IngestArgs) -> anyhow::Result<i32> {
    let cfg = super::load(config)?;
    if !cfg.teams.contains_key(&args.team) {
        eprintln!("unknown team {}", args.team);
        return Ok(REJECTED);
    }

    let mut result = read_report(&args.report)?;
    match args.run_id {
        Some(run_id) => result.run_id = run_id,
        None if result.run_id.is_empty() => {
            eprintln!(
                "{} has no runid line; pass --run-id",
                args.report.display()
            );
            return Ok(REJECTED);
        }
        None => {}
    }

    let measures = result.aggregate().map_or(0, |m| m.len());
    if measures == 0 {
        eprintln!(
            "{} has no measures on topic {AGGREGATE_TOPIC}; nothing to store",
            args.report.display()
        );
        return Ok(REJECTED);
    }

    let store = super::open_store(&cfg)?;
    store.put(&args.team, &result.run_id, &result)?;

    info!(team = %args.team, run_id = %result.run_id, measures, "ingested report");
    println!(
        "stored {} ({}): {} measures",
        cfg.display_name(&args.team),
        result.run_id,
        measures
    );
    Ok(SUCCESS)
}

fn read_report(path: &Path) -> anyhow::Result<EvalResult> {
    if path.as_os_str() == "-" {
        return decode(std::io::stdin().lock()).context("decoding report from stdin");
    }
    let file =
        File::open(path).with_context(|| format!("failed to open report {}", path.display()))?;
    decode(BufReader::new(file)).with_context(|| format!("decoding {}", path.display()))
}
