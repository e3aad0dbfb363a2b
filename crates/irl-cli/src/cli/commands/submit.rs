use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use irl_core::{extract_run_id_from_reader, TrecEval};
use tracing::info;

use super::super::args::SubmitArgs;
use crate::exit_codes::{REJECTED, SUCCESS};

const PERMITTED_EXTENSIONS: &[&str] = &["txt", "TXT", "res", "RES"];

pub(crate) fn run(config: &Path, args: SubmitArgs) -> anyhow::Result<i32> {
    let cfg = super::load(config)?;

    if !cfg.secrets().authorize(&args.team, &args.secret) {
        eprintln!("invalid secret for team {}", args.team);
        return Ok(REJECTED);
    }
    if !has_permitted_extension(&args.run) {
        eprintln!(
            "wrong file format: {} (expected one of {})",
            args.run.display(),
            PERMITTED_EXTENSIONS.join(", ")
        );
        return Ok(REJECTED);
    }

    let file = File::open(&args.run)
        .with_context(|| format!("failed to open run {}", args.run.display()))?;
    let run_id = extract_run_id_from_reader(BufReader::new(file))
        .with_context(|| format!("reading run id from {}", args.run.display()))?;

    let archived = archive_path(&cfg.runs_dir, &args.team, &run_id, chrono::Utc::now().timestamp());
    super::ensure_parent_dir(&archived)?;
    std::fs::copy(&args.run, &archived)
        .with_context(|| format!("failed to archive run to {}", archived.display()))?;

    let evaluator = TrecEval::from_config(cfg.evaluator()?);
    let result = evaluator
        .evaluate(&archived)
        .with_context(|| format!("evaluating {}", archived.display()))?;

    let store = super::open_store(&cfg)?;
    store.put(&args.team, &run_id, &result)?;

    info!(team = %args.team, run_id = %run_id, archived = %archived.display(), "stored submission");
    println!("stored {} ({})", cfg.display_name(&args.team), run_id);
    Ok(SUCCESS)
}

fn has_permitted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PERMITTED_EXTENSIONS.contains(&ext))
}

/// `<runs_dir>/<team>/<team>.<run_id>.<unix>.run`, spaces and separators
/// replaced by `-`.
fn archive_path(runs_dir: &Path, team: &str, run_id: &str, unix: i64) -> PathBuf {
    let team = sanitize(team);
    runs_dir
        .join(&team)
        .join(format!("{team}.{}.{unix}.run", sanitize(run_id)))
}

fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '-',
            c => c,
        })
        .collect()
}
