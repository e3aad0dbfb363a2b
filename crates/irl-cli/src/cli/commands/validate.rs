use std::path::Path;

use crate::exit_codes::SUCCESS;

pub(crate) fn run(config: &Path) -> anyhow::Result<i32> {
    let cfg = super::load(config)?;
    println!(
        "config ok: {} teams, {} measures, ranked on {}",
        cfg.teams.len(),
        cfg.measures.len(),
        cfg.sort_on
    );
    if cfg.trec_eval.is_none() {
        eprintln!("note: no trec_eval section, submissions are disabled");
    }
    Ok(SUCCESS)
}
