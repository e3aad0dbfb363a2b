mod dispatch;
pub mod ingest;
pub mod leaderboard;
pub mod runs;
pub mod submit;
pub mod validate;

pub use dispatch::dispatch;

use anyhow::Context;
use irl_core::{load_config, AppConfig, RunStore};
use std::path::Path;

pub(crate) fn load(config: &Path) -> anyhow::Result<AppConfig> {
    load_config(config).with_context(|| format!("loading {}", config.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

pub(crate) fn open_store(cfg: &AppConfig) -> anyhow::Result<RunStore> {
    ensure_parent_dir(&cfg.database)?;
    RunStore::open(&cfg.database)
        .with_context(|| format!("opening database {}", cfg.database.display()))
}
