//! Leaderboard aggregation over every stored run.
//!
//! Rebuilt from storage on every call; nothing is cached.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::storage::ResultStore;

/// What the leaderboard shows and how it ranks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardConfig {
    /// Measure columns, in display order.
    pub measures: Vec<String>,
    /// Measure the rows are ranked on (descending).
    pub sort_on: String,
    /// Team key -> display name. Only these teams are considered.
    pub team_names: BTreeMap<String, String>,
}

impl LeaderboardConfig {
    pub fn new(measures: Vec<String>, sort_on: impl Into<String>) -> Self {
        Self {
            measures,
            sort_on: sort_on.into(),
            team_names: BTreeMap::new(),
        }
    }

    pub fn with_team(mut self, team: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.team_names.insert(team.into(), display_name.into());
        self
    }

    /// Column of `sort_on`, or `None` if it is not a configured measure.
    pub fn sort_index(&self) -> Option<usize> {
        self.measures.iter().position(|m| *m == self.sort_on)
    }
}

/// One stored run as shown on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub team: String,
    pub run_id: String,
    /// `"<display name> (<run id>)"`
    pub label: String,
    /// Aligned with [`Leaderboard::measures`]; missing measures are `0.0`.
    pub measures: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub measures: Vec<String>,
    pub sort_index: usize,
    pub rows: Vec<LeaderboardRow>,
}

/// Builds the leaderboard from `store`.
///
/// Teams are visited in key order and runs in run id order, so ties keep a
/// reproducible order after the stable sort. Teams without runs produce no
/// rows. The first storage error aborts the build.
///
/// An unknown `sort_on` ranks on the first column. [`crate::AppConfig::validate`]
/// rejects such configurations before they get here.
pub fn build<S: ResultStore>(
    config: &LeaderboardConfig,
    store: &S,
) -> Result<Leaderboard, StoreError> {
    let sort_index = config.sort_index().unwrap_or_else(|| {
        warn!(
            sort_on = %config.sort_on,
            "sort measure is not a configured measure, ranking on the first column"
        );
        0
    });

    let mut rows = Vec::new();
    for (team, display_name) in &config.team_names {
        let runs = store.get_all_for_team(team)?;
        if runs.is_empty() {
            continue;
        }

        for (run_id, result) in runs {
            let measures = config
                .measures
                .iter()
                .map(|m| result.aggregate_measure(m).unwrap_or(0.0))
                .collect();
            rows.push(LeaderboardRow {
                team: team.clone(),
                label: format!("{display_name} ({run_id})"),
                run_id,
                measures,
            });
        }
    }

    if sort_index < config.measures.len() {
        rows.sort_by(|a, b| b.measures[sort_index].total_cmp(&a.measures[sort_index]));
    }

    debug!(rows = rows.len(), sort_index, "built leaderboard");
    Ok(Leaderboard {
        measures: config.measures.clone(),
        sort_index,
        rows,
    })
}
