//! Leaderboard configuration.
//!
//! Loaded from YAML. The older `config.json` layout, where `teams` maps each
//! team straight to its secret, parses unchanged.
//!
//! ```yaml
//! title: "TAR 2025"
//! database: irl.redb
//! measures: [map, P_10, ndcg_cut_10]
//! sort_on: map
//! teams:
//!   sheffield: { secret: "s3cr3t", name: "University of Sheffield" }
//!   waterloo: "an0ther"
//! trec_eval:
//!   bin: trec_eval/trec_eval
//!   args: "-q"
//!   qrels: qrels/task1.test.qrels
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::leaderboard::LeaderboardConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub header: String,

    /// redb database file.
    pub database: PathBuf,

    /// Where submitted run files are archived.
    #[serde(default = "default_runs_dir")]
    pub runs_dir: PathBuf,

    /// Leaderboard columns, in order.
    pub measures: Vec<String>,

    /// Measure the leaderboard is ranked on.
    pub sort_on: String,

    #[serde(default)]
    pub teams: BTreeMap<String, TeamConfig>,

    #[serde(default)]
    pub trec_eval: Option<TrecEvalConfig>,
}

fn default_runs_dir() -> PathBuf {
    PathBuf::from("runs")
}

/// A participating team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TeamConfigRepr")]
pub struct TeamConfig {
    /// Shared secret a submission must present.
    pub secret: String,

    /// Display name on the leaderboard; the team key when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TeamConfigRepr {
    Secret(String),
    Full {
        secret: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<TeamConfigRepr> for TeamConfig {
    fn from(repr: TeamConfigRepr) -> Self {
        match repr {
            TeamConfigRepr::Secret(secret) => Self { secret, name: None },
            TeamConfigRepr::Full { secret, name } => Self { secret, name },
        }
    }
}

/// How to invoke `trec_eval`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrecEvalConfig {
    pub bin: PathBuf,

    /// Extra arguments, whitespace separated, placed before the qrels file.
    #[serde(default)]
    pub args: String,

    pub qrels: PathBuf,

    /// Leading lines of evaluator output to drop before decoding.
    #[serde(default)]
    pub skip_lines: usize,
}

impl AppConfig {
    /// Rejects configurations the leaderboard cannot rank or authorize with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.measures.is_empty() {
            return Err(ConfigError::NoMeasures);
        }
        for (i, measure) in self.measures.iter().enumerate() {
            if self.measures[..i].contains(measure) {
                return Err(ConfigError::DuplicateMeasure(measure.clone()));
            }
        }
        if !self.measures.contains(&self.sort_on) {
            return Err(ConfigError::UnknownSortMeasure {
                sort_on: self.sort_on.clone(),
            });
        }

        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for (team, cfg) in &self.teams {
            if team.is_empty() {
                return Err(ConfigError::EmptyTeam);
            }
            if let Some(first) = seen.insert(&cfg.secret, team) {
                return Err(ConfigError::DuplicateSecret {
                    first: first.to_string(),
                    second: team.clone(),
                });
            }
        }
        Ok(())
    }

    /// Display name of `team`, falling back to its key.
    pub fn display_name<'a>(&'a self, team: &'a str) -> &'a str {
        self.teams
            .get(team)
            .and_then(|t| t.name.as_deref())
            .unwrap_or(team)
    }

    pub fn leaderboard(&self) -> LeaderboardConfig {
        LeaderboardConfig {
            measures: self.measures.clone(),
            sort_on: self.sort_on.clone(),
            team_names: self
                .teams
                .keys()
                .map(|team| (team.clone(), self.display_name(team).to_string()))
                .collect(),
        }
    }

    pub fn secrets(&self) -> SecretDirectory {
        SecretDirectory::new(
            self.teams
                .iter()
                .map(|(team, cfg)| (cfg.secret.clone(), team.clone())),
        )
    }

    pub fn evaluator(&self) -> Result<&TrecEvalConfig, ConfigError> {
        self.trec_eval.as_ref().ok_or(ConfigError::MissingEvaluator)
    }
}

/// Reads, parses and validates the configuration at `path`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: AppConfig = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Secret -> team lookup, built once from the configuration.
#[derive(Debug, Clone, Default)]
pub struct SecretDirectory {
    by_secret: BTreeMap<String, String>,
}

impl SecretDirectory {
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            by_secret: entries.into_iter().collect(),
        }
    }

    /// Team owning `secret`.
    pub fn team_for_secret(&self, secret: &str) -> Option<&str> {
        self.by_secret.get(secret).map(String::as_str)
    }

    /// True if `secret` belongs to `team`.
    pub fn authorize(&self, team: &str, secret: &str) -> bool {
        self.team_for_secret(secret) == Some(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
title: "TAR"
database: /tmp/irl.redb
measures: [map, P_10]
sort_on: P_10
teams:
  sheffield: { secret: "s1", name: "University of Sheffield" }
  waterloo: "s2"
trec_eval:
  bin: /usr/local/bin/trec_eval
  args: "-q -m all_trec"
  qrels: qrels.txt
"#;

    fn parse(raw: &str) -> AppConfig {
        serde_yaml::from_str(raw).expect("valid config")
    }

    #[test]
    fn parses_both_team_forms() {
        let cfg = parse(YAML);
        assert_eq!(cfg.teams["waterloo"].secret, "s2");
        assert_eq!(cfg.teams["waterloo"].name, None);
        assert_eq!(cfg.display_name("waterloo"), "waterloo");
        assert_eq!(cfg.display_name("sheffield"), "University of Sheffield");
        assert_eq!(cfg.runs_dir, PathBuf::from("runs"));
        assert_eq!(cfg.evaluator().unwrap().skip_lines, 0);
        cfg.validate().unwrap();
    }

    #[test]
    fn parses_legacy_json_config() {
        let cfg = parse(
            r#"{
                "teams": {"ielab": "secret"},
                "database": "scores.db",
                "measures": ["map"],
                "sort_on": "map",
                "trec_eval": {"bin": "trec_eval", "args": "", "qrels": "q.txt"},
                "title": "t",
                "header": "h"
            }"#,
        );
        assert_eq!(cfg.teams["ielab"].secret, "secret");
        assert_eq!(cfg.header, "h");
        cfg.validate().unwrap();
    }

    #[test]
    fn leaderboard_projection_uses_display_names() {
        let board = parse(YAML).leaderboard();
        assert_eq!(board.sort_index(), Some(1));
        assert_eq!(board.team_names["sheffield"], "University of Sheffield");
        assert_eq!(board.team_names["waterloo"], "waterloo");
    }

    #[test]
    fn unknown_sort_measure_is_rejected() {
        let mut cfg = parse(YAML);
        cfg.sort_on = "recall".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnknownSortMeasure { .. })
        ));
    }

    #[test]
    fn empty_and_duplicate_measures_are_rejected() {
        let mut cfg = parse(YAML);
        cfg.measures.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::NoMeasures)));

        cfg.measures = vec!["map".into(), "P_10".into(), "map".into()];
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DuplicateMeasure(m)) if m == "map"
        ));
    }

    #[test]
    fn shared_secret_is_rejected() {
        let mut cfg = parse(YAML);
        cfg.teams.get_mut("waterloo").unwrap().secret = "s1".into();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DuplicateSecret { .. })
        ));
    }

    #[test]
    fn secrets_authorize_only_their_team() {
        let secrets = parse(YAML).secrets();
        assert_eq!(secrets.team_for_secret("s1"), Some("sheffield"));
        assert!(secrets.authorize("waterloo", "s2"));
        assert!(!secrets.authorize("waterloo", "s1"));
        assert!(!secrets.authorize("waterloo", "nope"));
    }

    #[test]
    fn missing_evaluator_section() {
        let mut cfg = parse(YAML);
        cfg.trec_eval = None;
        assert!(matches!(cfg.evaluator(), Err(ConfigError::MissingEvaluator)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/irl.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
