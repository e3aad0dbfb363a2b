//! Core of the IRL leaderboard.
//!
//! Takes the line-based reports written by `trec_eval`, stores the aggregate
//! measures of every submitted run per team, and ranks all stored runs on a
//! configurable measure:
//!
//! - [`decode`]: report text to [`EvalResult`]
//! - [`extract_run_id`]: declared run id from the first line of a run file
//! - [`RunStore`]: redb-backed `team -> run -> measure` persistence
//! - [`leaderboard::build`]: sorted leaderboard rows over everything stored
//!
//! # Quick Start
//!
//! ```no_run
//! use irl_core::{decode_str, leaderboard, LeaderboardConfig, RunStore};
//!
//! # fn example() -> anyhow::Result<()> {
//! let store = RunStore::open("irl.redb")?;
//! let result = decode_str("runid all bm25\nmap all 0.2431\n")?;
//! store.put("sheffield", &result.run_id, &result)?;
//!
//! let config = LeaderboardConfig::new(vec!["map".into()], "map")
//!     .with_team("sheffield", "University of Sheffield");
//! let board = leaderboard::build(&config, &store)?;
//! assert_eq!(board.rows[0].label, "University of Sheffield (bm25)");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod evaluator;
pub mod leaderboard;
pub mod result;
pub mod run_id;
pub mod storage;

pub use config::{load_config, AppConfig, SecretDirectory, TeamConfig, TrecEvalConfig};
pub use decode::{decode, decode_str};
pub use error::{ConfigError, DecodeError, EvalError, RunIdError, StoreError};
pub use evaluator::TrecEval;
pub use leaderboard::{Leaderboard, LeaderboardConfig, LeaderboardRow};
pub use result::{EvalResult, AGGREGATE_TOPIC, RUNID_MEASURE};
pub use run_id::{extract_run_id, extract_run_id_from_reader};
pub use storage::{ResultStore, RunStore};
