//! Persistence of aggregate measures, one container per team and run.
//!
//! # Layout
//!
//! ```text
//! table "team/{team}"
//!   (run, measure) -> 8 bytes, big-endian IEEE-754 double
//! ```
//!
//! Only the aggregate topic of a result is stored; per-topic scores are
//! dropped on [`RunStore::put`].

mod codec;
mod store;

use std::collections::BTreeMap;

pub use codec::{decode_measure, encode_measure, MEASURE_LEN};
pub use store::RunStore;

use crate::error::StoreError;
use crate::result::EvalResult;

/// Read access to stored runs, as needed to build a leaderboard.
pub trait ResultStore {
    /// All stored runs of `team`, keyed by run id. Empty when the team has
    /// never submitted.
    fn get_all_for_team(&self, team: &str) -> Result<BTreeMap<String, EvalResult>, StoreError>;
}
