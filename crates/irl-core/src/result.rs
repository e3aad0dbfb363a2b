use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Topic id under which `trec_eval` reports measures aggregated over all topics.
pub const AGGREGATE_TOPIC: &str = "all";

/// Measure name of the report line that carries the run id instead of a score.
pub const RUNID_MEASURE: &str = "runid";

/// Measures per topic, keyed by measure name.
pub type Measures = BTreeMap<String, f64>;

/// One decoded `trec_eval` report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
    /// From the `runid all <id>` line, or assigned by the caller.
    pub run_id: String,

    /// Topic id -> measure name -> score. Includes [`AGGREGATE_TOPIC`].
    pub topics: BTreeMap<String, Measures>,
}

impl EvalResult {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            topics: BTreeMap::new(),
        }
    }

    /// Measures of the aggregate topic, if the report had any.
    pub fn aggregate(&self) -> Option<&Measures> {
        self.topics.get(AGGREGATE_TOPIC)
    }

    /// Score of `measure` on the aggregate topic.
    pub fn aggregate_measure(&self, measure: &str) -> Option<f64> {
        self.aggregate().and_then(|m| m.get(measure).copied())
    }

    /// Sets a score, replacing any earlier value for the same topic and measure.
    pub fn insert(&mut self, topic: &str, measure: &str, value: f64) {
        self.topics
            .entry(topic.to_string())
            .or_default()
            .insert(measure.to_string(), value);
    }
}
