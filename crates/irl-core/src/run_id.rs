//! Declared run id of a submitted run file.
//!
//! Run files use the TREC result format, one retrieved document per line:
//! `query iteration docid rank score runId`.

use std::io::BufRead;

use crate::error::RunIdError;

const RUN_ID_COLUMN: usize = 5;

/// Returns the run id declared on a single run line.
pub fn extract_run_id(first_line: &str) -> Result<String, RunIdError> {
    let columns: Vec<&str> = first_line.split_whitespace().collect();
    columns
        .get(RUN_ID_COLUMN)
        .map(|id| (*id).to_string())
        .ok_or(RunIdError::TooFewFields {
            found: columns.len(),
        })
}

/// Reads the first line of a run file and returns its run id.
pub fn extract_run_id_from_reader<R: BufRead>(mut reader: R) -> Result<String, RunIdError> {
    let mut first = Vec::new();
    reader.read_until(b'\n', &mut first)?;
    let first = std::str::from_utf8(&first).map_err(|source| RunIdError::Encoding { source })?;
    extract_run_id(first)
}
