//! Decoder for `trec_eval` output.
//!
//! Every line of a report has exactly three whitespace separated columns:
//!
//! ```text
//! runid          all  sheffield-bm25
//! num_ret        all  1000
//! map            1    0.3127
//! map            all  0.2431
//! ```
//!
//! The `runid` line on the aggregate topic carries a string; every other line
//! carries a float. Input is consumed one line at a time.

use std::io::BufRead;

use crate::error::DecodeError;
use crate::result::{EvalResult, AGGREGATE_TOPIC, RUNID_MEASURE};

/// Decodes a full report from `reader`.
pub fn decode<R: BufRead>(mut reader: R) -> Result<EvalResult, DecodeError> {
    let mut result = EvalResult::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = std::str::from_utf8(&buf)
            .map_err(|source| DecodeError::Encoding { line: line_no, source })?;

        let mut columns = line.split_whitespace();
        let (Some(measure), Some(topic), Some(value), None) = (
            columns.next(),
            columns.next(),
            columns.next(),
            columns.next(),
        ) else {
            return Err(DecodeError::Format {
                line: line_no,
                found: line.split_whitespace().count(),
            });
        };

        if topic == AGGREGATE_TOPIC && measure == RUNID_MEASURE {
            result.run_id = value.to_string();
            continue;
        }

        let value = value.parse::<f64>().map_err(|source| DecodeError::Parse {
            line: line_no,
            measure: measure.to_string(),
            value: value.to_string(),
            source,
        })?;

        result.insert(topic, measure, value);
    }

    Ok(result)
}

/// Decodes a report held in memory.
pub fn decode_str(report: &str) -> Result<EvalResult, DecodeError> {
    decode(report.as_bytes())
}
