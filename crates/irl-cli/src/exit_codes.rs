//! Exit codes of the `irl` binary. Scripts driving submissions rely on them.

use irl_core::{ConfigError, DecodeError, EvalError, RunIdError, StoreError};

pub const SUCCESS: i32 = 0;
pub const REJECTED: i32 = 1; // Bad secret, file type, run line or report
pub const CONFIG_ERROR: i32 = 2;
pub const INTERNAL_ERROR: i32 = 3; // Storage or evaluator failure

/// Maps the first typed error in the chain of `err` to an exit code.
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if let Some(e) = cause.downcast_ref::<EvalError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<DecodeError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<RunIdError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<StoreError>() {
            return e.exit_code();
        }
    }
    INTERNAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn typed_errors_map_through_context() {
        let err = Err::<(), _>(ConfigError::NoMeasures)
            .context("loading config")
            .unwrap_err();
        assert_eq!(for_error(&err), CONFIG_ERROR);

        let err = Err::<(), _>(RunIdError::TooFewFields { found: 2 })
            .context("reading run")
            .unwrap_err();
        assert_eq!(for_error(&err), REJECTED);
    }

    #[test]
    fn untyped_errors_are_internal() {
        assert_eq!(for_error(&anyhow::anyhow!("boom")), INTERNAL_ERROR);
    }
}
