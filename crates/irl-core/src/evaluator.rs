//! Runs `trec_eval` against a submitted run and decodes its output.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::config::TrecEvalConfig;
use crate::decode::decode;
use crate::error::EvalError;
use crate::result::EvalResult;

/// A configured `trec_eval` invocation: `bin [args..] qrels run`.
#[derive(Debug, Clone)]
pub struct TrecEval {
    bin: PathBuf,
    args: Vec<String>,
    qrels: PathBuf,
    skip_lines: usize,
}

impl TrecEval {
    pub fn new(bin: impl Into<PathBuf>, qrels: impl Into<PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            args: Vec::new(),
            qrels: qrels.into(),
            skip_lines: 0,
        }
    }

    pub fn from_config(cfg: &TrecEvalConfig) -> Self {
        Self {
            bin: cfg.bin.clone(),
            args: cfg.args.split_whitespace().map(String::from).collect(),
            qrels: cfg.qrels.clone(),
            skip_lines: cfg.skip_lines,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    fn command(&self, run: &Path) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(&self.args)
            .arg(&self.qrels)
            .arg(run)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }

    /// Evaluates `run` and decodes the report as it is produced.
    ///
    /// The evaluator must exit successfully; on a decode failure it is
    /// killed and reaped before the error is returned.
    pub fn evaluate(&self, run: &Path) -> Result<EvalResult, EvalError> {
        let mut cmd = self.command(run);
        debug!(command = ?cmd, "running evaluator");

        let mut child = cmd.spawn().map_err(|source| EvalError::Spawn {
            bin: self.bin.clone(),
            source,
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            EvalError::Io(std::io::Error::other("evaluator stdout was not captured"))
        })?;

        let mut reader = BufReader::new(stdout);
        let decoded = skip_lines(&mut reader, self.skip_lines)
            .map_err(EvalError::from)
            .and_then(|()| decode(&mut reader).map_err(EvalError::from));

        let result = match decoded {
            Ok(result) => result,
            Err(err) => {
                if let Err(kill_err) = child.kill() {
                    warn!(error = %kill_err, "failed to kill evaluator");
                }
                if let Err(wait_err) = child.wait() {
                    warn!(error = %wait_err, "failed to reap evaluator");
                }
                return Err(err);
            }
        };

        let status = child.wait()?;
        if !status.success() {
            return Err(EvalError::ExitStatus { status });
        }
        Ok(result)
    }
}

fn skip_lines<R: BufRead>(reader: &mut R, n: usize) -> std::io::Result<()> {
    let mut line = String::new();
    for _ in 0..n {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
    }
    Ok(())
}
