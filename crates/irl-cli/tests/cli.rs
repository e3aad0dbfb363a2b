//! End-to-end tests of the `irl` binary against a temporary workspace.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self::with_sort_on("map")
    }

    fn with_sort_on(sort_on: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        let evaluator = root.join("fake_trec_eval.sh");
        // Scores a run by echoing its run id and a fixed map of 0.33.
        std::fs::write(
            &evaluator,
            "run_id=$(head -n1 \"$2\" | awk '{print $6}')\n\
             echo \"runid all $run_id\"\n\
             echo \"map all 0.33\"\n\
             echo \"map 401 0.5\"\n",
        )
        .expect("write evaluator");

        let config = format!(
            r#"
title: "Test Track"
database: {db}
runs_dir: {runs}
measures: [map, P_10]
sort_on: {sort_on}
teams:
  alpha: {{ secret: "a-secret", name: "Team Alpha" }}
  beta: "b-secret"
trec_eval:
  bin: sh
  args: "{evaluator}"
  qrels: qrels.txt
"#,
            db = root.join("db/irl.redb").display(),
            runs = root.join("runs").display(),
            evaluator = evaluator.display(),
        );
        std::fs::write(root.join("irl.yaml"), config).expect("write config");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("write file");
        path
    }

    fn irl(&self) -> Command {
        let mut cmd = Command::cargo_bin("irl").expect("irl binary");
        cmd.env_remove("IRL_SECRET")
            .env("RUST_LOG", "warn")
            .arg("--config")
            .arg(self.path("irl.yaml"));
        cmd
    }
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default()
}

#[test]
fn ingest_then_leaderboard_ranks_runs() {
    let ws = Workspace::new();
    let low = ws.write("low.txt", "runid all low\nmap all 0.2\nP_10 all 0.9\n");
    let high = ws.write("high.txt", "runid all high\nmap all 0.7\nmap 401 0.1\n");

    ws.irl()
        .args(["ingest", "--team", "alpha"])
        .arg(&low)
        .assert()
        .success()
        .stdout(predicate::str::contains("stored Team Alpha (low): 2 measures"));
    ws.irl()
        .args(["ingest", "--team", "beta"])
        .arg(&high)
        .assert()
        .success();

    let output = ws
        .irl()
        .args(["leaderboard", "--format", "json"])
        .output()
        .expect("run irl");
    assert!(output.status.success());
    let board: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(board["rows"][0]["label"], "beta (high)");
    assert_eq!(board["rows"][0]["measures"][1], 0.0);
    assert_eq!(board["rows"][1]["label"], "Team Alpha (low)");

    ws.irl()
        .arg("leaderboard")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Test Track\n"))
        .stdout(predicate::str::contains("1  beta (high)"));
}

#[test]
fn ingest_from_stdin_with_explicit_run_id() {
    let ws = Workspace::new();
    ws.irl()
        .args(["ingest", "--team", "alpha", "--run-id", "piped", "-"])
        .write_stdin("map all 0.4\n")
        .assert()
        .success();

    ws.irl()
        .args(["runs", "--team", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("piped  map      0.4000"));
}

#[test]
fn ingest_without_run_id_is_rejected() {
    let ws = Workspace::new();
    let report = ws.write("anon.txt", "map all 0.4\n");
    ws.irl()
        .args(["ingest", "--team", "alpha"])
        .arg(&report)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pass --run-id"));
}

#[test]
fn report_without_aggregate_measures_is_rejected() {
    let ws = Workspace::new();
    let report = ws.write("topics.txt", "runid all r\nmap 401 0.5\n");
    ws.irl()
        .args(["ingest", "--team", "alpha"])
        .arg(&report)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nothing to store"));

    ws.irl()
        .args(["runs", "--team", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no stored runs"));
}

#[test]
fn latin1_report_is_rejected() {
    let ws = Workspace::new();
    let report = ws.path("latin1.txt");
    std::fs::write(&report, b"runid all caf\xe9\nmap all 0.5\n").expect("write report");
    ws.irl()
        .args(["ingest", "--team", "alpha"])
        .arg(&report)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn malformed_report_is_rejected() {
    let ws = Workspace::new();
    let report = ws.write("bad.txt", "runid all r\nmap all\n");
    ws.irl()
        .args(["ingest", "--team", "alpha"])
        .arg(&report)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected 3 columns"));

    ws.irl()
        .args(["runs", "--team", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no stored runs"));
}

#[test]
fn unknown_team_is_rejected() {
    let ws = Workspace::new();
    let report = ws.write("r.txt", "runid all r\nmap all 0.1\n");
    ws.irl()
        .args(["ingest", "--team", "gamma"])
        .arg(&report)
        .assert()
        .code(1);
}

#[cfg(unix)]
#[test]
fn submit_evaluates_archives_and_stores() {
    let ws = Workspace::new();
    let run = ws.write(
        "run.res",
        "401 Q0 doc1 1 12.5 my-run\n401 Q0 doc2 2 11.0 my-run\n",
    );

    ws.irl()
        .args(["submit", "--team", "alpha", "--secret", "a-secret"])
        .arg(&run)
        .assert()
        .success()
        .stdout(predicate::str::contains("stored Team Alpha (my-run)"));

    let archived = files_under(&ws.path("runs/alpha"));
    assert_eq!(archived.len(), 1);
    let name = archived[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("alpha.my-run."), "{name}");
    assert!(name.ends_with(".run"), "{name}");

    ws.irl()
        .args(["runs", "--team", "alpha", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"my-run\""))
        .stdout(predicate::str::contains("0.33"))
        .stdout(predicate::str::contains("401").not());
}

#[test]
fn submit_with_wrong_secret_is_rejected() {
    let ws = Workspace::new();
    let run = ws.write("run.res", "401 Q0 doc1 1 12.5 my-run\n");
    ws.irl()
        .args(["submit", "--team", "alpha", "--secret", "b-secret"])
        .arg(&run)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid secret"));
    assert!(files_under(&ws.path("runs/alpha")).is_empty());
}

#[test]
fn submit_with_wrong_extension_is_rejected() {
    let ws = Workspace::new();
    let run = ws.write("run.csv", "401 Q0 doc1 1 12.5 my-run\n");
    ws.irl()
        .args(["submit", "--team", "beta", "--secret", "b-secret"])
        .arg(&run)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("wrong file format"));
}

#[test]
fn submit_with_short_run_line_is_rejected() {
    let ws = Workspace::new();
    let run = ws.write("run.txt", "401 Q0 doc1\n");
    ws.irl()
        .args(["submit", "--team", "beta", "--secret", "b-secret"])
        .arg(&run)
        .assert()
        .code(1);
}

#[test]
fn validate_rejects_unknown_sort_measure() {
    let ws = Workspace::with_sort_on("recall");
    ws.irl()
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("recall"));
}

#[test]
fn validate_accepts_good_config() {
    let ws = Workspace::new();
    ws.irl()
        .arg("validate")
        .assert()
        .success()
        .stdout("config ok: 2 teams, 2 measures, ranked on map\n");
}

#[test]
fn empty_leaderboard() {
    let ws = Workspace::new();
    ws.irl()
        .arg("leaderboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("no runs submitted yet"));
}
