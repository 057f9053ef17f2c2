#![allow(dead_code)]

use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

pub fn base_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_donatrack"));
    cmd.env("DOTENV_PATH", data_dir.path().join("missing.env"))
        .env_remove("DONATRACK_DATA_DIR")
        .env_remove("DONATRACK_LOG_FILE")
        .env_remove("DONATRACK_MAX_FIELD_LEN")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

pub fn run(data_dir: &TempDir, args: &[&str]) -> Output {
    base_cmd(data_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("run donatrack {args:?}: {e}"))
}

/// Run a command that must succeed and parse its stdout as JSON.
pub fn run_json(data_dir: &TempDir, args: &[&str]) -> Value {
    let output = run(data_dir, args);
    assert!(output.status.success(), "{args:?} failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

pub fn signup(data_dir: &TempDir, user_name: &str, email: &str) -> Value {
    run_json(
        data_dir,
        &[
            "user",
            "signup",
            "--first-name",
            "Alice",
            "--last-name",
            "Smith",
            "--user-name",
            user_name,
            "--phone-number",
            "0123456789",
            "--email",
            email,
            "--password",
            "secret123",
        ],
    )
}
