use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Runs the binary against a throwaway database and working directory.
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

#[allow(dead_code)]
impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("data").join("test.db");

        Self { temp_dir, db_path }
    }

    /// A command with the database path set and no config file in scope.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("nextup").expect("Failed to find nextup binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env("NEXTUP_DATABASE_PATH", &self.db_path);
        cmd.env_remove("NEXTUP_LIST_LIMIT");
        cmd.env_remove("NEXTUP_LOG_LEVEL");
        cmd
    }

    pub fn db_path(&self) -> &std::path::Path {
        &self.db_path
    }

    pub fn dir(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Runs `list --json` and returns the parsed array.
    pub fn list_json(&self, extra: &[&str]) -> Vec<serde_json::Value> {
        let mut args = vec!["list", "--json"];
        args.extend_from_slice(extra);
        let output = self.command().args(&args).output().expect("Failed to run list");
        assert!(output.status.success(), "list failed: {:?}", output);
        serde_json::from_slice(&output.stdout).expect("list output is not JSON")
    }
}

pub mod assertions {
    use predicates::prelude::*;

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("✓").and(predicate::str::contains("Created task"))
    }
}
