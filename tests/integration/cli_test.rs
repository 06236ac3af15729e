//! Binary-level tests: argument handling, exit codes, and output modes.

use crate::support::TestHarness;

fn combined(output: &std::process::Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_version() {
    let harness = TestHarness::new();
    let output = harness.run(&["version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(&format!("branch-sync {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_verbose_version_reports_git() {
    let harness = TestHarness::new();
    let output = harness.run(&["version", "-v"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\ngit: git version "), "{}", stdout);
}

#[test]
fn test_option_like_branch_exits_failed() {
    let harness = TestHarness::new();

    let output = harness.run(&["sync", "main", "--", "-x"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Invalid target branch '-x'"));
}

#[test]
fn test_sync_without_branches_cancels_cleanly() {
    let harness = TestHarness::new();

    let output = harness.run(&["sync"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(combined(&output).contains("Source branch is required"));
    assert_eq!(harness.current_branch(), "main");
}

#[test]
fn test_sync_end_to_end() {
    let harness = TestHarness::new();

    let output = harness.run(&["sync", "main", "feature"]);

    assert_eq!(output.status.code(), Some(0), "{}", combined(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Checking out main branch..."));
    assert!(stdout.contains("All done!"));
    assert_eq!(harness.current_branch(), "feature-sync");
}

#[test]
fn test_sync_in_other_directory() {
    let harness = TestHarness::new();
    let elsewhere = tempfile::TempDir::new().unwrap();
    let work = harness.path().to_str().unwrap();

    let output = std::process::Command::new(&harness.binary)
        .args(["sync", "main", "feature", "-C", work, "--suffix", "-rc"])
        .current_dir(elsewhere.path())
        .env("XDG_CONFIG_HOME", harness.dir.path().join("xdg"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "{}", combined(&output));
    assert_eq!(harness.current_branch(), "feature-rc");
}

#[test]
fn test_sync_missing_workdir_fails() {
    let harness = TestHarness::new();

    let output = harness.run(&["sync", "main", "feature", "-C", "/no/such/workspace"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("No workspace folder is open"));
}

#[test]
fn test_sync_rejects_bad_suffix() {
    let harness = TestHarness::new();

    let output = harness.run(&["sync", "main", "feature", "--suffix", "bad~"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("Invalid --suffix"));
    assert!(!harness.branch_exists("feature"));
}

#[test]
fn test_sync_conflict_exit_code() {
    let harness = TestHarness::new();
    harness.commit_file("shared.txt", "base\n", "Add shared");
    harness.git(&["push", "origin", "main"]);
    harness.publish_branch("release");
    harness.git(&["checkout", "release"]);
    harness.commit_file("shared.txt", "release side\n", "Release edit");
    harness.git(&["push", "origin", "release"]);
    harness.git(&["checkout", "main"]);
    harness.commit_file("shared.txt", "main side\n", "Main edit");
    harness.git(&["push", "origin", "main"]);

    let output = harness.run(&["sync", "main", "release"]);

    assert_eq!(output.status.code(), Some(2));
    let text = combined(&output);
    assert!(text.contains("Merge conflict detected"));
    assert!(text.contains("git merge --abort"));
}

#[test]
fn test_sync_json_outcome_event() {
    let harness = TestHarness::new();

    let output = harness.run(&["--json", "sync", "main", "feature"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let last = stdout.lines().last().unwrap();
    let event: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(event["level"], "outcome");
    assert_eq!(event["status"], "success");
    assert_eq!(event["sync_branch"], "feature-sync");

    for line in stdout.lines() {
        assert!(serde_json::from_str::<serde_json::Value>(line).is_ok(), "{}", line);
    }
}

#[test]
fn test_quiet_hides_progress() {
    let harness = TestHarness::new();

    let output = harness.run(&["--quiet", "sync", "main", "feature"]);

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Checking out"));
}

#[test]
fn test_project_config_supplies_suffix() {
    let harness = TestHarness::new();
    harness.write_config("---\ntarget_branch_suffix: \"-merge\"\n---\n");

    let output = harness.run(&["sync", "main", "release"]);

    assert_eq!(output.status.code(), Some(0), "{}", combined(&output));
    assert_eq!(harness.current_branch(), "release-merge");
}

#[test]
fn test_config_init_then_validate() {
    let harness = TestHarness::new();

    let output = harness.run(&["config", "--init"]);
    assert!(output.status.success(), "{}", combined(&output));
    assert!(harness.path().join(".branch-sync/config.md").exists());

    let output = harness.run(&["config", "--validate"]);
    assert_eq!(output.status.code(), Some(0), "{}", combined(&output));
}

#[test]
fn test_config_validate_reports_bad_suffix() {
    let harness = TestHarness::new();
    harness.write_config("---\ntarget_branch_suffix: \"has space\"\n---\n");

    let output = harness.run(&["config", "--validate"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(combined(&output).contains("must not contain whitespace"));
}
