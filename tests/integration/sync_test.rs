//! Full sync runs against real git repositories.

use crate::support::TestHarness;

use branch_sync::output::ProgressLog;
use branch_sync::prompt::{Answer, ScriptedPrompt};
use branch_sync::runner::GitCli;
use branch_sync::workflow::{self, OutcomeStatus, WorkflowInput, WorkflowOutcome};

fn sync(input: WorkflowInput, answers: Vec<Answer>) -> WorkflowOutcome {
    let prompt = ScriptedPrompt::new(answers);
    workflow::run(&input, &GitCli::new(), &prompt, &ProgressLog::new())
}

fn input(harness: &TestHarness, source: &str, target: &str) -> WorkflowInput {
    WorkflowInput::new(harness.path(), source, target)
}

/// `release` and `main` each gain one commit after `release` was cut.
fn diverged_release(harness: &TestHarness) {
    harness.publish_branch("release");

    harness.git(&["checkout", "release"]);
    harness.commit_file("release.txt", "release only\n", "Release fix");
    harness.git(&["push", "origin", "release"]);

    harness.git(&["checkout", "main"]);
    harness.commit_file("main.txt", "main only\n", "Main feature");
    harness.git(&["push", "origin", "main"]);
}

#[test]
fn test_sync_into_new_target() {
    let harness = TestHarness::new();

    let outcome = sync(input(&harness, "main", "feature"), vec![]);

    assert_eq!(outcome.status, OutcomeStatus::Success, "{}", outcome.message);
    assert!(harness.branch_exists("feature"));
    assert!(harness.branch_exists("feature-sync"));
    assert_eq!(harness.current_branch(), "feature-sync");
}

#[test]
fn test_sync_merges_source_into_sync_branch_only() {
    let harness = TestHarness::new();
    diverged_release(&harness);

    let outcome = sync(input(&harness, "main", "release"), vec![]);

    assert_eq!(outcome.status, OutcomeStatus::Success, "{}", outcome.message);
    assert_eq!(harness.current_branch(), "release-sync");
    assert_eq!(harness.read_file("main.txt"), "main only\n");
    assert_eq!(harness.read_file("release.txt"), "release only\n");

    // The target branch itself is untouched
    assert!(!harness.try_git(&["cat-file", "-e", "release:main.txt"]).status.success());
    // Nothing is pushed
    assert!(harness.git(&["ls-remote", "origin", "release-sync"]).is_empty());
}

#[test]
fn test_sync_with_custom_suffix() {
    let harness = TestHarness::new();

    let outcome = sync(
        input(&harness, "main", "release").with_suffix("-merge"),
        vec![],
    );

    assert_eq!(outcome.status, OutcomeStatus::Success, "{}", outcome.message);
    assert_eq!(harness.current_branch(), "release-merge");
}

#[test]
fn test_dirty_tree_is_stashed_with_label() {
    let harness = TestHarness::new();
    harness.write_file("README.md", "# Edited\n");

    let outcome = sync(
        input(&harness, "main", "release"),
        vec![
            Answer::Choice(Some(0)),
            Answer::Text(Some("my work".to_string())),
        ],
    );

    assert_eq!(outcome.status, OutcomeStatus::Success, "{}", outcome.message);
    assert!(harness.git(&["stash", "list"]).contains("my work"));
    assert_eq!(harness.read_file("README.md"), "# Test Project\n");
}

#[test]
fn test_declined_stash_leaves_repo_alone() {
    let harness = TestHarness::new();
    harness.write_file("README.md", "# Edited\n");

    let outcome = sync(
        input(&harness, "main", "release"),
        vec![Answer::Choice(Some(1))],
    );

    assert_eq!(outcome.status, OutcomeStatus::Cancelled);
    assert_eq!(harness.current_branch(), "main");
    assert_eq!(harness.read_file("README.md"), "# Edited\n");
    assert!(!harness.branch_exists("release"));
}

#[test]
fn test_conflict_leaves_merge_in_progress() {
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

    let outcome = sync(input(&harness, "main", "release"), vec![]);

    assert_eq!(outcome.status, OutcomeStatus::ConflictDetected);
    assert!(outcome.message.contains("shared.txt"));
    assert_eq!(harness.current_branch(), "release-sync");
    assert!(harness.merge_in_progress());
}

#[test]
fn test_existing_sync_branch_kept() {
    let harness = TestHarness::new();
    harness.publish_branch("release");
    harness.git(&["checkout", "release"]);
    harness.git(&["checkout", "-b", "release-sync"]);
    harness.commit_file("sync-only.txt", "kept\n", "Sync work");
    harness.git(&["push", "-u", "origin", "release-sync"]);
    harness.git(&["checkout", "main"]);

    let outcome = sync(
        input(&harness, "main", "release"),
        vec![Answer::Choice(Some(1))],
    );

    assert_eq!(outcome.status, OutcomeStatus::Success, "{}", outcome.message);
    assert_eq!(harness.current_branch(), "release-sync");
    assert_eq!(harness.read_file("sync-only.txt"), "kept\n");
}

#[test]
fn test_existing_sync_branch_recreated() {
    let harness = TestHarness::new();
    harness.publish_branch("release");
    harness.git(&["checkout", "release"]);
    harness.git(&["checkout", "-b", "release-sync"]);
    harness.commit_file("sync-only.txt", "stale\n", "Stale sync work");
    harness.git(&["checkout", "main"]);

    let outcome = sync(
        input(&harness, "main", "release").with_delete_existing(true),
        vec![],
    );

    assert_eq!(outcome.status, OutcomeStatus::Success, "{}", outcome.message);
    assert_eq!(harness.current_branch(), "release-sync");
    assert!(!harness.path().join("sync-only.txt").exists());
}

#[test]
fn test_unknown_source_branch_fails_with_git_error() {
    let harness = TestHarness::new();

    let outcome = sync(input(&harness, "nope", "release"), vec![]);

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert!(outcome.message.starts_with("Error: "));
    assert!(outcome.message.contains("nope"));
    assert_eq!(harness.current_branch(), "main");
}

#[test]
fn test_option_like_source_is_rejected_before_git() {
    let harness = TestHarness::new();

    let outcome = sync(input(&harness, "--help", "release"), vec![]);

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert!(outcome.message.contains("cannot start with '-'"));
    assert_eq!(harness.current_branch(), "main");
    assert!(!harness.branch_exists("release"));
}
