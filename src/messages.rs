//! Operator-facing messages for each way a sync run can end.
//!
//! Failure messages carry context and concrete next steps so the operator
//! can recover from whatever state the repository was left in.

use crate::conflict::ConflictEntry;

pub fn branch_required(role: &str) -> String {
    format!("{} branch is required", role)
}

pub fn dirty_tree_declined() -> String {
    "Your working tree has uncommitted changes. \
     Please commit or stash before switching branches."
        .to_string()
}

/// Git rejects ref names starting with `-`, and on the command line they
/// would be read as options.
pub fn invalid_branch(role: &str, name: &str) -> String {
    format!(
        "Invalid {} branch '{}': branch names cannot start with '-'",
        role, name
    )
}

/// Error text for a failed git command; stderr is kept verbatim.
pub fn command_failed(stderr: &str) -> String {
    format!("Error: {}", stderr.trim_end())
}

/// Format a failed merge with recovery steps.
///
/// The merge is never aborted. When git reported conflicted paths the steps
/// start from the conflicted tree; otherwise git refused to merge and its
/// error is the only explanation the operator gets.
pub fn merge_conflict(
    source: &str,
    sync_branch: &str,
    conflicts: &[ConflictEntry],
    stderr: &str,
) -> String {
    let mut msg = String::from("Merge conflict detected. Please resolve conflicts and try again.\n");

    let stderr = stderr.trim();
    if !stderr.is_empty() {
        msg.push_str(&format!("\nError: {}\n", stderr));
    }

    msg.push_str("\nContext:\n");
    msg.push_str(&format!("  - Merging: {} into {}\n", source, sync_branch));

    if conflicts.is_empty() {
        msg.push_str("\nNext Steps:\n");
        msg.push_str("  1. Inspect the repository:  git status\n");
        msg.push_str("  2. Fix the problem reported above, then run the sync again");
        return msg;
    }

    msg.push_str(&format!("  - The merge was left in progress on {}\n", sync_branch));
    msg.push_str("\nConflicting files:\n");
    for entry in conflicts {
        msg.push_str(&format!("  - {} ({})\n", entry.path, entry.conflict_type));
    }
    msg.push_str(
        "\nNext Steps:\n\
         \x20 1. Inspect conflicts:  git status\n\
         \x20 2. Resolve, then stage:  git add <file>\n\
         \x20 3. Conclude the merge:  git commit\n\
         \x20 4. Or give up on this sync:  git merge --abort",
    );
    msg
}

/// Closing message; the tool never pushes or opens the request itself.
pub fn sync_complete(target: &str, sync_branch: &str) -> String {
    format!(
        "All done! {} is up to date.\n\n\
         Next Steps:\n\
         \x20 1. Push the branch:  git push -u origin {}\n\
         \x20 2. Open a pull request from {} into {}",
        sync_branch, sync_branch, sync_branch, target
    )
}
