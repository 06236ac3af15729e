//! Conflict details recovered from a failed `git merge`.
//!
//! Git reports each conflicted path on stdout as a `CONFLICT (<kind>): ...`
//! line. Parsing that output lets us name the files without issuing another
//! git command against the half-merged tree.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Type of merge conflict encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictType {
    /// Both sides edited the same lines (`content`, `add/add`)
    Content,
    /// Structural conflict: delete vs modify, renames, file vs directory
    Tree,
    Unknown,
}

impl ConflictType {
    fn from_kind(kind: &str) -> Self {
        match kind {
            "content" | "add/add" => ConflictType::Content,
            k if k.contains("delete")
                || k.contains("rename")
                || k.contains("directory")
                || k.contains("file/") =>
            {
                ConflictType::Tree
            }
            _ => ConflictType::Unknown,
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictType::Content => write!(f, "content"),
            ConflictType::Tree => write!(f, "tree"),
            ConflictType::Unknown => write!(f, "unknown"),
        }
    }
}

/// One conflicted path reported by git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEntry {
    pub path: String,
    pub conflict_type: ConflictType,
}

static CONFLICT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CONFLICT \(([^)]+)\): (?:Merge conflict in (.+)|(\S+))")
        .expect("conflict pattern is valid")
});

/// Extract conflicted paths from `git merge` output, in report order.
///
/// A path reported more than once is listed once.
pub fn parse_conflicts(merge_output: &str) -> Vec<ConflictEntry> {
    let mut entries: Vec<ConflictEntry> = Vec::new();

    for line in merge_output.lines() {
        let Some(caps) = CONFLICT_LINE.captures(line.trim()) else {
            continue;
        };

        let path = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().trim().to_string());
        let Some(path) = path else {
            continue;
        };

        if entries.iter().any(|e| e.path == path) {
            continue;
        }

        entries.push(ConflictEntry {
            path,
            conflict_type: ConflictType::from_kind(&caps[1]),
        });
    }

    entries
}
