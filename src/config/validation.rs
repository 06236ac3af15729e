//! Validation logic for configuration values.

use anyhow::Result;

use super::Config;

/// Characters git refuses in a ref name component.
const FORBIDDEN_REF_CHARS: [char; 7] = ['~', '^', ':', '?', '*', '[', '\\'];

/// Problems with a branch-name suffix, empty when the suffix is usable.
pub fn suffix_issues(suffix: &str) -> Vec<String> {
    let mut issues = Vec::new();

    if suffix.is_empty() {
        issues.push(
            "target_branch_suffix must not be empty (the sync branch would be the target branch)"
                .to_string(),
        );
        return issues;
    }

    if suffix.chars().any(char::is_whitespace) {
        issues.push(format!(
            "target_branch_suffix '{}' must not contain whitespace",
            suffix
        ));
    }

    if let Some(c) = suffix.chars().find(|c| FORBIDDEN_REF_CHARS.contains(c)) {
        issues.push(format!(
            "target_branch_suffix '{}' contains '{}', which git does not allow in branch names",
            suffix, c
        ));
    }

    if suffix.contains("..") {
        issues.push(format!(
            "target_branch_suffix '{}' must not contain '..'",
            suffix
        ));
    }

    if suffix.ends_with(".lock") || suffix.ends_with('/') || suffix.ends_with('.') {
        issues.push(format!(
            "target_branch_suffix '{}' would produce an invalid branch name ending",
            suffix
        ));
    }

    issues
}

impl Config {
    /// All validation problems, in a stable order.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = suffix_issues(&self.target_branch_suffix);

        for (key, value) in [
            ("default_source_branch", &self.default_source_branch),
            ("default_target_branch", &self.default_target_branch),
        ] {
            if value != value.trim() {
                issues.push(format!("{} has leading or trailing whitespace", key));
            }
        }

        issues
    }

    /// Fail on the first validation problem.
    pub fn validate(&self) -> Result<()> {
        if let Some(issue) = self.issues().into_iter().next() {
            anyhow::bail!("Invalid configuration: {}", issue);
        }
        Ok(())
    }
}
