//! Default values for configuration fields.

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

default_fn!(
    default_target_branch_suffix,
    String,
    crate::workflow::DEFAULT_SYNC_SUFFIX.to_string()
);

/// Directory (relative to the working directory) holding the project config.
pub const PROJECT_CONFIG_DIR: &str = ".branch-sync";
/// File name shared by the global and project config.
pub const CONFIG_FILE_NAME: &str = "config.md";

/// Template written by `branch-sync config --init`.
pub const CONFIG_TEMPLATE: &str = r#"---
# Pre-filled into the branch prompts when always_prompt_for_branches is true
default_source_branch: ""
default_target_branch: ""
# Appended to the target branch to name the merge branch
target_branch_suffix: "-sync"
always_prompt_for_branches: false
# Always delete an existing sync branch instead of asking
delete_before_sync: false
---

# branch-sync

Settings for `branch-sync sync` in this repository. Values here override
the global config; command-line flags override both.
"#;
