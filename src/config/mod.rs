//! Configuration for branch-sync.
//!
//! Settings live in the YAML frontmatter of a markdown file. Merge order
//! (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config (`<config_dir>/branch-sync/config.md`)
//! 3. Project config (`<workdir>/.branch-sync/config.md`)
//!
//! Command-line flags are applied on top by the CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;
pub mod validation;

pub use defaults::*;
pub use validation::*;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pre-fills the source prompt when `always_prompt_for_branches` is set
    #[serde(default)]
    pub default_source_branch: String,
    /// Pre-fills the target prompt when `always_prompt_for_branches` is set
    #[serde(default)]
    pub default_target_branch: String,
    /// Appended to the target branch to name the merge branch (default: "-sync")
    #[serde(default = "default_target_branch_suffix")]
    pub target_branch_suffix: String,
    #[serde(default)]
    pub always_prompt_for_branches: bool,
    /// Delete an existing sync branch without asking
    #[serde(default)]
    pub delete_before_sync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_source_branch: String::new(),
            default_target_branch: String::new(),
            target_branch_suffix: default_target_branch_suffix(),
            always_prompt_for_branches: false,
            delete_before_sync: false,
        }
    }
}

impl Config {
    /// Load the merged global + project configuration for `workdir`.
    pub fn load(workdir: &Path) -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Some(project_config_path(workdir).as_path()),
        )
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config = Self::parse_unchecked(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse over the defaults without running [`Config::validate`].
    pub fn parse_unchecked(content: &str) -> Result<Self> {
        Ok(PartialConfig::parse(content)?.merge_over(Config::default()))
    }

    /// Load merged configuration from explicit paths. Paths that do not
    /// exist are skipped.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        for path in [global_path, project_path].into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            let partial = PartialConfig::load_from(path)?;
            config = partial.merge_over(config);
        }

        config
            .validate()
            .context("Merged configuration is invalid")?;
        Ok(config)
    }

    /// Initial text for the (source, target) prompts.
    pub fn prompt_prefill(&self) -> (&str, &str) {
        if self.always_prompt_for_branches {
            (
                self.default_source_branch.as_str(),
                self.default_target_branch.as_str(),
            )
        } else {
            ("", "")
        }
    }
}

/// Returns the path to the global config file, e.g. `~/.config/branch-sync/config.md`
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("branch-sync").join(CONFIG_FILE_NAME))
}

/// Returns the project config path inside `workdir`.
pub fn project_config_path(workdir: &Path) -> PathBuf {
    workdir.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE_NAME)
}

/// Split `---` delimited YAML frontmatter from the markdown body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim_start();

    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if offset > 0 && line.trim_end() == "---" {
            let frontmatter = rest[..offset].to_string();
            let body = rest[offset + line.len()..].trim_start();
            return (Some(frontmatter), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub default_source_branch: Option<String>,
    pub default_target_branch: Option<String>,
    pub target_branch_suffix: Option<String>,
    pub always_prompt_for_branches: Option<bool>,
    pub delete_before_sync: Option<bool>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        if frontmatter.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Values set here take precedence over `base`.
    fn merge_over(self, base: Config) -> Config {
        Config {
            default_source_branch: self
                .default_source_branch
                .unwrap_or(base.default_source_branch),
            default_target_branch: self
                .default_target_branch
                .unwrap_or(base.default_target_branch),
            target_branch_suffix: self
                .target_branch_suffix
                .unwrap_or(base.target_branch_suffix),
            always_prompt_for_branches: self
                .always_prompt_for_branches
                .unwrap_or(base.always_prompt_for_branches),
            delete_before_sync: self.delete_before_sync.unwrap_or(base.delete_before_sync),
        }
    }
}
