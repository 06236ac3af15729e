//! `branch-sync config`: show, initialize, or validate settings.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use branch_sync::config::{
    global_config_path, project_config_path, split_frontmatter, Config, CONFIG_TEMPLATE,
};
use branch_sync::ui::colors;

use super::resolve_workdir;

/// Returns the process exit code.
pub fn cmd_config(dir: Option<&str>, init: bool, validate: bool, path_only: bool) -> Result<i32> {
    let workdir = resolve_workdir(dir)?;

    if path_only {
        show_paths(&workdir);
        return Ok(0);
    }
    if init {
        cmd_config_init(&workdir)?;
        return Ok(0);
    }
    if validate {
        return Ok(cmd_config_validate(&workdir));
    }

    show_paths(&workdir);
    println!();
    let config = Config::load(&workdir)?;
    let yaml = serde_yaml::to_string(&config).context("Failed to render configuration")?;
    println!("{}", colors::heading("Resolved settings:"));
    for line in yaml.lines() {
        println!("  {}", line);
    }
    Ok(0)
}

fn config_files(workdir: &Path) -> Vec<(&'static str, Option<PathBuf>)> {
    vec![
        ("global", global_config_path()),
        ("project", Some(project_config_path(workdir))),
    ]
}

fn show_paths(workdir: &Path) {
    println!("{}", colors::heading("Config files (later overrides earlier):"));
    for (scope, path) in config_files(workdir) {
        match path {
            Some(path) if path.exists() => {
                println!("  {:<8} {}", scope, colors::identifier(&path.display().to_string()))
            }
            Some(path) => println!(
                "  {:<8} {} {}",
                scope,
                path.display(),
                colors::secondary("(not found)")
            ),
            None => println!("  {:<8} {}", scope, colors::secondary("(no config directory)")),
        }
    }
}

/// Write the commented template; never overwrites an existing file.
pub fn cmd_config_init(workdir: &Path) -> Result<PathBuf> {
    let path = project_config_path(workdir);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote {}", colors::success("✓"), path.display());
    Ok(path)
}

/// Validate each config file on its own, then the merged result.
fn cmd_config_validate(workdir: &Path) -> i32 {
    println!("{}", colors::heading("Validating branch-sync configuration..."));
    println!();

    let mut errors = 0;

    for (scope, path) in config_files(workdir) {
        let Some(path) = path.filter(|p| p.exists()) else {
            println!("  {} {} config not present", colors::secondary("-"), scope);
            continue;
        };

        let issues = file_issues(&path);
        if issues.is_empty() {
            println!("  {} {} ({})", colors::success("✓"), scope, path.display());
        } else {
            println!("  {} {} ({})", colors::error("✗"), scope, path.display());
            for issue in &issues {
                println!("      {}", issue);
            }
            errors += issues.len();
        }
    }

    println!();
    if errors == 0 {
        println!("{} Configuration is valid", colors::success("✓"));
        0
    } else {
        println!("{} Found {} error(s)", colors::error("✗"), errors);
        1
    }
}

fn file_issues(path: &Path) -> Vec<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return vec![format!("cannot read file: {}", e)],
    };

    if split_frontmatter(&content).0.is_none() {
        return vec!["missing --- frontmatter block".to_string()];
    }

    // Parse without validation so every issue is reported, not just the first
    match Config::parse_unchecked(&content) {
        Ok(config) => config.issues(),
        Err(e) => vec![format!("{:#}", e)],
    }
}
