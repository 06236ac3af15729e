use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// TestHarness provides an isolated clone with a local bare `origin`.
///
/// Layout inside the temp dir:
/// - `origin.git/`: bare remote with `main` holding one commit
/// - `work/`: clone of origin, where syncs run
/// - `xdg/`: empty config home so a developer's global config never leaks in
pub struct TestHarness {
    pub dir: TempDir,
    pub work: PathBuf,
    pub binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let origin = base.join("origin.git");
        let seed = base.join("seed");
        let work = base.join("work");
        fs::create_dir_all(&seed).expect("Failed to create seed dir");
        fs::create_dir_all(base.join("xdg")).expect("Failed to create xdg dir");

        git_in(base, &["init", "--bare", "-b", "main", path_str(&origin)]);

        git_in(&seed, &["init", "-b", "main"]);
        configure_identity(&seed);
        fs::write(seed.join("README.md"), "# Test Project\n").expect("Failed to write README");
        git_in(&seed, &["add", "."]);
        git_in(&seed, &["commit", "-m", "Initial commit"]);
        git_in(&seed, &["remote", "add", "origin", path_str(&origin)]);
        git_in(&seed, &["push", "origin", "main"]);

        git_in(base, &["clone", path_str(&origin), path_str(&work)]);
        configure_identity(&work);

        TestHarness {
            dir: temp_dir,
            work,
            binary: PathBuf::from(env!("CARGO_BIN_EXE_branch-sync")),
        }
    }

    /// The clone's working directory.
    pub fn path(&self) -> &Path {
        &self.work
    }

    /// Executes the branch-sync binary inside the clone. Stdin is not a
    /// TTY, so every prompt resolves as dismissed.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary)
            .args(args)
            .current_dir(&self.work)
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env("NO_COLOR", "1")
            .env_remove("BRANCH_SYNC_QUIET")
            .output()
            .expect("Failed to run branch-sync")
    }

    /// Runs git in the clone and returns trimmed stdout, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        git_in(&self.work, args)
    }

    /// Runs git in the clone without asserting success.
    pub fn try_git(&self, args: &[&str]) -> Output {
        Command::new("git")
            .args(args)
            .current_dir(&self.work)
            .output()
            .expect("Failed to run git")
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.try_git(&["rev-parse", "--verify", name]).status.success()
    }

    pub fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn write_file(&self, name: &str, content: &str) {
        fs::write(self.work.join(name), content).expect("Failed to write file");
    }

    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.work.join(name)).expect("Failed to read file")
    }

    /// Commit `name` with `content` on the current branch.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) {
        self.write_file(name, content);
        self.git(&["add", name]);
        self.git(&["commit", "-m", message]);
    }

    /// Create `name` from the current branch, push it, and return to `main`.
    pub fn publish_branch(&self, name: &str) {
        self.git(&["checkout", "-b", name]);
        self.git(&["push", "-u", "origin", name]);
        self.git(&["checkout", "main"]);
    }

    /// True while a merge is waiting to be resolved.
    pub fn merge_in_progress(&self) -> bool {
        self.try_git(&["rev-parse", "--verify", "MERGE_HEAD"]).status.success()
    }

    /// Write the project config file. It is excluded from git so the tree
    /// stays clean.
    pub fn write_config(&self, content: &str) {
        let dir = self.work.join(".branch-sync");
        fs::create_dir_all(&dir).expect("Failed to create config dir");
        fs::write(dir.join("config.md"), content).expect("Failed to write config");
        fs::create_dir_all(self.work.join(".git/info")).expect("Failed to create .git/info");
        fs::write(self.work.join(".git/info/exclude"), ".branch-sync/\n")
            .expect("Failed to write exclude file");
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

fn configure_identity(dir: &Path) {
    git_in(dir, &["config", "user.email", "test@example.com"]);
    git_in(dir, &["config", "user.name", "Test User"]);
    git_in(dir, &["config", "commit.gpgsign", "false"]);
    git_in(dir, &["config", "pull.rebase", "false"]);
}

fn git_in(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
