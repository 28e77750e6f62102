//! Git operations used by the sync.
//!
//! Each method takes the working directory explicitly, so the process
//! working directory is never changed. The trait exists so tests can
//! replace git with a mock.
use crate::command::{run_command, CommandOutcome};
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Local time as stamped into generated commit messages.
pub fn commit_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

#[cfg_attr(test, automock)]
pub trait GitOps {
    fn submodule_init(&self, dir: &Path) -> CommandOutcome;

    fn submodule_update(&self, dir: &Path) -> CommandOutcome;

    /// `git status --porcelain`; empty output means a clean tree.
    fn status_porcelain(&self, dir: &Path) -> CommandOutcome;

    fn add(&self, dir: &Path, pathspec: &str) -> CommandOutcome;

    fn add_all(&self, dir: &Path) -> CommandOutcome;

    fn commit(&self, dir: &Path, message: &str) -> CommandOutcome;

    fn push(&self, dir: &Path, remote: &str, refspec: &str) -> CommandOutcome;

    fn pull_rebase(&self, dir: &Path, remote: &str, branch: &str) -> CommandOutcome;

    fn remote_get_url(&self, dir: &Path, remote: &str) -> CommandOutcome;
}

/// [`GitOps`] backed by the `git` executable.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealGit;

impl RealGit {
    fn git(&self, dir: &Path, args: &[&str], description: &str) -> CommandOutcome {
        run_command(dir, "git", args, description)
    }
}

impl GitOps for RealGit {
    fn submodule_init(&self, dir: &Path) -> CommandOutcome {
        self.git(dir, &["submodule", "init"], "Initializing submodule")
    }

    fn submodule_update(&self, dir: &Path) -> CommandOutcome {
        self.git(dir, &["submodule", "update"], "Getting initial data")
    }

    fn status_porcelain(&self, dir: &Path) -> CommandOutcome {
        self.git(dir, &["status", "--porcelain"], "Checking for local changes")
    }

    fn add(&self, dir: &Path, pathspec: &str) -> CommandOutcome {
        self.git(dir, &["add", pathspec], &format!("Staging {}", pathspec))
    }

    fn add_all(&self, dir: &Path) -> CommandOutcome {
        self.git(dir, &["add", "-A"], "Staging all changes")
    }

    fn commit(&self, dir: &Path, message: &str) -> CommandOutcome {
        self.git(dir, &["commit", "-m", message], "Committing changes")
    }

    fn push(&self, dir: &Path, remote: &str, refspec: &str) -> CommandOutcome {
        self.git(
            dir,
            &["push", remote, refspec],
            &format!("Pushing {} to {}", refspec, remote),
        )
    }

    fn pull_rebase(&self, dir: &Path, remote: &str, branch: &str) -> CommandOutcome {
        self.git(
            dir,
            &["pull", remote, branch, "--rebase"],
            &format!("Pulling latest from {}/{}", remote, branch),
        )
    }

    fn remote_get_url(&self, dir: &Path, remote: &str) -> CommandOutcome {
        self.git(dir, &["remote", "get-url", remote], "Getting repo URL")
    }
}
