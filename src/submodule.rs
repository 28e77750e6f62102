//! Submodule syncer
//!
//! Pushes local token edits to the shared repository, pulls remote ones,
//! and records the new submodule commit in the parent repository.
use crate::config::SyncConfig;
use crate::console;
use crate::git::{commit_timestamp, GitOps};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushState {
    /// No local changes, nothing to push.
    NotNeeded,
    Pushed,
    Failed,
    /// Local changes were committed but `--local` held the push back.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmoduleSync {
    /// The nested repository was missing and has been initialised.
    Initialized,
    Synced {
        committed: bool,
        push: PushState,
        pulled: bool,
    },
}

/// The nested repository's working copy.
///
/// Git commands for the nested repository run with this directory as their
/// working directory; the process itself never changes directory.
#[derive(Debug)]
struct NestedRepo {
    path: PathBuf,
}

impl NestedRepo {
    fn open(root: &Path, dirname: &str) -> Option<Self> {
        let path = root.join(dirname);
        path.join(".git").exists().then_some(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

pub fn sync_submodule<G>(git: &G, root: &Path, config: &SyncConfig, local_only: bool) -> SubmoduleSync
where
    G: GitOps,
{
    let Some(nested) = NestedRepo::open(root, &config.submodule_dir) else {
        console::heading("⚠️ ", "No git submodule found, initializing...");
        git.submodule_init(root);
        git.submodule_update(root);
        return SubmoduleSync::Initialized;
    };

    let (committed, push, pulled) = sync_nested(git, &nested, config, local_only);

    git.add(root, &config.submodule_dir);
    git.commit(root, "Update submodule reference");

    SubmoduleSync::Synced {
        committed,
        push,
        pulled,
    }
}

fn sync_nested<G>(
    git: &G,
    nested: &NestedRepo,
    config: &SyncConfig,
    local_only: bool,
) -> (bool, PushState, bool)
where
    G: GitOps,
{
    let dir = nested.path();
    let status = git.status_porcelain(dir);
    let has_local_changes = !status.stdout().trim().is_empty();

    let mut push = PushState::NotNeeded;
    if has_local_changes {
        console::detail("📝", "Found local changes to tokens");
        git.add(dir, &config.token_file);
        git.commit(
            dir,
            &format!("Update tokens from GM Scanner - {}", commit_timestamp()),
        );

        push = if local_only {
            console::detail("📍", "Local mode, not pushing token changes");
            PushState::Skipped
        } else if git
            .push(dir, &config.remote, &format!("HEAD:{}", config.branch))
            .is_success()
        {
            console::success("Pushed local changes to shared repo");
            PushState::Pushed
        } else {
            console::warning("Could not push (may need to pull first)");
            PushState::Failed
        };
    }

    // TODO: surface rebase conflicts instead of only printing git's message.
    let pulled = git
        .pull_rebase(dir, &config.remote, &config.branch)
        .is_success();

    (has_local_changes, push, pulled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandOutcome;
    use crate::git::MockGitOps;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use mockall::Sequence;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ok(stdout: &str) -> CommandOutcome {
        CommandOutcome::Success(stdout.to_string())
    }

    fn failed(message: &str) -> CommandOutcome {
        CommandOutcome::Failure(message.to_string())
    }

    fn with_submodule() -> anyhow::Result<TempDir> {
        let temp = TempDir::new()?;
        temp.child("data").child(".git").create_dir_all()?;
        Ok(temp)
    }

    /// Parent repository steps that follow every nested sync.
    fn expect_parent_update(git: &mut MockGitOps, root: &Path) {
        let root = root.to_path_buf();
        git.expect_add()
            .withf(move |dir, pathspec| dir == root.as_path() && pathspec == "data")
            .times(1)
            .returning(|_, _| ok(""));
        git.expect_commit()
            .withf(|_, message| message == "Update submodule reference")
            .times(1)
            .returning(|_, _| ok(""));
    }

    #[test]
    fn test_missing_submodule_initializes_only() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let root = temp.path().to_path_buf();

        let mut git = MockGitOps::new();
        let mut seq = Sequence::new();
        let init_root = root.clone();
        git.expect_submodule_init()
            .withf(move |dir| dir == init_root.as_path())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ok(""));
        let update_root = root.clone();
        git.expect_submodule_update()
            .withf(move |dir| dir == update_root.as_path())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ok(""));

        let result = sync_submodule(&git, &root, &SyncConfig::default(), false);
        assert_eq!(result, SubmoduleSync::Initialized);
        Ok(())
    }

    #[test]
    fn test_clean_submodule_only_pulls() -> anyhow::Result<()> {
        let temp = with_submodule()?;
        let root = temp.path().to_path_buf();
        let nested = root.join("data");

        let mut git = MockGitOps::new();
        let status_dir = nested.clone();
        git.expect_status_porcelain()
            .withf(move |dir| dir == status_dir.as_path())
            .times(1)
            .returning(|_| ok("\n"));
        let pull_dir = nested.clone();
        git.expect_pull_rebase()
            .withf(move |dir, remote, branch| {
                dir == pull_dir.as_path() && remote == "origin" && branch == "main"
            })
            .times(1)
            .returning(|_, _, _| ok("Already up to date.\n"));
        git.expect_push().never();
        expect_parent_update(&mut git, &root);

        let result = sync_submodule(&git, &root, &SyncConfig::default(), false);
        assert_eq!(
            result,
            SubmoduleSync::Synced {
                committed: false,
                push: PushState::NotNeeded,
                pulled: true,
            }
        );
        Ok(())
    }

    #[rstest]
    #[case(ok(""), PushState::Pushed)]
    #[case(failed("! [rejected] HEAD -> main (fetch first)"), PushState::Failed)]
    fn test_local_changes_are_committed_and_pushed(
        #[case] push_outcome: CommandOutcome,
        #[case] expected: PushState,
    ) -> anyhow::Result<()> {
        let temp = with_submodule()?;
        let root = temp.path().to_path_buf();
        let nested = root.join("data");

        let mut git = MockGitOps::new();
        let mut seq = Sequence::new();
        git.expect_status_porcelain()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ok(" M tokens.json\n"));
        let add_dir = nested.clone();
        git.expect_add()
            .withf(move |dir, pathspec| dir == add_dir.as_path() && pathspec == "tokens.json")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ok(""));
        git.expect_commit()
            .withf(|_, message| message.starts_with("Update tokens from GM Scanner - "))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ok(""));
        git.expect_push()
            .withf(|_, remote, refspec| remote == "origin" && refspec == "HEAD:main")
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _, _| push_outcome.clone());
        git.expect_pull_rebase()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| ok(""));
        expect_parent_update(&mut git, &root);

        let result = sync_submodule(&git, &root, &SyncConfig::default(), false);
        assert_eq!(
            result,
            SubmoduleSync::Synced {
                committed: true,
                push: expected,
                pulled: true,
            }
        );
        Ok(())
    }

    #[test]
    fn test_local_only_never_pushes() -> anyhow::Result<()> {
        let temp = with_submodule()?;
        let root = temp.path().to_path_buf();

        let mut git = MockGitOps::new();
        git.expect_status_porcelain()
            .times(1)
            .returning(|_| ok("?? tokens.json\n"));
        git.expect_add()
            .withf(|_, pathspec| pathspec == "tokens.json")
            .times(1)
            .returning(|_, _| ok(""));
        git.expect_commit()
            .withf(|_, message| message.starts_with("Update tokens"))
            .times(1)
            .returning(|_, _| ok(""));
        git.expect_push().never();
        git.expect_pull_rebase()
            .times(1)
            .returning(|_, _, _| ok(""));
        expect_parent_update(&mut git, &root);

        let result = sync_submodule(&git, &root, &SyncConfig::default(), true);
        assert_eq!(
            result,
            SubmoduleSync::Synced {
                committed: true,
                push: PushState::Skipped,
                pulled: true,
            }
        );
        Ok(())
    }

    #[test]
    fn test_failed_pull_still_updates_parent() -> anyhow::Result<()> {
        let temp = with_submodule()?;
        let root = temp.path().to_path_buf();

        let mut git = MockGitOps::new();
        git.expect_status_porcelain()
            .times(1)
            .returning(|_| failed("fatal: not a git repository"));
        git.expect_pull_rebase()
            .times(1)
            .returning(|_, _, _| failed("CONFLICT (content): Merge conflict in tokens.json"));
        expect_parent_update(&mut git, &root);

        let result = sync_submodule(&git, &root, &SyncConfig::default(), false);
        assert_eq!(
            result,
            SubmoduleSync::Synced {
                committed: false,
                push: PushState::NotNeeded,
                pulled: false,
            }
        );
        Ok(())
    }

    #[test]
    fn test_custom_submodule_layout() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        temp.child("shared").child(".git").create_dir_all()?;
        let root = temp.path().to_path_buf();
        let config = SyncConfig {
            submodule_dir: "shared".to_string(),
            remote: "upstream".to_string(),
            branch: "trunk".to_string(),
            ..SyncConfig::default()
        };

        let mut git = MockGitOps::new();
        let status_dir = root.join("shared");
        git.expect_status_porcelain()
            .withf(move |dir| dir == status_dir.as_path())
            .times(1)
            .returning(|_| ok(""));
        git.expect_pull_rebase()
            .withf(|_, remote, branch| remote == "upstream" && branch == "trunk")
            .times(1)
            .returning(|_, _, _| ok(""));
        git.expect_add()
            .withf(|_, pathspec| pathspec == "shared")
            .times(1)
            .returning(|_, _| ok(""));
        git.expect_commit().times(1).returning(|_, _| ok(""));

        let result = sync_submodule(&git, &root, &config, false);
        assert!(matches!(result, SubmoduleSync::Synced { pulled: true, .. }));
        Ok(())
    }
}
