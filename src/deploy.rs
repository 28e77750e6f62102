//! Deployer
//!
//! Publishes the parent repository by pushing it; GitHub Pages serves
//! whatever lands on the configured branch.
use crate::config::SyncConfig;
use crate::console;
use crate::git::{commit_timestamp, GitOps};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Working tree was clean; nothing was committed or pushed.
    NothingToDeploy,
    Deployed {
        /// Pages URL, when the remote is a GitHub repository.
        pages_url: Option<String>,
    },
    PushFailed,
}

impl DeployOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, DeployOutcome::PushFailed)
    }
}

fn github_remote() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"github\.com[:/]([^/]+)/([^/.]+)").expect("GitHub remote pattern is valid")
    })
}

/// GitHub Pages URL for a GitHub remote, HTTPS or SSH.
///
/// ```
/// use token_sync::deploy::pages_url;
/// assert_eq!(
///     pages_url("https://github.com/acme/game-tokens.git").as_deref(),
///     Some("https://acme.github.io/game-tokens/")
/// );
/// assert_eq!(pages_url("https://gitlab.com/acme/game-tokens.git"), None);
/// ```
pub fn pages_url(remote_url: &str) -> Option<String> {
    let captures = github_remote().captures(remote_url.trim())?;
    Some(format!(
        "https://{}.github.io/{}/",
        &captures[1], &captures[2]
    ))
}

pub fn deploy<G>(git: &G, root: &Path, config: &SyncConfig) -> DeployOutcome
where
    G: GitOps,
{
    console::heading("🚀", "Deploying to GitHub Pages...");

    let status = git.status_porcelain(root);
    if status.stdout().trim().is_empty() {
        console::success("No changes to deploy");
        return DeployOutcome::NothingToDeploy;
    }

    git.add_all(root);
    git.commit(
        root,
        &format!("🔄 Sync tokens for GM Scanner - {}", commit_timestamp()),
    );

    if !git.push(root, &config.remote, &config.branch).is_success() {
        console::warning("Could not push to GitHub");
        console::detail("", "Run 'git push' manually when ready");
        return DeployOutcome::PushFailed;
    }

    console::success("Deployed successfully!");
    console::detail("🌐", "Changes will be live in ~1-2 minutes");

    let remote_url = git.remote_get_url(root, &config.remote);
    let pages_url = pages_url(remote_url.stdout());
    if let Some(url) = &pages_url {
        console::detail("📱", &format!("GM Scanner live at: {}", url));
    }

    DeployOutcome::Deployed { pages_url }
}
