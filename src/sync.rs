//! Sync pipeline
//!
//! Sequences the submodule sync, token load, structure check and the
//! optional deploy for one invocation.
use crate::config::SyncConfig;
use crate::console;
use crate::deploy::{deploy, DeployOutcome};
use crate::git::GitOps;
use crate::submodule::{sync_submodule, SubmoduleSync};
use crate::tokens::load_tokens;
use crate::verify::{verify_structure, StructureReport};
use anyhow::{Ok, Result};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Push the parent repository after syncing.
    pub deploy: bool,
    /// Never push anything.
    pub local_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No token file could be loaded.
    NoTokens { submodule: SubmoduleSync },
    Completed {
        submodule: SubmoduleSync,
        token_count: usize,
        structure: StructureReport,
        /// `None` when no deploy was requested.
        deploy: Option<DeployOutcome>,
    },
}

impl SyncOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            SyncOutcome::NoTokens { .. } => 1,
            SyncOutcome::Completed { .. } => 0,
        }
    }
}

/// Run one sync in `root`.
///
/// # Errors
/// Fails when a token file exists but can not be read or parsed.
pub fn run<G>(git: &G, root: &Path, config: &SyncConfig, options: SyncOptions) -> Result<SyncOutcome>
where
    G: GitOps,
{
    console::banner("🎮 ALN GM Scanner - Token Sync");
    console::blank();

    if options.local_only {
        console::heading("📍", "LOCAL MODE - Will not push to GitHub");
        console::blank();
    }

    console::heading("🔄", "Syncing with shared token repository...");
    let submodule = sync_submodule(git, root, config, options.local_only);
    console::blank();

    let tokens = match load_tokens(root, &config.token_paths)? {
        Some(loaded) if !loaded.tokens.is_empty() => loaded.tokens,
        _ => {
            console::failure("Cannot proceed without tokens");
            return Ok(SyncOutcome::NoTokens { submodule });
        }
    };

    console::heading("📊", &format!("Found {} tokens for GM operations", tokens.len()));
    let structure = verify_structure(&tokens, &config.required_fields, config.sample_size);
    structure.print(config.report_limit);
    console::blank();

    console::heading("ℹ️ ", "Note: GM Scanner uses NFC tokens - no QR generation needed");
    console::blank();

    let deploy = if options.deploy && !options.local_only {
        let outcome = deploy(git, root, config);
        console::blank();
        Some(outcome)
    } else {
        if !options.local_only {
            console::heading(
                "💡",
                &format!(
                    "Tip: Use '{} --deploy' to push to GitHub Pages",
                    env!("CARGO_PKG_NAME")
                ),
            );
            console::blank();
        }
        None
    };

    console::banner("✨ Sync complete! Token database updated.");

    Ok(SyncOutcome::Completed {
        submodule,
        token_count: tokens.len(),
        structure,
        deploy,
    })
}
