use crate::console;
use anyhow::{Context as _, Ok, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Token id to record, in file order.
pub type TokenDatabase = IndexMap<String, Value>;

#[derive(Debug)]
pub struct LoadedTokens {
    pub tokens: TokenDatabase,
    /// The candidate the tokens were read from, as configured.
    pub path: PathBuf,
}

/// Load the first existing candidate, resolved against `root`.
///
/// Returns `None` when no candidate exists. A candidate that exists but
/// is not valid JSON is an error.
pub fn load_tokens<P>(root: &Path, candidates: &[P]) -> Result<Option<LoadedTokens>>
where
    P: AsRef<Path>,
{
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let path = root.join(candidate);
        if !path.exists() {
            continue;
        }

        console::heading("📄", &format!("Loading tokens from {}", candidate.display()));
        let reader = BufReader::new(
            File::open(&path).with_context(|| format!("Can not open {}", path.display()))?,
        );
        let tokens: TokenDatabase = serde_json::from_reader(reader)
            .with_context(|| format!("Can not parse {}", path.display()))?;
        console::success(&format!("Loaded {} tokens", tokens.len()));

        return Ok(Some(LoadedTokens {
            tokens,
            path: candidate.to_path_buf(),
        }));
    }

    console::failure("No tokens.json found!");
    Ok(None)
}
