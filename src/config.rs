use anyhow::{ensure, Ok, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one sync run.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Nested repository holding the shared token data, relative to the project root.
    pub submodule_dir: String,
    /// Token file inside the nested repository that gets staged on sync.
    pub token_file: String,
    /// Candidate token files, relative to the project root, tried in order.
    pub token_paths: Vec<String>,
    pub remote: String,
    pub branch: String,
    pub required_fields: Vec<String>,
    /// Number of leading tokens checked by the structure verifier.
    pub sample_size: usize,
    /// Number of missing fields printed by the structure verifier.
    pub report_limit: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            submodule_dir: "data".to_string(),
            token_file: "tokens.json".to_string(),
            token_paths: vec![
                "data/tokens.json".to_string(),
                "tokens.json.backup".to_string(),
            ],
            remote: "origin".to_string(),
            branch: "main".to_string(),
            required_fields: ["SF_RFID", "SF_ValueRating", "SF_MemoryType", "SF_Group"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sample_size: 5,
            report_limit: 3,
        }
    }
}

pub fn load_config_with_path<P>(path: P) -> Result<SyncConfig>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure!(path.exists(), format!("{} does not exist.", path.display()));
    ensure!(path.is_file(), format!("{} is not a file.", path.display()));
    Ok(confy::load_path(path)?)
}
