//! Structure verifier
//!
//! Advisory check that the first few tokens carry the fields the GM
//! Scanner reads. The token data is never modified or rejected.
use crate::console;
use crate::tokens::TokenDatabase;
use itertools::Itertools;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StructureReport {
    /// `token_id.field` for every missing field, in token then field order.
    pub missing: Vec<String>,
}

impl StructureReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// The first `limit` missing fields, comma separated.
    pub fn summary(&self, limit: usize) -> String {
        self.missing.iter().take(limit).join(", ")
    }

    pub fn print(&self, limit: usize) {
        if self.is_valid() {
            console::success("Token structure valid for GM operations");
        } else {
            console::warning(&format!(
                "Some tokens missing GM fields: {}",
                self.summary(limit)
            ));
        }
    }
}

/// Check the first `sample_size` tokens for `required` fields.
///
/// A record that is not a JSON object is missing every field.
pub fn verify_structure<S>(tokens: &TokenDatabase, required: &[S], sample_size: usize) -> StructureReport
where
    S: AsRef<str>,
{
    console::heading("🔍", "Verifying token structure for GM use...");

    let missing = tokens
        .iter()
        .take(sample_size)
        .flat_map(move |(token_id, record)| {
            required
                .iter()
                .map(AsRef::<str>::as_ref)
                .filter(move |field| record.get(*field).is_none())
                .map(move |field| format!("{}.{}", token_id, field))
        })
        .collect_vec();

    StructureReport { missing }
}
