//! Status lines printed while syncing.
//!
//! All output goes through `log`, so the verbosity flags decide what is shown.
//! Markers are coloured; the text after them is left plain.
use log::{error, info, warn};
use nu_ansi_term::Color::{Cyan, Green, Red, Yellow};

const RULE_WIDTH: usize = 50;

/// `📌 description...` before running an external command.
pub fn step(description: &str) {
    info!("{} {}...", Cyan.paint("📌"), description);
}

pub fn success(message: &str) {
    info!("  {} {}", Green.paint("✅"), message);
}

pub fn warning(message: &str) {
    warn!("  {}  {}", Yellow.paint("⚠️"), message);
}

pub fn failure(message: &str) {
    error!("{} {}", Red.paint("❌"), message);
}

/// Indented line with a leading marker, e.g. `  🌐 Changes will be live...`.
pub fn detail(marker: &str, message: &str) {
    info!("  {} {}", marker, message);
}

/// Top level line with a leading marker, e.g. `🔄 Syncing...`.
pub fn heading(marker: &str, message: &str) {
    info!("{} {}", marker, message);
}

pub fn blank() {
    info!("");
}

pub fn banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    info!("{}", rule);
    info!("{}", title);
    info!("{}", rule);
}
