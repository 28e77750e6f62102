//! Command runner
//!
//! Runs one external command and turns whatever happens into a
//! [`CommandOutcome`]. Nothing here returns an error to the caller.
use crate::console;
use log::{debug, trace};
use std::path::Path;
use std::process::Command;

/// Marker text git prints when a commit has nothing staged.
const NOTHING_TO_COMMIT: &str = "nothing to commit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Captured standard output.
    Success(String),
    /// Message describing why the command failed.
    Failure(String),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success(_))
    }

    /// Captured output of a successful command, empty for a failed one.
    pub fn stdout(&self) -> &str {
        match self {
            CommandOutcome::Success(stdout) => stdout,
            CommandOutcome::Failure(_) => "",
        }
    }
}

/// Run `program args..` in `dir`, printing `description` first.
///
/// A non-zero exit that only reports "nothing to commit" counts as success.
/// Other failures are printed as warnings, spawn errors as errors.
pub fn run_command(dir: &Path, program: &str, args: &[&str], description: &str) -> CommandOutcome {
    console::step(description);
    debug!("{} {} (in {})", program, args.join(" "), dir.display());

    let output = match Command::new(program).args(args).current_dir(dir).output() {
        Ok(output) => output,
        Err(e) => {
            let message = format!("Error: {}", e);
            console::failure(&message);
            return CommandOutcome::Failure(message);
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    trace!("stdout: {}", stdout);
    trace!("stderr: {}", stderr);

    if output.status.success()
        || stdout.contains(NOTHING_TO_COMMIT)
        || stderr.contains(NOTHING_TO_COMMIT)
    {
        return CommandOutcome::Success(stdout);
    }

    let message = if stderr.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    console::warning(&message);
    CommandOutcome::Failure(message)
}
