pub mod command;
pub mod config;
mod console;
pub mod deploy;
pub mod git;
pub mod submodule;
pub mod sync;
pub mod tokens;
pub mod verify;

pub use sync::{run, SyncOptions, SyncOutcome};
