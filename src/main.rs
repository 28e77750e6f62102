use anyhow::Result;
use clap::{ArgGroup, Parser};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::process::ExitCode;
use token_sync::config::{load_config_with_path, SyncConfig};
use token_sync::git::RealGit;
use token_sync::{run, SyncOptions};

#[derive(Debug, Parser)]
#[clap(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    after_help = "Syncs token data for NFC-based team gameplay. \
                  QR codes are managed by the Player Scanner.\n\
                  After running with --deploy, the GM interface is live at your GitHub Pages URL.",
    group(ArgGroup::new("log").args(["quiet", "verbose", "trace"])),
)]
struct Args {
    /// Sync and deploy to GitHub Pages.
    #[clap(long, default_value_t = false)]
    deploy: bool,
    /// Sync locally only, never push.
    #[clap(long, default_value_t = false)]
    local: bool,
    /// YAML config file overriding paths, remote and branch.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Only print errors.
    #[clap(short, long, default_value_t = false)]
    quiet: bool,
    /// Also print git command lines.
    #[clap(short, long, default_value_t = false)]
    verbose: bool,
    /// Also print raw git output.
    #[clap(short, long, default_value_t = false)]
    trace: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else if self.trace {
            LevelFilter::Trace
        } else {
            LevelFilter::Info
        }
    }
}

fn init_logger(level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_max_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logger(args.log_level())?;

    let config = match &args.config {
        Some(path) => load_config_with_path(path)?,
        None => SyncConfig::default(),
    };
    let root = std::env::current_dir()?;

    let outcome = run(
        &RealGit,
        &root,
        &config,
        SyncOptions {
            deploy: args.deploy,
            local_only: args.local,
        },
    )?;
    Ok(ExitCode::from(outcome.exit_code()))
}
