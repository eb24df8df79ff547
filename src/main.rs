//! autorst — generate Sphinx reStructuredText pages from annotated Python modules.
//!
//! Scans every `*.py` file in a source directory for headings, public
//! functions, classes and annotated module data, writes one `.rst` page per
//! module plus an `index.rst` into `<build-root>/source`, then runs the Sphinx
//! build (`make html` by default).
//!
//! Usage: `autorst -b docs -s mypkg -t "API reference for mypkg."`

mod config;
mod error;
mod model;
mod pipeline;
mod render;
mod scanner;
mod stage;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use config::{Config, Preamble, DEFAULT_BUILD_COMMAND};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "autorst",
    about = "Generate Sphinx reStructuredText pages from annotated Python modules"
)]
struct Cli {
    /// Directory containing the Python modules (default: parent of the build root)
    #[arg(short = 's', long)]
    source: Option<PathBuf>,

    /// Sphinx build root holding conf.py and the Makefile (default: current directory)
    #[arg(short = 'b', long)]
    build_root: Option<PathBuf>,

    /// Literal text placed above the index toctree. Takes precedence over --preamble-file.
    #[arg(short = 't', long)]
    preamble_text: Option<String>,

    /// File whose contents are placed above the index toctree
    #[arg(short = 'f', long)]
    preamble_file: Option<PathBuf>,

    /// Command run in the build root after generation
    #[arg(long, default_value = DEFAULT_BUILD_COMMAND)]
    build_command: String,

    /// Generate documents only; skip the build command
    #[arg(long)]
    no_build: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let build_root = match self.build_root {
            Some(dir) => dir,
            None => std::env::current_dir().context("failed to resolve current directory")?,
        };
        let mut config = Config::new(build_root);
        config.source_dir = self.source;
        config.preamble = Preamble::choose(self.preamble_text, self.preamble_file);
        config.build_command = if self.no_build {
            None
        } else {
            Some(config::split_command(&self.build_command))
        };
        Ok(config)
    }

    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// stderr logging; `RUST_LOG` overrides the verbosity flags.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = cli.into_config()?;
    let summary = pipeline::run(&config, &stage::OsFs)?;
    tracing::info!(
        modules = summary.modules.len(),
        index = %summary.index_path.display(),
        "documentation generated"
    );
    Ok(())
}
