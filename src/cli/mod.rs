//! CLI module for rpcxgen
//!
//! ## Commands
//!
//! - `generate <descriptors>` - Generate rpcx stubs for every file with services
//! - `check <descriptors>` - Resolve every method type without writing output
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic through miette's report handler.
    pub fn diagnostic<D>(diagnostic: D) -> Self
    where
        D: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(diagnostic)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = crate::version::RPCXGEN_VERSION;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// rpcx service stub generator
#[derive(Parser, Debug)]
#[command(name = "rpcxgen")]
#[command(version = VERSION)]
#[command(about = "Generate rpcx server skeletons and client wrappers from compiled descriptors", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate stubs for every compiled file with services
    Generate {
        /// JSON descriptor set produced by the schema compiler
        #[arg(value_name = "DESCRIPTORS")]
        descriptors: PathBuf,
        /// Output directory (default: current directory)
        #[arg(short, long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Generator options, e.g. `serialize=JSON,fail_mode=Failover`
        #[arg(short, long, value_name = "PARAMS")]
        param: Option<String>,
        /// Print generated files instead of writing them
        #[arg(long, conflicts_with = "out_dir")]
        stdout: bool,
    },

    /// Resolve every method type without writing output
    Check {
        /// JSON descriptor set produced by the schema compiler
        #[arg(value_name = "DESCRIPTORS")]
        descriptors: PathBuf,
        /// Generator options
        #[arg(short, long, value_name = "PARAMS")]
        param: Option<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            descriptors,
            out_dir,
            param,
            stdout,
        } => {
            let target = if stdout {
                commands::Output::Stdout
            } else {
                commands::Output::Dir(out_dir.unwrap_or_else(|| PathBuf::from(".")))
            };
            commands::generate(&descriptors, param.as_deref(), &target)
        }
        Command::Check { descriptors, param } => commands::check(&descriptors, param.as_deref()),
    }
}

// ============================================================================
// Tests
// ============================================================================
