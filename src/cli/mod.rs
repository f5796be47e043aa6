//! CLI module for stubgen
//!
//! ```text
//! stubgen <SOURCE_DIR> <OUTPUT_DIR> <PARALLELISM> [--recursive] [--extension <EXT>]
//!         [--import-policy default|merge-source] [--collision overwrite|qualify]
//! ```
//!
//! ## Modules
//!
//! - `commands` - Argument validation, source discovery and the pipeline run
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//!
//! Exit codes: `0` success, `1` one or more files failed, `2` invalid configuration (nothing was processed).

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use crate::generate::ImportPolicy;
use crate::pipeline::{CollisionPolicy, DEFAULT_EXTENSION};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Invalid arguments; same code clap uses for usage errors.
    pub const CONFIG: ExitCode = ExitCode(2);
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

    /// Create a configuration error (exit code 2).
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::CONFIG)
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

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate xUnit + Moq test scaffolds from C# sources
#[derive(Parser, Debug)]
#[command(name = "stubgen")]
#[command(version = VERSION)]
#[command(about = "Generate xUnit + Moq test scaffolds from C# sources", long_about = None)]
pub struct Cli {
    /// Directory containing the C# sources
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Directory receiving the generated test files (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Maximum concurrent workers per stage (positive integer)
    #[arg(value_name = "PARALLELISM", allow_hyphen_values = true)]
    pub parallelism: String,

    /// Also scan subdirectories (hidden directories, `bin` and `obj` are skipped)
    #[arg(short, long)]
    pub recursive: bool,

    /// Source file extension; generated files use the same one
    #[arg(long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Which `using` directives generated files start with
    #[arg(long, value_enum, default_value_t = ImportPolicyArg::Default)]
    pub import_policy: ImportPolicyArg,

    /// How to name outputs when two classes share a name
    #[arg(long, value_enum, default_value_t = CollisionArg::Overwrite)]
    pub collision: CollisionArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPolicyArg {
    /// Fixed default imports plus the class's namespace
    Default,
    /// Defaults followed by the source file's own imports
    MergeSource,
}

impl From<ImportPolicyArg> for ImportPolicy {
    fn from(arg: ImportPolicyArg) -> Self {
        match arg {
            ImportPolicyArg::Default => ImportPolicy::DefaultOnly,
            ImportPolicyArg::MergeSource => ImportPolicy::MergeSource,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionArg {
    /// `<Class>Tests<ext>`, last writer wins
    Overwrite,
    /// `<Namespace>.<Class>Tests<ext>`
    Qualify,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Overwrite => CollisionPolicy::Overwrite,
            CollisionArg::Qualify => CollisionPolicy::Qualify,
        }
    }
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
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let request = commands::GenerateRequest::from_cli(cli)?;
    commands::generate(&request)
}

// ============================================================================
// Tests
// ============================================================================
