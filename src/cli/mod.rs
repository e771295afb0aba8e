//! CLI module for the `fieldconst` tool
//!
//! ## Commands
//!
//! - `expand <file>` - Run the transform over a unit description and print the result
//! - `name <field>...` - Print the constant name of each field name
//! - `parity <file>` - Check that both host adapters agree on a unit
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

use clap::{Parser, Subcommand, ValueEnum};

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

/// Generate string constants naming the fields of Java-like types
#[derive(Parser, Debug)]
#[command(name = "fieldconst")]
#[command(version = VERSION)]
#[command(about = "Generate @FieldConstants name constants over host compiler trees", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Compiler tree shape to lower the unit into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Host {
    #[default]
    Javac,
    Ecj,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the transform over a unit description and print the resulting declarations
    Expand {
        /// JSON unit description
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Host tree to run against
        #[arg(long, value_enum, default_value_t = Host::Javac)]
        host: Host,
        /// JSON transform configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the constant name of each field name
    Name {
        /// Field names
        #[arg(value_name = "FIELD", required = true)]
        fields: Vec<String>,
    },

    /// Run both host adapters and compare their output
    Parity {
        /// JSON unit description
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// JSON transform configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
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
        Command::Expand { file, host, config } => commands::expand_file(&file, host, config.as_deref()),
        Command::Name { fields } => commands::print_names(&fields),
        Command::Parity { file, config } => commands::check_parity(&file, config.as_deref()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_expand_defaults_to_javac() {
        let cli = Cli::try_parse_from(["fieldconst", "expand", "unit.json"]).unwrap();
        if let Command::Expand { host, config, .. } = cli.command {
            assert_eq!(host, Host::Javac);
            assert!(config.is_none());
        } else {
            panic!("Expected Expand command");
        }
    }

    #[test]
    fn test_cli_parse_expand_with_options() {
        let cli = Cli::try_parse_from([
            "fieldconst",
            "expand",
            "unit.json",
            "--host",
            "ecj",
            "--config",
            "fieldconst.json",
        ])
        .unwrap();
        if let Command::Expand { host, config, .. } = cli.command {
            assert_eq!(host, Host::Ecj);
            assert_eq!(config, Some(PathBuf::from("fieldconst.json")));
        } else {
            panic!("Expected Expand command");
        }
    }

    #[test]
    fn test_cli_parse_name() {
        let cli = Cli::try_parse_from(["fieldconst", "name", "firstName", "url"]).unwrap();
        if let Command::Name { fields } = cli.command {
            assert_eq!(fields, vec!["firstName", "url"]);
        } else {
            panic!("Expected Name command");
        }
    }

    #[test]
    fn test_cli_name_requires_a_field() {
        assert!(Cli::try_parse_from(["fieldconst", "name"]).is_err());
    }

    #[test]
    fn test_cli_parse_parity() {
        let cli = Cli::try_parse_from(["fieldconst", "parity", "unit.json"]).unwrap();
        assert!(matches!(cli.command, Command::Parity { .. }));
    }

    #[test]
    fn test_cli_rejects_unknown_host() {
        assert!(Cli::try_parse_from(["fieldconst", "expand", "unit.json", "--host", "tsc"]).is_err());
    }

    #[test]
    fn test_cli_error_failure_code() {
        let err = CliError::failure("boom");
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert_eq!(err.to_string(), "boom");
    }
}
