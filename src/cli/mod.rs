//! CLI module for maixbind
//!
//! This module provides the command-line interface for the binding generator.
//!
//! ## Modules
//!
//! - `commands` - The generate pipeline
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

use clap::Parser;

use crate::config::BindingConfig;
use crate::version::MAIXBIND_VERSION;

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

    /// Create a failure error from a diagnostic, rendered with its code and help text.
    pub fn diagnostic<E>(err: E) -> Self
    where
        E: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(err)))
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

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate MaixPy C/C++ API binding code
#[derive(Parser, Debug)]
#[command(name = "maixbind")]
#[command(version = MAIXBIND_VERSION)]
#[command(about = "Generate MaixPy C/C++ API binding code", long_about = None)]
pub struct Cli {
    /// CMake global variables file (JSON with an `includes` list); disables directory discovery
    #[arg(long, value_name = "FILE")]
    pub vars: Option<PathBuf>,

    /// API wrapper output file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// MaixPy SDK path
    #[arg(long = "sdk_path", visible_alias = "sdk-path", value_name = "DIR", default_value = ".")]
    pub sdk_path: PathBuf,

    /// Project component directory scanned alongside `<sdk_path>/components`
    #[arg(long, value_name = "DIR", default_value = "components")]
    pub components: PathBuf,

    /// Header priority file (default: `<components>/maix/headers_priority.txt` when present)
    #[arg(long, value_name = "FILE")]
    pub priority: Option<PathBuf>,

    /// Header parser program (default: `<sdk_path>/tools/api-parser`)
    #[arg(long, value_name = "PROGRAM")]
    pub parser: Option<PathBuf>,

    /// Argument passed to the parser program before the header path (repeatable)
    #[arg(long = "parser-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub parser_args: Vec<String>,

    /// Root module key in the API tree
    #[arg(long, value_name = "KEY")]
    pub root: Option<String>,

    /// Name of the compiled extension module
    #[arg(long, value_name = "NAME")]
    pub extension: Option<String>,

    /// SDK tag passed to the header parser
    #[arg(long, value_name = "TAG")]
    pub sdk: Option<String>,
}

impl Cli {
    /// Binding configuration with command-line overrides applied.
    pub fn binding_config(&self) -> BindingConfig {
        let mut config = BindingConfig::default();
        if let Some(root) = &self.root {
            config = config.with_root_module(root);
        }
        if let Some(extension) = &self.extension {
            config = config.with_extension_name(extension);
        }
        if let Some(sdk) = &self.sdk {
            config = config.with_sdk(sdk);
        }
        config
    }

    /// Build the generate request for this invocation.
    pub fn request(&self) -> commands::GenerateRequest {
        let config = self.binding_config();
        let priority = self.priority.clone().or_else(|| {
            let default = self.components.join("maix").join("headers_priority.txt");
            default.is_file().then_some(default)
        });
        let parser = self
            .parser
            .clone()
            .unwrap_or_else(|| self.sdk_path.join("tools").join("api-parser"));

        commands::GenerateRequest {
            vars: self.vars.clone(),
            output: self.output.clone(),
            header_dirs: vec![self.sdk_path.join("components"), self.components.clone()],
            priority,
            parser,
            parser_args: self.parser_args.clone(),
            config,
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
fn execute(cli: Cli) -> CliResult<ExitCode> {
    commands::generate(&cli.request())
}
