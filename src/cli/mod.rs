//! CLI module for the RELang compiler
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Commands
//!
//! - `build <input>` - Compile a declaration document to a C++ header
//! - `check <input>` - Build and validate the Program Model without writing output
//! - `events <input>` - Print the flattened declaration event stream (debug)
//!
//! ## Input
//!
//! A JSON document holding either a declaration tree (`{"declarations": [...]}`) or a bare event list
//! (`[{"kind": "enter_class", ...}, ...]`).
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

use clap::{Args, Parser, Subcommand};
use relang_core::DataModel;

use crate::backend::{EmitConfig, Include};
use crate::builder::BuilderOptions;
use crate::pipeline::CompileOptions;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// The input is invalid.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// The compiler or its front-end misbehaved.
    pub const INTERNAL: ExitCode = ExitCode(2);
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

    /// Create an internal error (exit code 2).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::INTERNAL)
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

/// The RELang compiler
#[derive(Parser, Debug)]
#[command(name = "relang")]
#[command(version = VERSION)]
#[command(about = "Compile RELang layout descriptions into C++ overlays", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a declaration document to a C++ header
    Build {
        /// Declaration document (JSON tree or event list)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Output header (default: <input stem>.hpp next to the input)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
        #[command(flatten)]
        model: ModelArgs,
        /// Do not emit `static_assert(sizeof(...))` after classes
        #[arg(long)]
        no_size_asserts: bool,
        /// Do not emit `#pragma once`
        #[arg(long)]
        no_include_guard: bool,
        /// Add an `#include` line (`<cstdint>`, `"game.h"` or a path); repeatable
        #[arg(long = "include", value_name = "PATH")]
        includes: Vec<String>,
        /// Spaces per indentation level
        #[arg(long, value_name = "N", default_value_t = 4)]
        indent: usize,
    },

    /// Validate a declaration document without writing output
    Check {
        /// Declaration document (JSON tree or event list)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[command(flatten)]
        model: ModelArgs,
    },

    /// Print the flattened declaration event stream (debug)
    Events {
        /// Declaration document (JSON tree or event list)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

/// Flags that affect how the Program Model is built.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Tolerate function modifier/return type/calling convention events outside a function
    #[arg(long)]
    pub lenient: bool,
    /// Integer/pointer width convention of the target binary
    #[arg(long, value_name = "MODEL", default_value = "ilp32", value_parser = parse_data_model)]
    pub data_model: DataModel,
}

fn parse_data_model(name: &str) -> Result<DataModel, String> {
    DataModel::from_name(name).ok_or_else(|| format!("unknown data model `{}` (expected ilp32, llp64 or lp64)", name))
}

impl ModelArgs {
    fn builder_options(&self) -> BuilderOptions {
        BuilderOptions::new().with_strict_placement(!self.lenient)
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
    match cli.command {
        Command::Build {
            input,
            output,
            model,
            no_size_asserts,
            no_include_guard,
            includes,
            indent,
        } => {
            let emit = includes.iter().fold(
                EmitConfig::new()
                    .with_indent_width(indent)
                    .with_size_assertions(!no_size_asserts)
                    .with_include_guard(!no_include_guard),
                |config, include| config.with_include(Include::parse(include)),
            );
            let options = CompileOptions::new()
                .with_data_model(model.data_model)
                .with_builder(model.builder_options())
                .with_emit(emit);
            commands::build_file(&input, output.as_deref(), &options)
        }
        Command::Check { input, model } => {
            let options = CompileOptions::new()
                .with_data_model(model.data_model)
                .with_builder(model.builder_options());
            commands::check_file(&input, &options)
        }
        Command::Events { input } => commands::print_events(&input),
    }
}

// ============================================================================
// Tests
// ============================================================================
