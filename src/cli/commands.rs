//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use relang_syntax::DeclEvent;
use relang_syntax::tree::{self, SourceFile};

use crate::pipeline::{self, CompileError, CompileOptions};

use super::{CliError, CliResult, ExitCode};

/// Maximum input document size (100 MB)
const MAX_INPUT_SIZE: u64 = 100 * 1024 * 1024;

// ============================================================================
// Input documents
// ============================================================================

/// A parsed input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDocument {
    Tree(SourceFile),
    Events(Vec<DeclEvent>),
}

impl InputDocument {
    /// Parse a JSON document: an array is an event list, anything else a declaration tree.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.is_array() {
            Ok(InputDocument::Events(serde_json::from_value(value)?))
        } else {
            Ok(InputDocument::Tree(serde_json::from_value(value)?))
        }
    }

    pub fn into_events(self) -> Vec<DeclEvent> {
        match self {
            InputDocument::Tree(file) => tree::flatten(&file),
            InputDocument::Events(events) => events,
        }
    }
}

/// Read and parse an input document.
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_INPUT_SIZE` (100 MB)
/// - The file is not a valid tree or event document
pub fn read_input(path: &Path) -> CliResult<InputDocument> {
    let shown = path.display();
    let metadata = fs::metadata(path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", shown, e)))?;

    if metadata.len() > MAX_INPUT_SIZE {
        return Err(CliError::failure(format!(
            "Input file '{}' is too large ({} bytes, max {} bytes)",
            shown,
            metadata.len(),
            MAX_INPUT_SIZE
        )));
    }

    let text = fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", shown, e)))?;
    InputDocument::parse(&text).map_err(|e| CliError::failure(format!("Invalid input document '{}': {}", shown, e)))
}

// ============================================================================
// Commands
// ============================================================================

/// Compile `input` and write the header to `output` (default: `<input stem>.hpp`).
pub fn build_file(input: &Path, output: Option<&Path>, options: &CompileOptions) -> CliResult<ExitCode> {
    let events = read_input(input)?.into_events();
    let header = pipeline::compile_events(&events, options).map_err(compile_failure)?;

    let output = output.map(Path::to_path_buf).unwrap_or_else(|| default_output(input));
    write_atomically(&output, &header)
        .map_err(|e| CliError::failure(format!("Error writing '{}': {}", output.display(), e)))?;

    tracing::info!(output = %output.display(), "wrote header");
    Ok(ExitCode::SUCCESS)
}

/// Build the Program Model and report what it contains.
pub fn check_file(input: &Path, options: &CompileOptions) -> CliResult<ExitCode> {
    let events = read_input(input)?.into_events();
    let program = pipeline::check_events(&events, options).map_err(|e| compile_failure(e.into()))?;

    println!(
        "✓ {}: {} classes, {} functions, {} variables, {} raw blocks",
        input.display(),
        program.classes().count(),
        program.functions().count(),
        program.variables().count(),
        program.raw_blocks().count()
    );
    Ok(ExitCode::SUCCESS)
}

/// Print one JSON event per line.
pub fn print_events(input: &Path) -> CliResult<ExitCode> {
    let events = read_input(input)?.into_events();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in &events {
        let line = serde_json::to_string(event).map_err(|e| CliError::internal(format!("Cannot serialize event: {}", e)))?;
        writeln!(out, "{}", line).map_err(|e| CliError::failure(format!("Error writing to stdout: {}", e)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helpers
// ============================================================================

/// Render a compile error with its diagnostic and pick the exit code.
fn compile_failure(err: CompileError) -> CliError {
    let internal = err.is_internal();
    let message = format!("{:?}", miette::Report::new(err));
    if internal {
        CliError::internal(message)
    } else {
        CliError::failure(message)
    }
}

/// `<input stem>.hpp` next to the input.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("hpp")
}

/// Write `contents` to `path` through a temporary sibling file.
///
/// The temporary file is flushed and renamed over `path`; on any failure it is removed, so `path` is either left
/// untouched or holds the complete contents.
pub fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"))?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.tmp", process::id()));
    let tmp_path = path.with_file_name(tmp_name);

    let result = write_and_rename(&tmp_path, path, contents);
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_and_rename(tmp_path: &Path, path: &Path, contents: &str) -> io::Result<()> {
    let mut file = fs::File::create(tmp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp_path, path)
}
