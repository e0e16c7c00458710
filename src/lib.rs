#![forbid(unsafe_code)]
//! RELang Compiler
//!
//! RELang describes the memory layout of a binary you do not have the source for: classes, fields at fixed byte
//! offsets, functions at fixed addresses, virtual tables and calling conventions. This crate turns such a description
//! into a C++ header whose types overlay that memory exactly and whose inline trampolines call straight into it.
//!
//! The pipeline is:
//! 1. Declaration events from the front-end ([`relang_syntax`]) → [`builder::SemanticBuilder`] → [`model::Program`]
//! 2. [`model::Program`] → [`backend::Emitter`] → header text
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Malformed event streams**: are front-end bugs, but they still surface as
//!   [`builder::InternalError`] values rather than panics.

pub mod backend;
pub mod builder;
pub mod cli;
pub mod model;
pub mod pipeline;

pub use backend::{CppSyntax, EmitConfig, emit_program};
pub use builder::{BuildError, BuilderOptions, SemanticBuilder};
pub use model::Program;
pub use pipeline::{CompileError, CompileOptions, compile_events, compile_source_file};
