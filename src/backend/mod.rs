//! RELang Compiler Backend
//!
//! This module renders a sealed [`Program`](crate::model::Program) into target source text.
//!
//! The pipeline is:
//! 1. Program Model from the semantic builder → [`Emitter`] → output text
//! 2. The CLI writes that text to the output file in one step
//!
//! ## Module Organization
//!
//! - `emitter.rs` - Walks the model; owns ordering, access regions and spacing
//! - `syntax.rs` - The [`TargetSyntax`] seam: how each piece is spelled, and target type sizes
//! - `cpp.rs` - C++ overlays (packed classes, trampolines, pure virtuals)
//! - `writer.rs` - Low-level indented line buffer
//! - `config.rs` - [`EmitConfig`]

pub mod config;
pub mod cpp;
pub mod emitter;
pub mod syntax;
pub mod writer;

pub use config::{EmitConfig, Include};
pub use cpp::CppSyntax;
pub use emitter::{EmitError, Emitter, emit_program};
pub use syntax::{CallScope, TargetSyntax, Trampoline};
