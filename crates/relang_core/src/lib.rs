//! Provide the canonical declaration vocabulary for the RELang compiler.
//!
//! This crate is intentionally small and dependency-free. It holds the spellings and metadata that both the
//! semantic builder and the emission backend need to agree on:
//! - function modifiers (`virtual`, `static`),
//! - calling conventions (`__thiscall`, `__cdecl`, ...),
//! - primitive types and their byte sizes under each target data model,
//! - the raw-block delimiter.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no model types.
//!
//! ## Examples
//! ```rust
//! use relang_core::lang::conventions::{self, CallingConventionId};
//!
//! assert_eq!(conventions::from_str("__thiscall"), Some(CallingConventionId::Thiscall));
//! ```

pub mod lang;

pub use lang::primitives::DataModel;
