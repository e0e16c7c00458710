//! RELang declaration vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `ModifierId`, `CallingConventionId`) and look up spellings and metadata
//! via the registry tables, instead of comparing raw strings across the compiler.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no model types, no IO, no side effects.
//! - The external front-end enforces syntax; registries provide spellings for validation and emission.
//!
//! ## Examples
//! ```rust
//! use relang_core::lang::modifiers::{self, ModifierId};
//!
//! assert_eq!(modifiers::from_str("virtual"), Some(ModifierId::Virtual));
//! assert_eq!(modifiers::as_str(ModifierId::Static), "static");
//! ```

pub mod conventions;
pub mod modifiers;
pub mod primitives;
pub mod raw;
pub mod registry;
