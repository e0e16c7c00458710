//! Front-end interface for the RELang compiler.
//!
//! The grammar, tokenizer and parse-tree construction live outside this repository. What they hand over is defined
//! here:
//! - [`events::DeclEvent`]: the ordered enter/exit declaration events the semantic builder consumes,
//! - [`tree`]: a materialized declaration tree plus its depth-first flattening into events,
//! - [`literal`]: hexadecimal address/offset literal parsing,
//! - [`Span`]: source locations carried by every event.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it performs no validation of declaration shape. That is the
//!   semantic builder's job.
//! - All public types derive `serde` traits so front-ends in other processes can ship events as JSON.
//!
//! ## Examples
//! ```rust
//! use relang_syntax::tree::{self, Declaration, SourceFile, VariableDecl, TypeExpr};
//! use relang_syntax::Span;
//!
//! let file = SourceFile {
//!     declarations: vec![Declaration::Variable(VariableDecl {
//!         name: "g_Tick".into(),
//!         ty: TypeExpr::Primitive("int".into()),
//!         offset: Some("0x00A1B2C0".into()),
//!         span: Span::default(),
//!     })],
//! };
//! assert_eq!(tree::flatten(&file).len(), 4);
//! ```

pub mod events;
pub mod literal;
pub mod tree;

pub use events::DeclEvent;
pub use literal::{LiteralError, parse_hex};

use serde::{Deserialize, Serialize};

/// A source location: byte range plus the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub end: usize,
    #[serde(default)]
    pub line: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }

    /// A span that only knows its line.
    pub fn line(line: usize) -> Self {
        Self { start: 0, end: 0, line }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}
