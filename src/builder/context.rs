//! Declaration context stack.
//!
//! Tracks which kinds of declaration are syntactically open. Events such as an address literal have no meaning of
//! their own; the top of this stack decides what they apply to.

use std::fmt;

use super::errors::InternalError;

/// The kind of an open declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Class,
    Function,
    Variable,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContextKind::Class => "class",
            ContextKind::Function => "function",
            ContextKind::Variable => "variable",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContextStack {
    stack: Vec<ContextKind>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ContextKind) {
        self.stack.push(kind);
    }

    /// Pop `expected` off the top.
    ///
    /// ## Errors
    /// - [`InternalError::ContextMismatch`] when the top is anything else. The stack is left untouched.
    pub fn pop(&mut self, expected: ContextKind) -> Result<(), InternalError> {
        match self.top() {
            Some(top) if top == expected => {
                self.stack.pop();
                Ok(())
            }
            found => Err(InternalError::ContextMismatch { expected, found }),
        }
    }

    pub fn top(&self) -> Option<ContextKind> {
        self.stack.last().copied()
    }

    pub fn contains(&self, kind: ContextKind) -> bool {
        self.stack.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Open contexts, outermost first.
    pub fn open(&self) -> &[ContextKind] {
        &self.stack
    }
}
