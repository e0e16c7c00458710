//! Emission configuration

use std::path::Path;

/// Emission configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Emit a `sizeof` assertion after every class whose size is known
    pub size_assertions: bool,
    /// Emit `#pragma once`
    pub include_guard: bool,
    /// Extra `#include` lines, in order
    pub includes: Vec<Include>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            size_assertions: true,
            include_guard: true,
            includes: Vec::new(),
        }
    }
}

impl EmitConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Enable or disable class size assertions
    pub fn with_size_assertions(mut self, enabled: bool) -> Self {
        self.size_assertions = enabled;
        self
    }

    /// Enable or disable `#pragma once`
    pub fn with_include_guard(mut self, enabled: bool) -> Self {
        self.include_guard = enabled;
        self
    }

    /// Append an include
    pub fn with_include(mut self, include: Include) -> Self {
        self.includes.push(include);
        self
    }
}

/// One `#include` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub path: String,
    /// Rendered with quotes (`"path"`) instead of angle brackets.
    pub relative: bool,
}

impl Include {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            relative: true,
        }
    }

    pub fn system(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            relative: false,
        }
    }

    /// Interpret an include as written on the command line.
    ///
    /// `<cstdint>` and `"game.h"` keep their explicit form; a bare path is local when relative.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some(path) = text.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            return Include::system(path);
        }
        if let Some(path) = text.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            return Include::local(path);
        }
        if Path::new(text).is_relative() {
            Include::local(text)
        } else {
            Include::system(text)
        }
    }
}
