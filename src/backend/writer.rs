//! Output writer with indentation tracking
//!
//! Collapses vertical whitespace: a separating blank line is only written after ordinary text, never directly after
//! an opening brace, an access label or another blank line.

/// What the last written line was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastLine {
    Nothing,
    Text,
    /// `{` or an access label: the next line belongs to it.
    Opener,
    Blank,
}

/// Writer that tracks indentation and builds the output text
pub struct SourceWriter {
    output: String,
    indent_level: usize,
    indent_width: usize,
    last: LastLine,
}

impl SourceWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_width,
            last: LastLine::Nothing,
        }
    }

    /// Get the output, ending in exactly one newline
    pub fn finish(mut self) -> String {
        let trimmed = self.output.trim_end_matches('\n').len();
        self.output.truncate(trimmed);
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn push_line(&mut self, level: usize, text: &str) {
        for _ in 0..level * self.indent_width {
            self.output.push(' ');
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Write one indented line
    pub fn line(&mut self, text: &str) {
        self.push_line(self.indent_level, text);
        self.last = LastLine::Text;
    }

    /// Write an opening line (`{`); no separator may follow it
    pub fn open(&mut self, text: &str) {
        self.push_line(self.indent_level, text);
        self.last = LastLine::Opener;
    }

    /// Write a label one level left of the current indentation
    pub fn label(&mut self, text: &str) {
        self.push_line(self.indent_level.saturating_sub(1), text);
        self.last = LastLine::Opener;
    }

    /// Write an empty line unconditionally (unless one was just written)
    pub fn blank_line(&mut self) {
        if self.last != LastLine::Blank {
            self.output.push('\n');
            self.last = LastLine::Blank;
        }
    }

    /// Write an empty line if the previous line was ordinary text
    pub fn separate(&mut self) {
        if self.last == LastLine::Text {
            self.blank_line();
        }
    }

    /// Write text verbatim, ignoring indentation, and make sure it ends the line
    pub fn raw(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.output.push_str(text);
        if !text.ends_with('\n') {
            self.output.push('\n');
        }
        self.last = LastLine::Text;
    }
}
