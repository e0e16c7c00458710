//! Hexadecimal address/offset literals.

use std::num::IntErrorKind;

use miette::Diagnostic;
use thiserror::Error;

/// Reasons a hexadecimal literal can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LiteralError {
    #[error("`{0}` is not a hexadecimal literal (expected a `0x` prefix)")]
    #[diagnostic(code(relang::literal::prefix), help("write addresses and offsets as `0x...`"))]
    MissingPrefix(String),

    #[error("`{0}` has no digits after its `0x` prefix")]
    #[diagnostic(code(relang::literal::empty))]
    Empty(String),

    #[error("`{0}` contains a non-hexadecimal digit")]
    #[diagnostic(code(relang::literal::digit))]
    InvalidDigit(String),

    #[error("`{0}` does not fit in 64 bits")]
    #[diagnostic(code(relang::literal::overflow))]
    Overflow(String),
}

/// Parse a `0x`-prefixed hexadecimal literal.
///
/// ## Examples
/// ```rust
/// use relang_syntax::parse_hex;
///
/// assert_eq!(parse_hex("0x00401000"), Ok(0x401000));
/// assert_eq!(parse_hex("0XfF"), Ok(0xFF));
/// assert!(parse_hex("401000").is_err());
/// ```
pub fn parse_hex(text: &str) -> Result<u64, LiteralError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .ok_or_else(|| LiteralError::MissingPrefix(text.to_string()))?;

    if digits.is_empty() {
        return Err(LiteralError::Empty(text.to_string()));
    }
    // `from_str_radix` accepts a leading `+`, a literal never does.
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(LiteralError::InvalidDigit(text.to_string()));
    }

    u64::from_str_radix(digits, 16).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => LiteralError::Overflow(text.to_string()),
        _ => LiteralError::InvalidDigit(text.to_string()),
    })
}
