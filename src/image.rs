//! The raw memory-image text format shared by the assembler and simulator.

use crate::error::ImageError;

/// First line of every raw image.
pub const HEADER: &str = "v2.0 raw";

/// Tokens emitted per image line before wrapping.
pub const TOKENS_PER_LINE: usize = 8;

/// Parse raw image text into the hex token sequence it carries.
///
/// Tokens wider than a byte parse successfully here; [`crate::Cpu::load`]
/// rejects them before execution starts.
pub fn parse(text: &str) -> Result<Vec<u16>, ImageError> {
    let mut lines = text.lines();
    match lines.next() {
        Some(header) if header.trim_end() == HEADER => {}
        _ => return Err(ImageError::MissingHeader),
    }

    let mut values = Vec::new();
    for token in lines.flat_map(str::split_whitespace) {
        let value = u16::from_str_radix(token, 16)
            .map_err(|_| ImageError::BadToken(token.to_string()))?;
        values.push(value);
    }
    Ok(values)
}
