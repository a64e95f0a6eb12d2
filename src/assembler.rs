//! Opcode-table-driven encoding of mnemonic source into raw image text.

use crate::error::AsmError;
use crate::image;
use crate::opcodes::OpcodeTable;

/// NAL memory holds 256 cells, so an image can never use more tokens than
/// that. The limit counts every whitespace-delimited token, operands included.
pub const TOKEN_LIMIT: usize = 256;

/// Validate raw source text before assembly and return it trimmed.
///
/// The token count is checked before any opcode lookup, so an oversized
/// program fails fast even if every mnemonic in it is bogus.
pub fn read(text: &str) -> Result<&str, AsmError> {
    let source = text.trim();
    let tokens = source.split_whitespace().count();
    if tokens > TOKEN_LIMIT {
        return Err(AsmError::InstructionLimitExceeded(tokens));
    }
    Ok(source)
}

/// Assemble source text into raw image text.
///
/// One instruction per line: a mnemonic, optionally followed by a single
/// operand token. The mnemonic is looked up in `table` and its code emitted;
/// an unknown mnemonic aborts immediately with no partial image. The operand
/// is emitted verbatim, never validated or re-encoded.
pub fn assemble(source: &str, table: &OpcodeTable) -> Result<String, AsmError> {
    let mut image = ImageWriter::new();

    for line in source.split('\n') {
        let fields: Vec<&str> = line.split(' ').collect();
        let mnemonic = fields[0];
        let code = table
            .lookup(mnemonic)
            .ok_or_else(|| AsmError::UnknownMnemonic(mnemonic.to_string()))?;
        image.push(code);
        // An operand is only emitted for an exact mnemonic-operand pair
        if fields.len() == 2 {
            image.push(fields[1]);
        }
    }

    Ok(image.finish())
}

/// Accumulates image tokens with the fixed 8-per-line wrapping of the raw
/// format. The separator after each token (space, or newline on wrap) is part
/// of the format and must be preserved byte-for-byte.
struct ImageWriter {
    out: String,
    col: usize,
}

impl ImageWriter {
    fn new() -> Self {
        ImageWriter {
            out: format!("{}\n", image::HEADER),
            col: 0,
        }
    }

    fn push(&mut self, token: &str) {
        self.out.push_str(token);
        self.col += 1;
        if self.col == image::TOKENS_PER_LINE {
            self.out.push('\n');
            self.col = 0;
        } else {
            self.out.push(' ');
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
