use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::isa::Instruction;

/// Immutable mnemonic -> opcode code mapping, loaded once per process.
///
/// Keys are case-sensitive and the table is not required to be injective.
/// Code values are opaque strings carried into the image verbatim.
#[derive(Debug)]
pub struct OpcodeTable {
    codes: HashMap<String, String>,
}

impl OpcodeTable {
    /// Table derived from the instruction set, used when no `--table` file is
    /// provided. Codes are canonical two-digit lowercase hex.
    pub fn builtin() -> Self {
        let codes = Instruction::ALL
            .iter()
            .map(|instruction| {
                (
                    instruction.mnemonic().to_string(),
                    format!("{:02x}", instruction.code()),
                )
            })
            .collect();
        OpcodeTable { codes }
    }

    /// Load a table from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a flat JSON object of mnemonic -> code strings.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let codes: HashMap<String, String> = serde_json::from_str(text)?;
        Ok(OpcodeTable { codes })
    }

    /// Case-sensitive lookup; the code string is returned verbatim.
    pub fn lookup(&self, mnemonic: &str) -> Option<&str> {
        self.codes.get(mnemonic).map(String::as_str)
    }
}
