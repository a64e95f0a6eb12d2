use miette::Diagnostic;
use thiserror::Error;

// Opcode table errors

/// Failure to load the external opcode table.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read opcode table `{path}`")]
    #[diagnostic(
        code(config::read),
        help("pass a readable file with --table, or omit it to use the builtin table")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("opcode table is not valid JSON")]
    #[diagnostic(
        code(config::json),
        help("the table must be a flat JSON object of mnemonic to hex code strings")
    )]
    Json(#[from] serde_json::Error),
}

// Assembler errors

/// Compilation failures. The first error aborts assembly; no partial image is
/// ever produced.
#[derive(Debug, PartialEq, Eq, Error, Diagnostic)]
pub enum AsmError {
    #[error("source contains {0} tokens, over the 256-token limit")]
    #[diagnostic(
        code(asm::too_long),
        help("NAL memory holds 256 cells, counting operands as well as opcodes")
    )]
    InstructionLimitExceeded(usize),

    #[error("unknown mnemonic `{0}`")]
    #[diagnostic(
        code(asm::unknown_mnemonic),
        help("check the opcode table for the full mnemonic list")
    )]
    UnknownMnemonic(String),
}

// Raw image errors

/// Failure to parse raw memory-image text.
#[derive(Debug, PartialEq, Eq, Error, Diagnostic)]
pub enum ImageError {
    #[error("image is missing the `v2.0 raw` header")]
    #[diagnostic(
        code(image::header),
        help("raw images start with a line containing exactly `v2.0 raw`")
    )]
    MissingHeader,

    #[error("image contains a non-hexadecimal token `{0}`")]
    #[diagnostic(code(image::token))]
    BadToken(String),
}

// Machine errors

/// Faults raised while loading or executing a program. Any of these stops the
/// run loop immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RuntimeError {
    #[error("value {value} does not fit in a {width}-bit cell")]
    #[diagnostic(
        code(run::out_of_range),
        help("arithmetic results are range-checked at the register write, never wrapped")
    )]
    OutOfRange { value: i32, width: u8 },

    #[error("address {0:#04x} is outside addressable memory")]
    #[diagnostic(code(run::invalid_address))]
    InvalidAddress(u16),

    #[error("illegal instruction {0:#04x}")]
    #[diagnostic(
        code(run::illegal_instruction),
        help("only bytes with a matching mnemonic decode to instructions")
    )]
    IllegalInstruction(u16),
}
