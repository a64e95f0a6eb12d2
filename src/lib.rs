// Assembling
pub mod assembler;
mod opcodes;
pub use opcodes::OpcodeTable;

// Running
mod runtime;
pub use runtime::{Cpu, ExecState};
mod hardware;
pub use hardware::{BitWidth, Counter, Memory, Register};
mod isa;
pub use isa::Instruction;

// Shared raw image format
pub mod image;

pub mod error;
