use std::fmt;

use crate::error::RuntimeError;
use crate::hardware::{BitWidth, Counter, Memory, Register};
use crate::isa::Instruction;

/// Machine state. `run` loops until one of the terminal states is reached;
/// only [`ExecState::Halted`] is a successful termination.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ExecState {
    Running,
    /// Clean stop via HLT.
    Halted,
    /// Illegal opcode or out-of-range write. Stops the run loop immediately.
    Faulted(RuntimeError),
}

/// The NAL machine: an 8-bit program counter, general registers A and B, an
/// output register, and 256 bytes of memory.
pub struct Cpu {
    pc: Counter,
    reg_a: Register,
    reg_b: Register,
    reg_out: Register,
    mem: Memory,
    /// Legacy zero/carry register. Present on the data path but no
    /// instruction reads or writes it.
    _reg_zero_carry: Register,
    state: ExecState,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            pc: Counter::new(BitWidth::Eight),
            reg_a: Register::new(BitWidth::Eight),
            reg_b: Register::new(BitWidth::Eight),
            reg_out: Register::new(BitWidth::Eight),
            mem: Memory::new(BitWidth::Eight, BitWidth::Eight),
            _reg_zero_carry: Register::new(BitWidth::Two),
            state: ExecState::Running,
        }
    }

    /// Reset the machine and copy `program` into memory, zero-padding every
    /// remaining cell. Values past the 256th cell are ignored; a value wider
    /// than a byte is rejected here, before execution starts.
    pub fn load(&mut self, program: &[u16]) -> Result<(), RuntimeError> {
        self.pc.set(0)?;
        self.reg_a.set(0)?;
        self.reg_b.set(0)?;
        self.reg_out.set(0)?;

        for address in 0..=BitWidth::Eight.max_value() {
            let value = program.get(address as usize).copied().unwrap_or(0);
            self.mem.write(address, value)?;
        }

        self.state = ExecState::Running;
        Ok(())
    }

    /// Step until the machine halts or faults.
    pub fn run(&mut self) -> &ExecState {
        while self.state == ExecState::Running {
            self.step();
        }
        &self.state
    }

    /// One fetch-decode-execute cycle. Does nothing unless `Running`.
    pub fn step(&mut self) {
        if self.state != ExecState::Running {
            return;
        }
        if let Err(fault) = self.cycle() {
            self.state = ExecState::Faulted(fault);
        }
    }

    fn cycle(&mut self) -> Result<(), RuntimeError> {
        let byte = self.mem.read(self.pc.get())?;
        // The PC moves past the opcode before execution, operand or not
        self.pc.increment();
        let instruction =
            Instruction::decode(byte as u8).ok_or(RuntimeError::IllegalInstruction(byte))?;
        self.execute(instruction)
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), RuntimeError> {
        use Instruction::*;
        match instruction {
            Hlt => self.state = ExecState::Halted,

            Outl => {
                let arg = self.operand()?;
                self.reg_out.set(arg)?;
            }
            Outr => {
                let arg = self.operand()?;
                let value = self.mem.read(arg)?;
                self.reg_out.set(value)?;
            }
            Outa => self.reg_out.set(self.reg_a.get())?,
            Outb => self.reg_out.set(self.reg_b.get())?,

            Movla => {
                let arg = self.operand()?;
                self.reg_a.set(arg)?;
            }
            Movlb => {
                let arg = self.operand()?;
                self.reg_b.set(arg)?;
            }
            Movra => {
                let arg = self.operand()?;
                let value = self.mem.read(arg)?;
                self.reg_a.set(value)?;
            }
            Movrb => {
                let arg = self.operand()?;
                let value = self.mem.read(arg)?;
                self.reg_b.set(value)?;
            }
            Movar => {
                let arg = self.operand()?;
                self.mem.write(arg, self.reg_a.get())?;
            }
            Movbr => {
                let arg = self.operand()?;
                self.mem.write(arg, self.reg_b.get())?;
            }

            Adda => {
                let sum = i32::from(self.reg_a.get()) + i32::from(self.reg_b.get());
                Self::store(&mut self.reg_a, sum)?;
            }
            Addb => {
                let sum = i32::from(self.reg_a.get()) + i32::from(self.reg_b.get());
                Self::store(&mut self.reg_b, sum)?;
            }
            Subba => {
                let diff = i32::from(self.reg_a.get()) - i32::from(self.reg_b.get());
                Self::store(&mut self.reg_a, diff)?;
            }
            Subab => {
                let diff = i32::from(self.reg_b.get()) - i32::from(self.reg_a.get());
                Self::store(&mut self.reg_b, diff)?;
            }

            Anda => self.reg_a.set(self.reg_a.get() & self.reg_b.get())?,
            Andb => self.reg_b.set(self.reg_a.get() & self.reg_b.get())?,
            // ORA and ORB both target B
            Ora => self.reg_b.set(self.reg_a.get() | self.reg_b.get())?,
            Orb => self.reg_b.set(self.reg_a.get() | self.reg_b.get())?,
        }
        Ok(())
    }

    // Operand instructions consume the byte after the opcode and move the PC
    // past it after use.
    fn operand(&mut self) -> Result<u16, RuntimeError> {
        let value = self.mem.read(self.pc.get())?;
        self.pc.increment();
        Ok(value)
    }

    // Arithmetic results are range-checked at the register write, never
    // wrapped or clamped. A sum over 255 or a negative difference faults.
    fn store(reg: &mut Register, value: i32) -> Result<(), RuntimeError> {
        let value = u16::try_from(value).map_err(|_| RuntimeError::OutOfRange {
            value,
            width: BitWidth::Eight.bits(),
        })?;
        reg.set(value)
    }

    pub fn state(&self) -> &ExecState {
        &self.state
    }

    pub fn pc(&self) -> u16 {
        self.pc.get()
    }

    pub fn reg_a(&self) -> u16 {
        self.reg_a.get()
    }

    pub fn reg_b(&self) -> u16 {
        self.reg_b.get()
    }

    pub fn out(&self) -> u16 {
        self.reg_out.get()
    }

    pub fn read_mem(&self, address: u16) -> Result<u16, RuntimeError> {
        self.mem.read(address)
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu::new()
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RegA:\t{:#04x}", self.reg_a.get())?;
        writeln!(f, "RegB:\t{:#04x}", self.reg_b.get())?;
        writeln!(f, " OUT:\t{:#04x}", self.reg_out.get())?;
        writeln!(f, "  PC:\t{:#04x}", self.pc.get())?;
        writeln!(f, " RAM:")?;
        for row in 0..32 {
            for col in 0..8 {
                // Addresses 0..=255 are always readable
                let value = self.mem.read(row * 8 + col).map_err(|_| fmt::Error)?;
                write!(f, "{value:#04x}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
