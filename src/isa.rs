/// The closed NAL instruction set. Each variant is bound to a fixed opcode
/// byte; decode is a dense table lookup over that byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instruction {
    Hlt = 0x00,
    Outl = 0x01,
    Outr = 0x02,
    Outa = 0x03,
    Outb = 0x04,
    Movla = 0x11,
    Movlb = 0x12,
    Movra = 0x13,
    Movrb = 0x14,
    Movar = 0x15,
    Movbr = 0x16,
    Adda = 0x21,
    Addb = 0x22,
    Subba = 0x23,
    Subab = 0x24,
    Anda = 0x31,
    Andb = 0x32,
    Ora = 0x33,
    Orb = 0x34,
}

/// Opcode byte -> instruction, with a `None` gap for every undecodable byte.
const DECODE: [Option<Instruction>; 256] = {
    let mut table = [None; 256];
    let mut i = 0;
    while i < Instruction::ALL.len() {
        let instruction = Instruction::ALL[i];
        table[instruction as usize] = Some(instruction);
        i += 1;
    }
    table
};

impl Instruction {
    pub const ALL: [Instruction; 19] = [
        Instruction::Hlt,
        Instruction::Outl,
        Instruction::Outr,
        Instruction::Outa,
        Instruction::Outb,
        Instruction::Movla,
        Instruction::Movlb,
        Instruction::Movra,
        Instruction::Movrb,
        Instruction::Movar,
        Instruction::Movbr,
        Instruction::Adda,
        Instruction::Addb,
        Instruction::Subba,
        Instruction::Subab,
        Instruction::Anda,
        Instruction::Andb,
        Instruction::Ora,
        Instruction::Orb,
    ];

    pub fn decode(byte: u8) -> Option<Instruction> {
        DECODE[byte as usize]
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Hlt => "HLT",
            Instruction::Outl => "OUTL",
            Instruction::Outr => "OUTR",
            Instruction::Outa => "OUTA",
            Instruction::Outb => "OUTB",
            Instruction::Movla => "MOVLA",
            Instruction::Movlb => "MOVLB",
            Instruction::Movra => "MOVRA",
            Instruction::Movrb => "MOVRB",
            Instruction::Movar => "MOVAR",
            Instruction::Movbr => "MOVBR",
            Instruction::Adda => "ADDA",
            Instruction::Addb => "ADDB",
            Instruction::Subba => "SUBBA",
            Instruction::Subab => "SUBAB",
            Instruction::Anda => "ANDA",
            Instruction::Andb => "ANDB",
            Instruction::Ora => "ORA",
            Instruction::Orb => "ORB",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_opcode_decodes_to_its_variant() {
        for instruction in Instruction::ALL {
            assert_eq!(Instruction::decode(instruction.code()), Some(instruction));
        }
    }

    #[test]
    fn gap_bytes_are_undecodable() {
        for byte in [0x05, 0x10, 0x17, 0x20, 0x25, 0x30, 0x35, 0x80, 0xFF] {
            assert_eq!(Instruction::decode(byte), None);
        }
    }

    #[test]
    fn decodable_byte_count_matches_instruction_count() {
        let decodable = (0..=255u8)
            .filter(|byte| Instruction::decode(*byte).is_some())
            .count();
        assert_eq!(decodable, Instruction::ALL.len());
    }
}
