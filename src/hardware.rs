use std::collections::HashMap;

use crate::error::RuntimeError;

/// Cell widths present on the NAL data path.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BitWidth {
    Two,
    Eight,
}

impl BitWidth {
    pub const fn bits(self) -> u8 {
        match self {
            BitWidth::Two => 2,
            BitWidth::Eight => 8,
        }
    }

    pub const fn max_value(self) -> u16 {
        (1 << self.bits()) - 1
    }
}

/// Fixed-width unsigned value cell. Writes outside the width are rejected.
#[derive(Debug)]
pub struct Register {
    width: BitWidth,
    value: u16,
}

impl Register {
    pub fn new(width: BitWidth) -> Self {
        Register { width, value: 0 }
    }

    pub fn set(&mut self, value: u16) -> Result<(), RuntimeError> {
        if value > self.width.max_value() {
            return Err(RuntimeError::OutOfRange {
                value: i32::from(value),
                width: self.width.bits(),
            });
        }
        self.value = value;
        Ok(())
    }

    pub fn get(&self) -> u16 {
        self.value
    }
}

/// Program counter. Same range checking as [`Register`] on direct writes, but
/// incrementing past the maximum wraps silently to 0.
#[derive(Debug)]
pub struct Counter {
    width: BitWidth,
    value: u16,
}

impl Counter {
    pub fn new(width: BitWidth) -> Self {
        Counter { width, value: 0 }
    }

    pub fn set(&mut self, address: u16) -> Result<(), RuntimeError> {
        if address > self.width.max_value() {
            return Err(RuntimeError::OutOfRange {
                value: i32::from(address),
                width: self.width.bits(),
            });
        }
        self.value = address;
        Ok(())
    }

    pub fn get(&self) -> u16 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value += 1;
        if self.value > self.width.max_value() {
            self.value = 0;
        }
    }
}

/// Sparse byte store. Unset addresses read as 0.
#[derive(Debug)]
pub struct Memory {
    address_width: BitWidth,
    data_width: BitWidth,
    cells: HashMap<u16, u16>,
}

impl Memory {
    pub fn new(address_width: BitWidth, data_width: BitWidth) -> Self {
        Memory {
            address_width,
            data_width,
            cells: HashMap::new(),
        }
    }

    pub fn read(&self, address: u16) -> Result<u16, RuntimeError> {
        if address > self.address_width.max_value() {
            return Err(RuntimeError::InvalidAddress(address));
        }
        Ok(self.cells.get(&address).copied().unwrap_or(0))
    }

    pub fn write(&mut self, address: u16, value: u16) -> Result<(), RuntimeError> {
        if address > self.address_width.max_value() {
            return Err(RuntimeError::OutOfRange {
                value: i32::from(address),
                width: self.address_width.bits(),
            });
        }
        if value > self.data_width.max_value() {
            return Err(RuntimeError::OutOfRange {
                value: i32::from(value),
                width: self.data_width.bits(),
            });
        }
        let _ = self.cells.insert(address, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_out_of_range_writes() {
        let mut reg = Register::new(BitWidth::Eight);
        reg.set(255).unwrap();
        assert_eq!(reg.get(), 255);
        assert_eq!(
            reg.set(256),
            Err(RuntimeError::OutOfRange {
                value: 256,
                width: 8
            })
        );
        // Failed write leaves the old value in place
        assert_eq!(reg.get(), 255);
    }

    #[test]
    fn two_bit_register_caps_at_three() {
        let mut reg = Register::new(BitWidth::Two);
        reg.set(3).unwrap();
        assert!(reg.set(4).is_err());
    }

    #[test]
    fn counter_wraps_past_maximum() {
        let mut pc = Counter::new(BitWidth::Eight);
        pc.set(255).unwrap();
        pc.increment();
        assert_eq!(pc.get(), 0);
    }

    #[test]
    fn counter_increments_without_wrapping_below_maximum() {
        let mut pc = Counter::new(BitWidth::Eight);
        pc.increment();
        pc.increment();
        assert_eq!(pc.get(), 2);
    }

    #[test]
    fn memory_reads_zero_for_unset_addresses() {
        let mem = Memory::new(BitWidth::Eight, BitWidth::Eight);
        assert_eq!(mem.read(0).unwrap(), 0);
        assert_eq!(mem.read(255).unwrap(), 0);
    }

    #[test]
    fn memory_rejects_invalid_address() {
        let mem = Memory::new(BitWidth::Eight, BitWidth::Eight);
        assert_eq!(mem.read(256), Err(RuntimeError::InvalidAddress(256)));
    }

    #[test]
    fn memory_rejects_out_of_range_writes() {
        let mut mem = Memory::new(BitWidth::Eight, BitWidth::Eight);
        assert!(mem.write(300, 0).is_err());
        assert!(mem.write(0, 256).is_err());
        mem.write(0x80, 0xAB).unwrap();
        assert_eq!(mem.read(0x80).unwrap(), 0xAB);
    }
}
