//! Register address encoding.
//!
//! Every AD9250 register is described by a [`Register`]: its physical SPI
//! address, the number of bytes it spans and, for registers whose writes are
//! buffered until a device update, the slot it occupies in the host-side
//! shadow table.
//!
//! The packed form produced by [`Register::bits`] is
//!
//! ```text
//!  23          16 15           8 7            0
//! ┌──────────────┬──────────────┬──────────────┐
//! │ shadow index │ transfer len │   address    │
//! └──────────────┴──────────────┴──────────────┘
//! ```
//!
//! Multi-byte registers are addressed by their most significant byte; the
//! remaining bytes sit at the next lower addresses.

use crate::{defaults::SHADOW_REGISTER_COUNT, error::ShadowError};

/// Instruction bit selecting a read cycle.
pub const READ: u16 = 1 << 15;
/// Instruction value selecting a write cycle.
pub const WRITE: u16 = 0;

/// Direction of a single SPI cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl Direction {
    #[inline]
    const fn bits(self) -> u16 {
        match self {
            Direction::Read => READ,
            Direction::Write => WRITE,
        }
    }
}

/// An addressable AD9250 register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    addr: u8,
    len: u8,
    shadow: u8,
}

impl Register {
    /// Describes an unshadowed register of `len` bytes.
    ///
    /// # Panics
    /// Panics (at compile time when used in a `const`) if `len` is not 1, 2
    /// or 3, or if the register would extend below address 0.
    pub const fn new(addr: u8, len: u8) -> Self {
        assert!(len >= 1 && len <= 3, "transfer length must be 1 to 3 bytes");
        assert!(fits_above_zero(addr, len), "register extends below address 0");
        Self {
            addr,
            len,
            shadow: 0,
        }
    }

    /// Describes a shadowed register backed by slot `index` of the shadow table.
    ///
    /// # Panics
    /// Panics if `len` is invalid, the register would extend below address 0,
    /// or `index` is 0 or beyond the shadow table.
    pub const fn shadowed(addr: u8, len: u8, index: u8) -> Self {
        assert!(len >= 1 && len <= 3, "transfer length must be 1 to 3 bytes");
        assert!(fits_above_zero(addr, len), "register extends below address 0");
        assert!(
            index > 0 && (index as usize) < SHADOW_REGISTER_COUNT,
            "shadow index out of range"
        );
        Self {
            addr,
            len,
            shadow: index,
        }
    }

    /// Decodes a packed register word.
    pub const fn from_bits(bits: u32) -> Result<Self, ShadowError> {
        let addr = (bits & 0xFF) as u8;
        let len = ((bits >> 8) & 0xFF) as u8;
        let shadow = ((bits >> 16) & 0xFF) as u8;

        if len < 1 || len > 3 {
            return Err(ShadowError::InvalidLength);
        }
        if !fits_above_zero(addr, len) {
            return Err(ShadowError::AddressUnderflow);
        }
        if bits >> 24 != 0 || shadow as usize >= SHADOW_REGISTER_COUNT {
            return Err(ShadowError::OutOfBounds);
        }

        Ok(Self { addr, len, shadow })
    }

    /// Packs the register into its `shadow | len | addr` word.
    #[inline]
    pub const fn bits(self) -> u32 {
        (self.shadow as u32) << 16 | (self.len as u32) << 8 | self.addr as u32
    }

    /// Physical address of the most significant byte.
    #[inline]
    pub const fn addr(self) -> u8 {
        self.addr
    }

    /// Number of bytes transferred for this register.
    #[inline]
    pub const fn len(self) -> u8 {
        self.len
    }

    /// Shadow table slot, or `None` for registers written straight to silicon.
    #[inline]
    pub const fn shadow_index(self) -> Option<u8> {
        if self.shadow == 0 {
            None
        } else {
            Some(self.shadow)
        }
    }

    #[inline]
    pub const fn is_shadowed(self) -> bool {
        self.shadow != 0
    }

    /// Largest value the register can hold.
    #[inline]
    pub const fn max_value(self) -> u32 {
        u32::MAX >> (32 - 8 * self.len as u32)
    }

    /// Builds the 3-byte SPI frame for byte `byte` (0 = most significant) of
    /// this register.
    ///
    /// `byte` must be below [`len`](Self::len); the constructors guarantee
    /// that every such byte has an address of its own.
    pub(crate) fn frame(self, dir: Direction, byte: u8, data: u8) -> [u8; 3] {
        debug_assert!(byte < self.len);
        let instr = dir.bits() | (self.addr - byte) as u16;
        let [hi, lo] = instr.to_be_bytes();
        [hi, lo, data]
    }
}

/// Byte `len - 1` sits at `addr - (len - 1)`, which must not wrap.
const fn fits_above_zero(addr: u8, len: u8) -> bool {
    len as u16 <= addr as u16 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_layout_matches_packed_encoding() {
        let reg = Register::shadowed(0x48, 2, 12);
        assert_eq!(reg.bits(), 0x000C_0248);
        assert_eq!(Register::from_bits(0x000C_0248), Ok(reg));

        let plain = Register::new(0x00, 1);
        assert_eq!(plain.bits(), 0x0000_0100);
        assert_eq!(plain.shadow_index(), None);
    }

    #[test]
    fn from_bits_rejects_malformed_words() {
        // Zero and four byte transfers
        assert_eq!(
            Register::from_bits(0x0000_0010),
            Err(ShadowError::InvalidLength)
        );
        assert_eq!(
            Register::from_bits(0x0000_0410),
            Err(ShadowError::InvalidLength)
        );

        // Shadow index past the table
        assert_eq!(
            Register::from_bits(0x000F_0110),
            Err(ShadowError::OutOfBounds)
        );

        // Stray high bits
        assert_eq!(
            Register::from_bits(0x0100_0110),
            Err(ShadowError::OutOfBounds)
        );
    }

    #[test]
    fn shadow_index_seven_is_reported() {
        let reg = Register::from_bits(0x0007_0118).unwrap();
        assert!(reg.is_shadowed());
        assert_eq!(reg.shadow_index(), Some(7));
    }

    #[test]
    fn frames_decrement_address_per_byte() {
        let reg = Register::new(0x1A, 2);

        assert_eq!(reg.frame(Direction::Read, 0, 0), [0x80, 0x1A, 0x00]);
        assert_eq!(reg.frame(Direction::Read, 1, 0), [0x80, 0x19, 0x00]);
        assert_eq!(reg.frame(Direction::Write, 0, 0xAB), [0x00, 0x1A, 0xAB]);
        assert_eq!(reg.frame(Direction::Write, 1, 0xCD), [0x00, 0x19, 0xCD]);
    }

    #[test]
    fn max_value_tracks_length() {
        assert_eq!(Register::new(0x20, 1).max_value(), 0xFF);
        assert_eq!(Register::new(0x20, 2).max_value(), 0xFFFF);
        assert_eq!(Register::new(0x20, 3).max_value(), 0xFF_FFFF);
    }

    #[test]
    fn lowest_addresses_take_only_what_fits() {
        assert_eq!(Register::new(0x00, 1).addr(), 0x00);
        assert_eq!(Register::new(0x01, 2).frame(Direction::Read, 1, 0), [0x80, 0x00, 0x00]);
        assert_eq!(Register::new(0x02, 3).frame(Direction::Write, 2, 0x34), [0x00, 0x00, 0x34]);
    }

    #[test]
    fn from_bits_rejects_registers_below_address_zero() {
        assert_eq!(
            Register::from_bits(0x0000_0200),
            Err(ShadowError::AddressUnderflow)
        );
        assert_eq!(
            Register::from_bits(0x0000_0301),
            Err(ShadowError::AddressUnderflow)
        );
        assert!(Register::from_bits(0x0000_0302).is_ok());
    }

    #[test]
    #[should_panic(expected = "register extends below address 0")]
    fn two_byte_register_at_zero_is_rejected() {
        let _ = Register::new(0x00, 2);
    }

    #[test]
    #[should_panic(expected = "register extends below address 0")]
    fn shadowed_register_below_zero_is_rejected() {
        let _ = Register::shadowed(0x01, 3, 4);
    }

    #[test]
    #[should_panic]
    fn shadow_index_zero_is_rejected() {
        let _ = Register::shadowed(0x09, 1, 0);
    }
}
