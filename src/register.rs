#![allow(clippy::module_name_repetitions)]

/// Addresses of the internal registers of the INA219
///
/// All registers are 16 bits wide and transferred most significant byte first.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAddress {
    /// Configuration register, see [`Configuration`](crate::configuration::Configuration)
    Configuration = 0x00,
    /// Shunt voltage register, signed with an LSB of 10µV
    ShuntVoltage = 0x01,
    /// Bus voltage register, see [`BusVoltage`](crate::measurements::BusVoltage)
    BusVoltage = 0x02,
    /// Power register, unsigned with an LSB of 20 times the current LSB
    Power = 0x03,
    /// Current register, signed with an LSB set by the calibration
    Current = 0x04,
    /// Calibration register, see [`Calibration`](crate::calibration::Calibration)
    Calibration = 0x05,
}

impl RegisterAddress {
    /// Offset of the register used as the register pointer on the bus
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Registers that accept writes, the rest is read only
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Configuration | Self::Calibration)
    }
}

/// Reinterpret the bits of a register as a two's complement value
#[must_use]
pub const fn signed_from_bits(bits: u16) -> i16 {
    i16::from_ne_bytes(bits.to_ne_bytes())
}
