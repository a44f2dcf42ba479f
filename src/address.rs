//! I2C address of the INA219 on the bus
//!
//! The address is set via the pins A0 and A1. Only the four addresses reachable by tying the pins
//! to GND or VS are supported. The mapping is a subset of table 1 of the datasheet.

use core::fmt::Formatter;

/// Signal an address pin is connected to
///
/// The values match the bits as used for addressing the INA219.
///
/// # Example
/// ```rust
/// use ina219_monitor::address::Pin;
///
/// assert_eq!(Pin::Vcc.as_byte(), 0b1);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pin {
    /// The pin is connected to GND
    Gnd = 0,
    /// The pin is connected to VS
    Vcc = 1,
}

impl Pin {
    /// Get the value of the lowest bit represented by connecting an address pin to this signal
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    const fn from_bit(byte: u8) -> Self {
        if byte & 1 == 0 {
            Self::Gnd
        } else {
            Self::Vcc
        }
    }
}

/// I2C address of the INA219 on the bus
///
/// # Example
/// ```rust
/// use ina219_monitor::address::{Address, Pin};
///
/// let address = Address::from_pins(Pin::Vcc, Pin::Gnd);
/// assert_eq!(address, Address::Addr41);
///
/// assert_eq!(Address::from_byte(0x44).unwrap().as_byte(), 0x44);
/// assert!(Address::from_byte(0x42).is_err());
/// ```
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    /// A0 = GND, A1 = GND
    #[default]
    Addr40 = 0x40,
    /// A0 = VS, A1 = GND
    Addr41 = 0x41,
    /// A0 = GND, A1 = VS
    Addr44 = 0x44,
    /// A0 = VS, A1 = VS
    Addr45 = 0x45,
}

impl Address {
    const BASE: u8 = 0b100_0000;

    /// Create an address from the two pins A0 and A1
    #[must_use]
    pub const fn from_pins(a0: Pin, a1: Pin) -> Self {
        match (a0, a1) {
            (Pin::Gnd, Pin::Gnd) => Self::Addr40,
            (Pin::Vcc, Pin::Gnd) => Self::Addr41,
            (Pin::Gnd, Pin::Vcc) => Self::Addr44,
            (Pin::Vcc, Pin::Vcc) => Self::Addr45,
        }
    }

    /// Create an address from a byte
    ///
    /// # Errors
    /// Returns `Err` if the byte is not one of 0x40, 0x41, 0x44 or 0x45.
    pub const fn from_byte(byte: u8) -> Result<Self, OutOfRange> {
        match byte {
            0x40 => Ok(Self::Addr40),
            0x41 => Ok(Self::Addr41),
            0x44 => Ok(Self::Addr44),
            0x45 => Ok(Self::Addr45),
            which => Err(OutOfRange { which }),
        }
    }

    /// Get the address as a byte
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Get the address as the pins (A0, A1)
    #[must_use]
    pub const fn as_pins(self) -> (Pin, Pin) {
        let offset = self.as_byte() - Self::BASE;
        (Pin::from_bit(offset), Pin::from_bit(offset >> 2))
    }
}

/// The given byte is not a supported INA219 address
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OutOfRange {
    which: u8,
}

impl OutOfRange {
    /// The rejected byte
    #[must_use]
    pub const fn which(self) -> u8 {
        self.which
    }
}

impl core::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "AddressOutOfRange: {:#x}, should be one of 0x40, 0x41, 0x44, 0x45",
            self.which,
        )
    }
}

impl TryFrom<u8> for Address {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Address::from_byte(value)
    }
}

impl From<Address> for u8 {
    fn from(value: Address) -> Self {
        value.as_byte()
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasheet_examples() {
        use Pin::{Gnd, Vcc};

        let values = [
            // A1, A0, ADDRESS
            (Gnd, Gnd, 0b100_0000),
            (Gnd, Vcc, 0b100_0001),
            (Vcc, Gnd, 0b100_0100),
            (Vcc, Vcc, 0b100_0101),
        ];

        for (a1, a0, byte) in values {
            let address = Address::from_pins(a0, a1);
            assert_eq!(address.as_byte(), byte);

            let (a0_, a1_) = Address::from_byte(byte).unwrap().as_pins();
            assert_eq!(a0, a0_);
            assert_eq!(a1, a1_);
        }
    }

    #[test]
    fn only_four_bytes_are_accepted() {
        let accepted: Vec<u8> = (0..=u8::MAX)
            .filter(|byte| Address::try_from(*byte).is_ok())
            .collect();
        assert_eq!(accepted, vec![0x40, 0x41, 0x44, 0x45]);

        let err = Address::from_byte(0x4F).unwrap_err();
        assert_eq!(err.which(), 0x4F);
    }

    #[test]
    fn default_is_both_pins_grounded() {
        assert_eq!(Address::default().as_pins(), (Pin::Gnd, Pin::Gnd));
        assert_eq!(u8::from(Address::default()), 0x40);
    }
}
