//! Raw register contents of the voltage measurements and their conversion to physical units

use crate::register::signed_from_bits;

/// LSB of the shunt voltage register in V
pub const SHUNT_VOLTAGE_LSB_V: f64 = 10e-6;

/// LSB of the bus voltage register in V
pub const BUS_VOLTAGE_LSB_V: f64 = 4e-3;

/// A collection of all the measurements of the INA219 in SI units
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Measurements {
    /// Bus voltage in V
    pub bus_voltage_v: f64,
    /// Shunt voltage in V
    pub shunt_voltage_v: f64,
    /// Current in A
    pub current_a: f64,
    /// Power in W
    pub power_w: f64,
    /// The chip flagged an overflow in the current or power calculation
    pub math_overflow: bool,
}

/// A shunt voltage measurement as read from the shunt voltage register
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ShuntVoltage(i16);

impl ShuntVoltage {
    /// Interpret the bits of the register as a two's complement value
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(signed_from_bits(bits))
    }

    /// Create `ShuntVoltage` from a value in units of 10µV
    #[must_use]
    pub const fn from_10uv(value: i16) -> Self {
        Self(value)
    }

    /// Get the shunt voltage in 10µV, this is the resolution used by the INA219
    #[must_use]
    pub const fn shunt_voltage_10uv(self) -> i16 {
        self.0
    }

    /// Get the shunt voltage in V
    #[must_use]
    pub fn shunt_voltage_v(self) -> f64 {
        f64::from(self.0) * SHUNT_VOLTAGE_LSB_V
    }
}

/// Contents of the bus voltage register
///
/// This contains next to the measurement also some flags about the last measurement.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct BusVoltage(u16);

impl BusVoltage {
    /// Create `BusVoltage` from the contents of the register.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Return the bus voltage in the internal resolution of 4mV
    #[must_use]
    pub const fn voltage_4mv(self) -> u16 {
        self.0 >> 3
    }

    /// Return the bus voltage in V
    #[must_use]
    pub fn voltage_v(self) -> f64 {
        f64::from(self.voltage_4mv()) * BUS_VOLTAGE_LSB_V
    }

    /// Check if the conversion ready flag is set
    ///
    /// The flag is set when a conversion finished and cleared when the power register is read or
    /// the configuration is written.
    #[must_use]
    pub const fn is_conversion_ready(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// This flag is set if the power or current calculation overflowed. Thus the power and/or
    /// current data might be wrong.
    #[must_use]
    pub const fn has_math_overflowed(self) -> bool {
        self.0 & 1 != 0
    }
}
