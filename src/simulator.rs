//! Software model of the INA219 register file
//!
//! The [`Simulator`] implements the register port traits without any hardware. Shunt and bus
//! voltage are injected as physical values; the current and power registers are derived from them
//! and the calibration register using the integer arithmetic of the chip, including truncation to
//! 16 bits and the math overflow flag.
//!
//! # Example
//! ```rust
//! use ina219_monitor::register::RegisterAddress;
//! use ina219_monitor::simulator::Simulator;
//!
//! // Example application of the datasheet
//! let mut sim = Simulator::new(20e-3, 11.98);
//! sim.write(RegisterAddress::Calibration, 20480);
//! assert_eq!(sim.read_signed(RegisterAddress::Current), 10000);
//! assert_eq!(sim.read(RegisterAddress::Power), 5990);
//! ```

use crate::measurements::{BUS_VOLTAGE_LSB_V, SHUNT_VOLTAGE_LSB_V};
use crate::register::RegisterAddress;
#[cfg(any(feature = "sync", feature = "async"))]
use core::convert::Infallible;

/// Configuration register value after power on
const CONFIGURATION_RESET: u16 = 0x399F;

/// Bit 14 of the configuration register is unused and always reads 0
const CONFIGURATION_MASK: u16 = 0xBFFF;

/// The lowest bit of the calibration register is always 0
const CALIBRATION_MASK: u16 = 0xFFFE;

/// Shunt codes beyond this magnitude raise the math overflow flag
const OVERFLOW_THRESHOLD: u32 = 32000;

const MATH_OVERFLOW: u16 = 0b1;

/// Divisor applied to `shunt * calibration` to produce the current register
const CURRENT_DIVISOR: i32 = 4096;

/// Divisor applied to `current * bus` to produce the power register
const POWER_DIVISOR: i32 = 5000;

/// Register level simulation of an INA219
#[derive(Debug, Clone, PartialEq)]
pub struct Simulator {
    configuration: u16,
    calibration: u16,
    shunt_voltage_v: f64,
    bus_voltage_v: f64,
}

impl Simulator {
    /// Create a simulator in its power on state, measuring the given voltages
    #[must_use]
    pub const fn new(shunt_voltage_v: f64, bus_voltage_v: f64) -> Self {
        Self {
            configuration: CONFIGURATION_RESET,
            calibration: 0,
            shunt_voltage_v,
            bus_voltage_v,
        }
    }

    /// Change the simulated voltage across the shunt
    pub fn set_shunt_voltage(&mut self, shunt_voltage_v: f64) {
        self.shunt_voltage_v = shunt_voltage_v;
    }

    /// Change the simulated bus voltage
    pub fn set_bus_voltage(&mut self, bus_voltage_v: f64) {
        self.bus_voltage_v = bus_voltage_v;
    }

    /// Write a register
    ///
    /// Only configuration and calibration are writable, writes to other registers are ignored.
    pub fn write(&mut self, register: RegisterAddress, value: u16) {
        if !register.is_writable() {
            return;
        }
        if register == RegisterAddress::Configuration {
            self.configuration = value & CONFIGURATION_MASK;
        } else {
            self.calibration = value & CALIBRATION_MASK;
        }
    }

    /// Read a register as a two's complement value
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn read_signed(&self, register: RegisterAddress) -> i16 {
        match register {
            RegisterAddress::Configuration => self.configuration as i16,
            RegisterAddress::ShuntVoltage => self.shunt_code() as i16,
            RegisterAddress::BusVoltage => {
                let mut bits = self.bus_code();
                if self.shunt_code().unsigned_abs() > OVERFLOW_THRESHOLD {
                    bits |= i32::from(MATH_OVERFLOW);
                }
                bits as i16
            }
            RegisterAddress::Power => self.power_code() as i16,
            RegisterAddress::Current => self.current_code() as i16,
            RegisterAddress::Calibration => self.calibration as i16,
        }
    }

    /// Read a register as an unsigned value
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn read(&self, register: RegisterAddress) -> u16 {
        self.read_signed(register) as u16
    }

    /// Shunt voltage in units of 10µV, rounded half up and not clamped to 16 bits
    ///
    /// Voltages beyond the `i32` range saturate.
    #[allow(clippy::cast_possible_truncation)]
    fn shunt_code(&self) -> i32 {
        libm::floor(self.shunt_voltage_v / SHUNT_VOLTAGE_LSB_V + 0.5) as i32
    }

    /// Bus voltage register without flags, the value in units of 4mV starts at bit 3
    #[allow(clippy::cast_possible_truncation)]
    fn bus_code(&self) -> i32 {
        (libm::floor(self.bus_voltage_v / BUS_VOLTAGE_LSB_V) as i32).wrapping_shl(3)
    }

    /// Current register before truncation to 16 bits
    ///
    /// Both divisions round towards negative infinity, so a negative remainder lowers the result
    /// by one compared to truncating division.
    fn current_code(&self) -> i32 {
        self.shunt_code()
            .wrapping_mul(i32::from(self.calibration))
            .div_euclid(CURRENT_DIVISOR)
    }

    /// Power register before truncation to 16 bits
    fn power_code(&self) -> i32 {
        self.current_code()
            .wrapping_mul(self.bus_code() >> 3)
            .div_euclid(POWER_DIVISOR)
    }
}

#[cfg(feature = "sync")]
impl crate::blocking::RegisterPort for Simulator {
    type Error = Infallible;

    fn write_register(&mut self, register: RegisterAddress, value: u16) -> Result<(), Infallible> {
        self.write(register, value);
        Ok(())
    }

    fn read_register(&mut self, register: RegisterAddress) -> Result<u16, Infallible> {
        Ok(self.read(register))
    }

    fn read_signed_register(&mut self, register: RegisterAddress) -> Result<i16, Infallible> {
        Ok(self.read_signed(register))
    }
}

#[cfg(feature = "async")]
impl crate::r#async::RegisterPort for Simulator {
    type Error = Infallible;

    async fn write_register(
        &mut self,
        register: RegisterAddress,
        value: u16,
    ) -> Result<(), Infallible> {
        self.write(register, value);
        Ok(())
    }

    async fn read_register(&mut self, register: RegisterAddress) -> Result<u16, Infallible> {
        Ok(self.read(register))
    }

    async fn read_signed_register(
        &mut self,
        register: RegisterAddress,
    ) -> Result<i16, Infallible> {
        Ok(self.read_signed(register))
    }
}
