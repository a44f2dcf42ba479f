//! Calibration of the INA219 current and power measurements
//!
//! The INA219 multiplies every shunt voltage sample with the value of the calibration register to
//! produce the current register. The calibration is chosen so that one LSB of the current register
//! corresponds to `max_expected_current / 2^15`, using the full signed 16 bit range.

use crate::errors::InvalidCalibration;

/// Fixed scaling factor from the datasheet equation 1: `CAL = 0.04096 / (current_lsb * r_shunt)`
const CALIBRATION_SCALE: f64 = 0.04096;

/// Number of current LSBs spanning the maximum expected current (signed 16 bit)
const CURRENT_STEPS: f64 = 32768.0;

/// The power register LSB is fixed to 20 times the current register LSB
const POWER_LSB_FACTOR: f64 = 20.0;

/// Calibration derived from the shunt resistor and the maximum expected current
///
/// # Example
/// ```rust
/// use ina219_monitor::calibration::Calibration;
///
/// let cal = Calibration::new(0.1, 3.0).unwrap();
/// assert_eq!(cal.register_bits(), 4473);
/// assert_eq!(cal.current_lsb_a(), 3.0 / 32768.0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Calibration {
    shunt_resistance_ohm: f64,
    max_expected_current_a: f64,
    current_lsb_a: f64,
    register_bits: u16,
}

impl Calibration {
    /// Compute the calibration for a shunt of `shunt_resistance_ohm` Ω and currents up to
    /// `max_expected_current_a` A
    ///
    /// # Errors
    /// Both values must be finite and larger than zero.
    pub fn new(
        shunt_resistance_ohm: f64,
        max_expected_current_a: f64,
    ) -> Result<Self, InvalidCalibration> {
        if !shunt_resistance_ohm.is_finite() || shunt_resistance_ohm <= 0.0 {
            return Err(InvalidCalibration::ShuntResistance(shunt_resistance_ohm));
        }
        if !max_expected_current_a.is_finite() || max_expected_current_a <= 0.0 {
            return Err(InvalidCalibration::MaxExpectedCurrent(max_expected_current_a));
        }

        let current_lsb_a = max_expected_current_a / CURRENT_STEPS;
        let cal = (CALIBRATION_SCALE * CURRENT_STEPS) / (max_expected_current_a * shunt_resistance_ohm);

        // Saturate into an i32 first, then keep the low 16 bits like the register would
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let register_bits = cal as i32 as u16;

        Ok(Self {
            shunt_resistance_ohm,
            max_expected_current_a,
            current_lsb_a,
            register_bits,
        })
    }

    /// Value written to the calibration register
    ///
    /// The chip ignores the lowest bit, so reading the register back yields `register_bits() & !1`.
    #[must_use]
    pub const fn register_bits(&self) -> u16 {
        self.register_bits
    }

    /// Resistance of the shunt in Ω
    #[must_use]
    pub const fn shunt_resistance_ohm(&self) -> f64 {
        self.shunt_resistance_ohm
    }

    /// Maximum expected current in A
    #[must_use]
    pub const fn max_expected_current_a(&self) -> f64 {
        self.max_expected_current_a
    }

    /// The value of the least significant bit in the current register in A
    #[must_use]
    pub const fn current_lsb_a(&self) -> f64 {
        self.current_lsb_a
    }

    /// The value of the least significant bit in the power register in W
    #[must_use]
    pub fn power_lsb_w(&self) -> f64 {
        POWER_LSB_FACTOR * self.current_lsb_a
    }

    /// Current in A represented by the signed contents of the current register
    #[must_use]
    pub fn current_from_register(&self, reg: i16) -> f64 {
        f64::from(reg) * self.current_lsb_a
    }

    /// Power in W represented by the unsigned contents of the power register
    #[must_use]
    pub fn power_from_register(&self, reg: u16) -> f64 {
        f64::from(reg) * POWER_LSB_FACTOR * self.current_lsb_a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_values() {
        let cal = Calibration::new(0.1, 3.0).unwrap();
        assert_eq!(cal.register_bits(), 4473);
        assert_eq!(cal.current_lsb_a(), 3.0 / 32768.0);
        assert_eq!(cal.shunt_resistance_ohm(), 0.1);
        assert_eq!(cal.max_expected_current_a(), 3.0);

        let cal = Calibration::new(0.01, 10.0).unwrap();
        assert_eq!(cal.register_bits(), 13421);
        assert_eq!(cal.current_lsb_a(), 10.0 / 32768.0);

        let cal = Calibration::new(0.5, 0.4).unwrap();
        assert_eq!(cal.register_bits(), 6710);
    }

    #[test]
    fn matches_floating_point_formula() {
        for r_milli in 1..=100 {
            for i_centi in 1..=100 {
                let r = f64::from(r_milli) / 1_000.0;
                let i = f64::from(i_centi) / 100.0;
                let expected = f64::floor(0.04096 * 32768.0 / (i * r));
                if expected > f64::from(u16::MAX) {
                    continue;
                }

                let cal = Calibration::new(r, i).unwrap();
                assert_eq!(f64::from(cal.register_bits()), expected, "r={r} i={i}");
                assert_eq!(cal.current_lsb_a(), i / 32768.0);
            }
        }
    }

    #[test]
    fn large_values_keep_low_sixteen_bits() {
        // 134217.728 does not fit the register
        let cal = Calibration::new(1.0, 0.01).unwrap();
        assert_eq!(cal.register_bits(), 3145);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            Calibration::new(0.0, 1.0),
            Err(InvalidCalibration::ShuntResistance(0.0))
        );
        assert_eq!(
            Calibration::new(-0.1, 1.0),
            Err(InvalidCalibration::ShuntResistance(-0.1))
        );
        assert_eq!(
            Calibration::new(0.1, 0.0),
            Err(InvalidCalibration::MaxExpectedCurrent(0.0))
        );
        assert!(Calibration::new(f64::NAN, 1.0).is_err());
        assert!(Calibration::new(0.1, f64::INFINITY).is_err());
    }

    #[test]
    fn conversions() {
        let cal = Calibration::new(0.1, 3.2768).unwrap();
        let lsb = 3.2768 / 32768.0;

        assert_eq!(cal.current_from_register(-1), -lsb);
        assert_eq!(cal.current_from_register(10_000), 10_000.0 * lsb);
        assert_eq!(cal.power_lsb_w(), 20.0 * lsb);
        assert_eq!(cal.power_from_register(5990), 5990.0 * 20.0 * lsb);
    }
}
