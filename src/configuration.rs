//! Types used to set the configuration for the INA219
//!
//! [`Configuration`] combines all the settings packed into the configuration register. The operating
//! mode is always continuous measurement of both shunt and bus voltage.
//!
//! # Example
//! The `..` completion can be used to set specific values to change. For example:
//! ```rust
//! use ina219_monitor::configuration::{AdcSetting, Configuration};
//! let conf = Configuration {
//!     bus_adc: AdcSetting::Avg128,
//!     shunt_adc: AdcSetting::Avg128,
//!     .. Default::default()
//! };
//! assert_eq!(conf.as_bits(), 0b0011_1111_1111_1111);
//! ```

use core::ops::RangeInclusive;

/// Measurement range for the bus voltage
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusVoltageRange {
    /// Maximum bus voltage of 16V
    Fsr16v = 0,
    /// Maximum bus voltage of 32V (still limited by 26V IC maximum)
    #[default]
    Fsr32v = 1,
}

impl BusVoltageRange {
    const SHIFT: u8 = 13;
    const MASK: u16 = 1;

    /// The full scale voltage in Volts
    #[must_use]
    pub const fn full_scale_v(self) -> u16 {
        match self {
            BusVoltageRange::Fsr16v => 16,
            BusVoltageRange::Fsr32v => 32,
        }
    }

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Fsr16v,
            _ => Self::Fsr32v,
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self as u16) << Self::SHIFT;
        reg
    }
}

/// Gain of the [PGA](https://en.wikipedia.org/wiki/Programmable-gain_amplifier)
///
/// This sets the maximum shunt voltage that can be measured.
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    /// Gain of 1, range of ±40mV
    Div1 = 0,
    /// Gain of 1/2, range of ±80mV
    Div2 = 1,
    /// Gain of 1/4, range of ±160mV
    Div4 = 2,
    /// Gain of 1/8, range of ±320mV
    #[default]
    Div8 = 3,
}

impl Gain {
    const SHIFT: u8 = 11;
    const MASK: u16 = 0b11;

    /// Shunt voltage range in mV covered by this gain
    #[must_use]
    pub const fn range_mv(self) -> RangeInclusive<i16> {
        match self {
            Gain::Div1 => -40..=40,
            Gain::Div2 => -80..=80,
            Gain::Div4 => -160..=160,
            Gain::Div8 => -320..=320,
        }
    }

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Div1,
            1 => Self::Div2,
            2 => Self::Div4,
            _ => Self::Div8,
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self as u16) << Self::SHIFT;
        reg
    }
}

/// Resolution / averaging mode of the bus or shunt ADC
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdcSetting {
    /// Single 9 bit sample
    Res9Bit = 0b0000,
    /// Single 10 bit sample
    Res10Bit = 0b0001,
    /// Single 11 bit sample
    Res11Bit = 0b0010,
    /// Single 12 bit sample
    #[default]
    Res12Bit = 0b0011,
    /// 2 averaged 12 bit samples
    Avg2 = 0b1001,
    /// 4 averaged 12 bit samples
    Avg4 = 0b1010,
    /// 8 averaged 12 bit samples
    Avg8 = 0b1011,
    /// 16 averaged 12 bit samples
    Avg16 = 0b1100,
    /// 32 averaged 12 bit samples
    Avg32 = 0b1101,
    /// 64 averaged 12 bit samples
    Avg64 = 0b1110,
    /// 128 averaged 12 bit samples
    Avg128 = 0b1111,
}

impl AdcSetting {
    const SHIFT_BUS: u8 = 7;
    const SHIFT_SHUNT: u8 = 3;
    const MASK: u16 = 0b1111;

    /// The 4 bit code written into the configuration register
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    #[must_use]
    const fn from_register<const SHIFT: u8>(reg: u16) -> Self {
        match (reg >> SHIFT) & Self::MASK {
            0b0000 | 0b0100 => Self::Res9Bit,
            0b0001 | 0b0101 => Self::Res10Bit,
            0b0010 | 0b0110 => Self::Res11Bit,
            0b1001 => Self::Avg2,
            0b1010 => Self::Avg4,
            0b1011 => Self::Avg8,
            0b1100 => Self::Avg16,
            0b1101 => Self::Avg32,
            0b1110 => Self::Avg64,
            0b1111 => Self::Avg128,
            // 0b0011, 0b0111 and 0b1000 all select a single 12 bit sample
            _ => Self::Res12Bit,
        }
    }

    #[must_use]
    const fn apply_to_reg<const SHIFT: u8>(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << SHIFT);
        reg |= self.code() << SHIFT;
        reg
    }

    /// Conversion time in µs when this setting is active
    ///
    /// Values according to table 5 in the datasheet.
    #[must_use]
    pub const fn conversion_time_us(self) -> u32 {
        match self {
            AdcSetting::Res9Bit => 84,
            AdcSetting::Res10Bit => 148,
            AdcSetting::Res11Bit => 276,
            AdcSetting::Res12Bit => 532,
            AdcSetting::Avg2 => 1_060,
            AdcSetting::Avg4 => 2_130,
            AdcSetting::Avg8 => 4_260,
            AdcSetting::Avg16 => 8_510,
            AdcSetting::Avg32 => 17_020,
            AdcSetting::Avg64 => 34_050,
            AdcSetting::Avg128 => 68_100,
        }
    }
}

/// Configuration register
///
/// Configures the way the INA219 performs its measurements. The mode bits are fixed to continuous
/// shunt and bus measurement.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Maximum measurement range for the bus voltage
    pub bus_voltage_range: BusVoltageRange,
    /// PGA gain, selecting the shunt voltage range
    pub gain: Gain,
    /// Resolution / averaging for the bus voltage measurement
    pub bus_adc: AdcSetting,
    /// Resolution / averaging for the shunt voltage measurement
    pub shunt_adc: AdcSetting,
}

impl Configuration {
    /// Mode bits for continuous shunt and bus voltage measurement
    pub const MODE_CONTINUOUS: u16 = 0b111;

    /// Decode the settings from a configuration register value
    ///
    /// The reset and mode bits are ignored.
    #[must_use]
    pub const fn from_bits(reg: u16) -> Self {
        Self {
            bus_voltage_range: BusVoltageRange::from_register(reg),
            gain: Gain::from_register(reg),
            bus_adc: AdcSetting::from_register::<{ AdcSetting::SHIFT_BUS }>(reg),
            shunt_adc: AdcSetting::from_register::<{ AdcSetting::SHIFT_SHUNT }>(reg),
        }
    }

    /// Turn this configuration into the register value
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        let Self {
            bus_voltage_range,
            gain,
            bus_adc,
            shunt_adc,
        } = self;

        let mut bits = Self::MODE_CONTINUOUS;
        bits = bus_voltage_range.apply_to_reg(bits);
        bits = gain.apply_to_reg(bits);
        bits = bus_adc.apply_to_reg::<{ AdcSetting::SHIFT_BUS }>(bits);
        bits = shunt_adc.apply_to_reg::<{ AdcSetting::SHIFT_SHUNT }>(bits);
        bits
    }

    /// Time in µs for one full conversion cycle of both voltages
    #[must_use]
    pub const fn conversion_time_us(self) -> u32 {
        self.bus_adc.conversion_time_us() + self.shunt_adc.conversion_time_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_datasheet() {
        let reset_value = 0b0011_1001_1001_1111;

        assert_eq!(Configuration::default().as_bits(), reset_value);
        assert_eq!(
            Configuration::from_bits(reset_value),
            Configuration::default()
        );
    }

    #[test]
    fn bit_layout() {
        let conf = Configuration {
            bus_voltage_range: BusVoltageRange::Fsr16v,
            gain: Gain::Div1,
            bus_adc: AdcSetting::Res9Bit,
            shunt_adc: AdcSetting::Res9Bit,
        };
        assert_eq!(conf.as_bits(), 0x0007);

        let conf = Configuration {
            bus_voltage_range: BusVoltageRange::Fsr32v,
            gain: Gain::Div2,
            bus_adc: AdcSetting::Avg2,
            shunt_adc: AdcSetting::Res11Bit,
        };
        assert_eq!(conf.as_bits(), (1 << 13) | (1 << 11) | (9 << 7) | (2 << 3) | 0x7);
    }

    #[test]
    fn is_inverse() {
        let ranges = [BusVoltageRange::Fsr16v, BusVoltageRange::Fsr32v];
        let gains = [Gain::Div1, Gain::Div2, Gain::Div4, Gain::Div8];
        let adcs = [
            AdcSetting::Res9Bit,
            AdcSetting::Res10Bit,
            AdcSetting::Res11Bit,
            AdcSetting::Res12Bit,
            AdcSetting::Avg2,
            AdcSetting::Avg4,
            AdcSetting::Avg8,
            AdcSetting::Avg16,
            AdcSetting::Avg32,
            AdcSetting::Avg64,
            AdcSetting::Avg128,
        ];

        for bus_voltage_range in ranges {
            for gain in gains {
                for bus_adc in adcs {
                    for shunt_adc in adcs {
                        let conf = Configuration {
                            bus_voltage_range,
                            gain,
                            bus_adc,
                            shunt_adc,
                        };
                        assert_eq!(Configuration::from_bits(conf.as_bits()), conf);
                    }
                }
            }
        }
    }

    #[test]
    fn redundant_twelve_bit_codes() {
        // Bus ADC written as 0b1000, shunt ADC as 0b0111
        let conf = Configuration::from_bits((0b1000 << 7) | (0b0111 << 3));
        assert_eq!(conf.bus_adc, AdcSetting::Res12Bit);
        assert_eq!(conf.shunt_adc, AdcSetting::Res12Bit);
    }

    #[test]
    fn ranges() {
        assert_eq!(BusVoltageRange::Fsr16v.full_scale_v(), 16);
        assert_eq!(BusVoltageRange::Fsr32v.full_scale_v(), 32);
        assert_eq!(Gain::Div1.range_mv(), -40..=40);
        assert_eq!(Gain::Div8.range_mv(), -320..=320);
        assert!(Gain::Div4 > Gain::Div2);
    }

    #[test]
    fn conversion_time() {
        let conf = Configuration {
            bus_adc: AdcSetting::Avg128,
            shunt_adc: AdcSetting::Res9Bit,
            ..Default::default()
        };
        assert_eq!(conf.conversion_time_us(), 68_184);
    }
}
