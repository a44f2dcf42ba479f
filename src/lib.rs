//! Driver for the INA219 current/power monitor
//!
//! The driver writes a [configuration](configuration::Configuration) and a
//! [calibration](calibration::Calibration) to the chip when it is created and afterwards converts
//! the contents of the measurement registers into V, A and W.
//!
//! Register access goes through the `RegisterPort` trait. It is implemented for an embedded HAL
//! I2C bus by `I2cRegisters` and in software by the [`Simulator`](simulator::Simulator), which
//! reproduces the integer arithmetic of the chip and needs no hardware.
//!
//! # Example
//! ```rust
//! # #[cfg(feature = "sync")]
//! # {
//! use ina219_monitor::calibration::Calibration;
//! use ina219_monitor::configuration::Configuration;
//! use ina219_monitor::simulator::Simulator;
//! use ina219_monitor::SyncIna219;
//!
//! let calibration = Calibration::new(0.1, 3.0).unwrap();
//! let sim = Simulator::new(20e-3, 12.0);
//! let mut ina = SyncIna219::new(sim, calibration, Configuration::default()).unwrap();
//!
//! assert!((ina.bus_voltage().unwrap() - 12.0).abs() < 1e-9);
//! assert!((ina.current().unwrap() - 0.2).abs() < 1e-3);
//! # }
//! ```
//!
//! # Features
//! * `sync` (default): blocking driver in [`blocking`] using `embedded-hal`
//! * `async` (default): driver in [`r#async`] using `embedded-hal-async`
//! * `std`: implement `std::error::Error` for the error types
//! * `no_transaction`: issue register reads as a separate write and read
//! * `defmt`: log register writes and derive `defmt::Format`

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod address;
pub mod calibration;
pub mod configuration;
pub mod errors;
pub mod measurements;
pub mod register;
pub mod simulator;

#[cfg(feature = "sync")]
pub use blocking::Ina219 as SyncIna219;

#[cfg(feature = "async")]
pub use r#async::Ina219 as AsyncIna219;

/// Blocking driver, generated from [`r#async`] by the build script
#[cfg(feature = "sync")]
pub mod blocking {
    include!(concat!(env!("OUT_DIR"), "/de-asynced.rs"));
}

/// Driver using `embedded-hal-async`
#[cfg(feature = "async")]
pub mod r#async;
