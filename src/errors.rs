//! Errors that can be returned by the different functions
//!
//! Register accesses return the error type of the register port unchanged. Only construction of
//! the driver wraps it, so the port can be handed back to the caller.

use core::fmt::{Debug, Display, Formatter};

/// The driver could not be initialized because writing the configuration or the calibration failed
///
/// The port is returned so the caller can retry or reuse the bus.
pub struct InitializationError<Port, E> {
    error: E,
    port: Port,
}

impl<Port, E> InitializationError<Port, E> {
    pub(crate) const fn new(error: E, port: Port) -> Self {
        Self { error, port }
    }

    /// The error reported by the register port
    pub const fn error(&self) -> &E {
        &self.error
    }

    /// Give back the port that was passed to the constructor
    pub fn into_port(self) -> Port {
        self.port
    }

    /// Split into the error and the port
    pub fn into_parts(self) -> (E, Port) {
        (self.error, self.port)
    }
}

impl<Port, E: Debug> Debug for InitializationError<Port, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InitializationError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<Port, E: Debug> Display for InitializationError<Port, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "I/O error during initialization: {:?}", self.error)
    }
}

#[cfg(feature = "std")]
impl<Port, E> std::error::Error for InitializationError<Port, E>
where
    E: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// A parameter passed to [`Calibration::new`](crate::calibration::Calibration::new) was not finite
/// and positive
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InvalidCalibration {
    /// The shunt resistance in Ω
    ShuntResistance(f64),
    /// The maximum expected current in A
    MaxExpectedCurrent(f64),
}

impl Display for InvalidCalibration {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ShuntResistance(r) => {
                write!(f, "Shunt resistance must be positive, got {r} Ohm")
            }
            Self::MaxExpectedCurrent(i) => {
                write!(f, "Maximum expected current must be positive, got {i} A")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidCalibration {}
