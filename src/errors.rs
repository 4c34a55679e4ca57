use std::{error, fmt, io};
use crate::id::StandardId;

/// Error reported by a `BusModeController` when the hardware or driver
/// refuses a request.
#[derive(Debug)]
pub enum ControllerError {
    /// The underlying device or socket call failed.
    Io(io::Error),

    /// No controller has been brought up for the bus with this address.
    UnknownBus(u8),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ControllerError::Io(ref e) => write!(f, "controller i/o error: {}", e),
            ControllerError::UnknownBus(address) => {
                write!(f, "no controller initialized for bus {}", address)
            }
        }
    }
}

impl error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ControllerError::Io(ref e) => Some(e),
            ControllerError::UnknownBus(_) => None,
        }
    }
}

impl From<io::Error> for ControllerError {
    fn from(e: io::Error) -> ControllerError {
        ControllerError::Io(e)
    }
}

/// Error adding, removing or applying acceptance filters.
///
/// None of these are fatal. The in-memory slot assignment stays the source of
/// truth, so an operation that failed on the hardware side can be retried by
/// calling it again.
#[derive(Debug)]
pub enum FilterError {
    /// The identifier does not fit into 11 bits.
    IdTooLarge(u32),

    /// Every filter slot on the bus is already taken.
    ExhaustedPool(StandardId),

    /// The controller rejected a filter table or receive mode change.
    HardwareApplyFailure(ControllerError),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FilterError::IdTooLarge(id) => {
                write!(f, "identifier {:#x} is not a standard 11 bit id", id)
            }
            FilterError::ExhaustedPool(id) => {
                write!(f, "all acceptance filter slots already taken, can't add {}", id)
            }
            FilterError::HardwareApplyFailure(ref e) => {
                write!(f, "controller rejected filter change: {}", e)
            }
        }
    }
}

impl error::Error for FilterError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            FilterError::HardwareApplyFailure(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<ControllerError> for FilterError {
    fn from(e: ControllerError) -> FilterError {
        FilterError::HardwareApplyFailure(e)
    }
}
