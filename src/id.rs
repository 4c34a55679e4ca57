use std::fmt;
use crate::constants::SFF_MASK;
use crate::errors::FilterError;

/// StandardId
///
/// An 11 bit CAN identifier (`0..=0x7FF`). Acceptance filters only ever hold
/// standard identifiers; extended frames are not filtered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StandardId(u16);

impl StandardId {
    /// Largest valid standard identifier.
    pub const MAX: StandardId = StandardId(SFF_MASK as u16);

    /// Construct a standard id, failing with `IdTooLarge` if `id` needs more
    /// than 11 bits.
    pub fn new(id: u32) -> Result<StandardId, FilterError> {
        if id > SFF_MASK {
            return Err(FilterError::IdTooLarge(id));
        }

        Ok(StandardId(id as u16))
    }

    #[inline]
    pub fn as_raw(self) -> u16 {
        self.0
    }
}

impl fmt::LowerHex for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
