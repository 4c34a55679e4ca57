use crate::constants::{EFF_FLAG, RTR_FLAG, SFF_MASK};
use crate::id::StandardId;

/// CanFilter
///
/// Contains an internal id and mask. Packets are considered to be matched by
/// a filter if `received_id & mask == filter_id & mask` holds true.
///
/// Same memory layout as the kernel's `struct can_filter`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(C)]
pub struct CanFilter {
    _id: u32,
    _mask: u32,
}

impl CanFilter {
    /// Construct a new CAN filter.
    pub fn new(id: u32, mask: u32) -> CanFilter {
        CanFilter {
            _id: id,
            _mask: mask,
        }
    }

    /// Filter passing standard data frames carrying exactly `id`.
    ///
    /// The EFF and RTR flags are part of the mask, so extended frames and
    /// remote requests with the same low 11 bits are rejected.
    pub fn standard(id: StandardId) -> CanFilter {
        CanFilter::new(id.as_raw() as u32, SFF_MASK | EFF_FLAG | RTR_FLAG)
    }

    /// Filter passing every frame.
    pub fn accept_all() -> CanFilter {
        CanFilter::new(0, 0)
    }

    /// Check a raw kernel CAN id (including EFF/RTR flags) against the filter.
    #[inline]
    pub fn matches(&self, raw_id: u32) -> bool {
        raw_id & self._mask == self._id & self._mask
    }
}
