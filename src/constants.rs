// Protocol of the PF_CAN Family: Standard?
pub const CAN_RAW: libc::c_int = 1;

pub const SOL_CAN_BASE: libc::c_int = 100;
pub const SOL_CAN_RAW: libc::c_int = SOL_CAN_BASE + CAN_RAW;
pub const CAN_RAW_FILTER: libc::c_int = 1;

/// Special address description flags for the CAN_ID
///
/// EFF/SFF is set in the MSB
pub const EFF_FLAG: u32 = 0x80000000;
/// remote transmission request
pub const RTR_FLAG: u32 = 0x40000000;

/// valid bits in CAN ID for frame formats
/// standard frame format (SFF)
pub const SFF_MASK: u32 = 0x000007ff;

/// Number of hardware acceptance filter slots available per bus.
pub const MAX_ACCEPTANCE_FILTERS: usize = 6;

/// Bus speed used when a `BusConfig` doesn't set one, in bit/s.
pub const DEFAULT_SPEED: u32 = 500_000;
