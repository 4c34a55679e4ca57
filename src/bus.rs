use std::fmt;
use crate::constants::{DEFAULT_SPEED, MAX_ACCEPTANCE_FILTERS};
use crate::pool::FilterSlotPool;

/// Receive mode of a bus's acceptance filter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReceiveMode {
    /// Only frames matching an entry of the filter table are received.
    Normal,

    /// The filter is bypassed and every frame is received.
    Bypass,
}

impl ReceiveMode {
    /// `true` requests `Normal`, `false` requests `Bypass`.
    #[inline]
    pub fn from_enabled(enabled: bool) -> ReceiveMode {
        if enabled {
            ReceiveMode::Normal
        } else {
            ReceiveMode::Bypass
        }
    }
}

impl fmt::Display for ReceiveMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ReceiveMode::Normal => write!(f, "normal"),
            ReceiveMode::Bypass => write!(f, "bypass"),
        }
    }
}

/// Static configuration of one CAN controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// 1-based controller index
    pub address: u8,
    /// Network interface name used by socket based controllers
    pub interface: String,
    /// Bus speed in bit/s
    pub speed: u32,
    /// Operating mode if `true`, listen only otherwise
    pub writable: bool,
    /// Number of hardware filter slots
    pub max_filters: usize,
    /// Identifiers installed as filters when the bus is brought up
    pub default_filters: Vec<u32>,
}

impl BusConfig {
    pub fn new(address: u8, interface: &str) -> BusConfig {
        BusConfig {
            address,
            interface: interface.to_owned(),
            speed: DEFAULT_SPEED,
            writable: false,
            max_filters: MAX_ACCEPTANCE_FILTERS,
            default_filters: Vec::new(),
        }
    }

    pub fn speed(mut self, speed: u32) -> BusConfig {
        self.speed = speed;
        self
    }

    pub fn writable(mut self, writable: bool) -> BusConfig {
        self.writable = writable;
        self
    }

    pub fn max_filters(mut self, max_filters: usize) -> BusConfig {
        self.max_filters = max_filters;
        self
    }

    pub fn default_filters(mut self, ids: &[u32]) -> BusConfig {
        self.default_filters = ids.to_vec();
        self
    }

    /// 0-based index used in filter tables.
    #[inline]
    pub fn controller_index(&self) -> u8 {
        self.address.saturating_sub(1)
    }
}

/// CanBus
///
/// One physical CAN controller together with its filter slots. Buses start
/// out in `Bypass`, so nothing is dropped before the first filter is added.
#[derive(Debug)]
pub struct CanBus {
    config: BusConfig,
    pub(crate) filters: FilterSlotPool,
    pub(crate) mode: ReceiveMode,
    // last table apply was rejected
    pub(crate) table_stale: bool,
}

impl CanBus {
    pub fn new(config: BusConfig) -> CanBus {
        let filters = FilterSlotPool::new(config.max_filters);

        CanBus {
            config,
            filters,
            mode: ReceiveMode::Bypass,
            table_stale: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    #[inline]
    pub fn address(&self) -> u8 {
        self.config.address
    }

    #[inline]
    pub fn filters(&self) -> &FilterSlotPool {
        &self.filters
    }

    #[inline]
    pub fn mode(&self) -> ReceiveMode {
        self.mode
    }

    /// `true` if the controller rejected the last filter table, i.e. the
    /// hardware may not match the assigned slots.
    #[inline]
    pub fn table_stale(&self) -> bool {
        self.table_stale
    }
}
