//! SocketCAN backed `BusModeController`.
//!
//! Every bus gets its own raw CAN socket bound to `BusConfig::interface`.
//! Filtering happens in the kernel through the `CAN_RAW_FILTER` socket
//! option: `Normal` installs one exact match filter per table entry,
//! `Bypass` installs a single filter that matches everything. Receive modes
//! are per socket, so switching one bus never affects another.
//!
//! Bitrate and listen only mode belong to the network device and are set
//! with `ip link`, outside of this process.

use std::collections::HashMap;
use std::ffi::CString;
use std::os::unix::io::{AsRawFd, RawFd};
use std::{io, mem, ptr};
use log::debug;
use crate::bus::{BusConfig, ReceiveMode};
use crate::constants::{CAN_RAW, CAN_RAW_FILTER, SOL_CAN_RAW};
use crate::controller::BusModeController;
use crate::errors::ControllerError;
use crate::filter::CanFilter;
use crate::table::FilterTable;

/// Socket address for a CAN interface, as passed to `bind`.
#[derive(Debug)]
#[repr(C)]
struct CanAddr {
    _af_can: libc::c_short,
    if_index: libc::c_int,
    rx_id: u32,
    tx_id: u32,
}

/// A raw CAN socket, closed on drop.
#[derive(Debug)]
pub struct RawCanSocket {
    fd: RawFd,
}

impl RawCanSocket {
    /// Open a raw CAN socket on interface `ifname`, e.g. `can0` or `vcan0`.
    pub fn open(ifname: &str) -> io::Result<RawCanSocket> {
        let name = CString::new(ifname)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "interface name contains a nul byte"))?;

        let if_index = unsafe { libc::if_nametoindex(name.as_ptr()) };
        if if_index == 0 {
            return Err(io::Error::last_os_error());
        }

        let fd = unsafe { libc::socket(libc::PF_CAN, libc::SOCK_RAW, CAN_RAW) };
        if fd == -1 {
            return Err(io::Error::last_os_error());
        }

        let addr = CanAddr {
            _af_can: libc::AF_CAN as libc::c_short,
            if_index: if_index as libc::c_int,
            rx_id: 0,
            tx_id: 0,
        };

        let r = unsafe {
            libc::bind(fd,
                       &addr as *const CanAddr as *const libc::sockaddr,
                       mem::size_of::<CanAddr>() as libc::socklen_t)
        };

        if r == -1 {
            let e = io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(e);
        }

        Ok(RawCanSocket { fd })
    }

    /// Replace the socket's receive filters.
    ///
    /// An empty list makes the socket receive nothing.
    pub fn set_filters(&self, filters: &[CanFilter]) -> io::Result<()> {
        // an empty slice has no first element to point at, the kernel takes
        // a null pointer with zero length instead
        let (optval, optlen) = match filters.first() {
            Some(first) => (first as *const CanFilter as *const libc::c_void,
                            mem::size_of::<CanFilter>() * filters.len()),
            None => (ptr::null(), 0),
        };

        let r = unsafe {
            libc::setsockopt(self.fd, SOL_CAN_RAW, CAN_RAW_FILTER, optval, optlen as libc::socklen_t)
        };

        if r != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(())
    }
}

impl AsRawFd for RawCanSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl Drop for RawCanSocket {
    fn drop(&mut self) {
        unsafe { libc::close(self.fd) };
    }
}

#[derive(Debug)]
struct BusSocket {
    socket: RawCanSocket,
    filters: Vec<CanFilter>,
    mode: ReceiveMode,
}

impl BusSocket {
    fn install(&self, mode: ReceiveMode) -> io::Result<()> {
        match mode {
            ReceiveMode::Normal => self.socket.set_filters(&self.filters),
            ReceiveMode::Bypass => self.socket.set_filters(&[CanFilter::accept_all()]),
        }
    }
}

/// SocketCanController
///
/// `BusModeController` for Linux SocketCAN interfaces. The last applied
/// table of every bus is kept so that switching back to `Normal` reinstalls
/// it.
#[derive(Debug, Default)]
pub struct SocketCanController {
    buses: HashMap<u8, BusSocket>,
}

impl SocketCanController {
    pub fn new() -> SocketCanController {
        SocketCanController::default()
    }

    /// The socket opened for bus `address`, if any.
    pub fn socket(&self, address: u8) -> Option<&RawCanSocket> {
        self.buses.get(&address).map(|b| &b.socket)
    }

    fn bus_mut(&mut self, address: u8) -> Result<&mut BusSocket, ControllerError> {
        self.buses
            .get_mut(&address)
            .ok_or(ControllerError::UnknownBus(address))
    }
}

impl BusModeController for SocketCanController {
    fn initialize_controller(&mut self, bus: &BusConfig) -> Result<(), ControllerError> {
        let socket = RawCanSocket::open(&bus.interface)?;
        debug!("Opened {} for bus {}, bitrate {} is set on the netdev",
               bus.interface,
               bus.address,
               bus.speed);

        let state = BusSocket {
            socket,
            filters: Vec::new(),
            mode: ReceiveMode::Bypass,
        };
        state.install(ReceiveMode::Bypass)?;
        self.buses.insert(bus.address, state);
        Ok(())
    }

    fn configure_operating_mode(&mut self, bus: &BusConfig) -> Result<(), ControllerError> {
        self.bus_mut(bus.address)?;
        if !bus.writable {
            debug!("Bus {} is listen only, {} must be configured without transmit",
                   bus.address,
                   bus.interface);
        }
        Ok(())
    }

    fn apply_filter_table(&mut self, bus: &BusConfig, table: &FilterTable)
                          -> Result<(), ControllerError> {
        let state = self.bus_mut(bus.address)?;
        state.filters = table.enabled_ids().map(CanFilter::standard).collect();

        // in bypass the table only takes effect on the next switch to normal
        if state.mode == ReceiveMode::Normal {
            state.install(ReceiveMode::Normal)?;
        }
        Ok(())
    }

    fn set_receive_mode(&mut self, bus: &BusConfig, mode: ReceiveMode)
                        -> Result<(), ControllerError> {
        let state = self.bus_mut(bus.address)?;
        state.install(mode)?;
        state.mode = mode;
        Ok(())
    }
}
