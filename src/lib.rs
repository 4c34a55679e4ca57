//! CAN acceptance filter management.
//!
//! A CAN controller only passes frames up to software if their identifier
//! matches its acceptance filter. This crate decides what goes into that
//! filter: it hands out the small, fixed number of hardware filter slots of a
//! bus to whoever asks for an identifier, and rebuilds the filter table every
//! time the assignment changes.
//!
//! # Acceptance filtering
//!
//! Frames on a CAN bus are multicast to every node. A vehicle bus easily
//! carries hundreds of different identifiers, most of which a given node
//! does not care about, so controllers offer a lookup table of identifiers to
//! accept and drop everything else in hardware. The table is small (six
//! standard identifiers per bus here by default) and shared by everything
//! that listens on the bus.
//!
//! A controller can also *bypass* its filter and accept every frame. A bus
//! with no filters is always kept in bypass: filtering with an empty table
//! would silently drop all traffic. Adding the first filter switches the bus
//! to normal (filtered) reception, removing the last one switches it back.
//!
//! # Layout
//!
//! * `FilterSlotPool` tracks which slots of a bus are free and which
//!   identifier each assigned slot holds. An identifier never holds more
//!   than one slot.
//! * `AcceptanceFilterManager` adds and removes filters, keeps the receive
//!   mode in step and pushes a fresh `FilterTable` to the hardware after
//!   each change.
//! * `BusModeController` is the hardware side. `SocketCanController`
//!   implements it for Linux SocketCAN interfaces.
//!
//! Controllers are brought up together, once per process, by
//! `initialize_all_controllers`; initializing a controller erases the filter
//! tables of all of them.
//!
//! # Concurrency
//!
//! Nothing here locks. Every operation borrows its `CanBus` mutably and runs
//! to completion without blocking; calls for one bus are expected to come
//! from a single execution context, never from an interrupt handler.

extern crate itertools;
extern crate libc;
extern crate log;

mod bus;
mod constants;
mod controller;
mod errors;
mod filter;
mod id;
mod manager;
mod pool;
#[cfg(target_os = "linux")]
mod socket;
mod table;


pub use bus::{BusConfig, CanBus, ReceiveMode};
pub use constants::{DEFAULT_SPEED, MAX_ACCEPTANCE_FILTERS};
pub use controller::{controllers_initialized, initialize_all_controllers,
                     initialize_all_controllers_with, BusModeController, InitLatch};
pub use errors::{ControllerError, FilterError};
pub use filter::CanFilter;
pub use id::StandardId;
pub use manager::AcceptanceFilterManager;
pub use pool::{FilterEntry, FilterSlotPool};
#[cfg(target_os = "linux")]
pub use socket::{RawCanSocket, SocketCanController};
pub use table::{build_filter_table, FilterTable, TableEntry};
