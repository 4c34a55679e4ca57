//! Fills every acceptance filter slot of `vcan0`, overflows it, then drains
//! it again. Run with `RUST_LOG=debug` to watch the mode switches.
//!
//! ```text
//! sudo ip link add dev vcan0 type vcan && sudo ip link set up vcan0
//! RUST_LOG=debug cargo run --example filter_scenario
//! ```

extern crate canfilter;
extern crate env_logger;
extern crate log;

use canfilter::{AcceptanceFilterManager, BusConfig, CanBus, SocketCanController};

fn main() {
    env_logger::init();

    let mut buses = vec![CanBus::new(BusConfig::new(1, "vcan0").writable(true))];
    let mut manager = AcceptanceFilterManager::new(SocketCanController::new());

    if let Err(e) = manager.initialize(&mut buses) {
        log::error!("Unable to bring up vcan0: {}", e);
        return;
    }

    let bus = &mut buses[0];
    let ids = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60];

    for &id in ids.iter() {
        match manager.add_filter(bus, id) {
            Ok(()) => log::info!("Added {:#x}, bus is in {} mode", id, bus.mode()),
            Err(e) => log::info!("Add {:#x} failed: {}", id, e),
        }
    }

    if let Err(e) = manager.add_filter(bus, 0x70) {
        log::info!("Add 0x70 failed as expected: {}", e);
    }

    for &id in ids.iter() {
        match manager.remove_filter(bus, id) {
            Ok(()) => log::info!("Removed {:#x}, bus is in {} mode", id, bus.mode()),
            Err(e) => log::info!("Remove {:#x} failed: {}", id, e),
        }
    }
}
