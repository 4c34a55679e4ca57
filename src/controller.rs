use std::sync::atomic::{AtomicBool, Ordering};
use log::debug;
use crate::bus::{BusConfig, CanBus, ReceiveMode};
use crate::errors::ControllerError;
use crate::table::FilterTable;

/// BusModeController
///
/// The hardware side of acceptance filtering. Implementations program
/// controllers; the filter manager decides what to program.
pub trait BusModeController {
    /// Bring up a single controller at `bus.speed`.
    ///
    /// Only ever called from `initialize_all_controllers`, once per bus.
    fn initialize_controller(&mut self, bus: &BusConfig) -> Result<(), ControllerError>;

    /// Put the controller into operating mode if `bus.writable` is set, into
    /// listen only mode otherwise, and enable its interrupts.
    fn configure_operating_mode(&mut self, bus: &BusConfig) -> Result<(), ControllerError>;

    /// Program `table` as the acceptance filter of `bus`.
    fn apply_filter_table(&mut self, bus: &BusConfig, table: &FilterTable)
                          -> Result<(), ControllerError>;

    /// Switch the acceptance filter of `bus` between filtering and bypass.
    fn set_receive_mode(&mut self, bus: &BusConfig, mode: ReceiveMode)
                        -> Result<(), ControllerError>;

    /// Whether `set_receive_mode` changes the mode of every bus at once.
    ///
    /// Some parts share one acceptance filter unit between all controllers,
    /// so the switch is global even though the call names a bus.
    fn receive_mode_is_global(&self) -> bool {
        false
    }
}

/// One-shot flag recording that all controllers have been brought up.
///
/// Starts unset and is set exactly once, after every controller came up.
pub struct InitLatch(AtomicBool);

impl InitLatch {
    pub const fn new() -> InitLatch {
        InitLatch(AtomicBool::new(false))
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self) {
        self.0.store(true, Ordering::Release);
    }
}

static CONTROLLERS_INITIALIZED: InitLatch = InitLatch::new();

/// The process wide latch used by `initialize_all_controllers`.
pub fn controllers_initialized() -> &'static InitLatch {
    &CONTROLLERS_INITIALIZED
}

/// Bring up every controller in `buses`, once per process.
///
/// Initializing a controller wipes the filter tables of all controllers, so
/// they all have to come up together before any filter is set, and never
/// again afterwards. Calls after the first successful one do nothing.
pub fn initialize_all_controllers<C>(controller: &mut C, buses: &[CanBus])
                                     -> Result<(), ControllerError>
    where C: BusModeController
{
    initialize_all_controllers_with(controllers_initialized(), controller, buses)
}

/// `initialize_all_controllers` guarded by an explicit latch.
pub fn initialize_all_controllers_with<C>(latch: &InitLatch,
                                          controller: &mut C,
                                          buses: &[CanBus])
                                          -> Result<(), ControllerError>
    where C: BusModeController
{
    if latch.is_set() {
        debug!("CAN controllers already initialized, skipping");
        return Ok(());
    }

    for bus in buses {
        debug!("Initializing CAN controller {} at {} bit/s",
               bus.address(),
               bus.config().speed);
        controller.initialize_controller(bus.config())?;
    }

    latch.set();
    Ok(())
}
