use log::{debug, warn};
use crate::bus::{CanBus, ReceiveMode};
use crate::controller::{self, BusModeController, InitLatch};
use crate::errors::FilterError;
use crate::id::StandardId;
use crate::table::build_filter_table;

/// AcceptanceFilterManager
///
/// Hands out the filter slots of each bus and keeps the hardware in step
/// with them. A bus with no filters is kept in `Bypass`, a bus with at least
/// one filter in `Normal`.
///
/// The manager owns the controller and borrows the bus for every call, so
/// each bus keeps sole ownership of its slots. Calls for the same bus must
/// not interleave; nothing here is meant to run from interrupt context.
pub struct AcceptanceFilterManager<C> {
    controller: C,
    latch: &'static InitLatch,
}

impl<C: BusModeController> AcceptanceFilterManager<C> {
    /// Create a manager that initializes controllers through the process
    /// wide latch.
    pub fn new(controller: C) -> AcceptanceFilterManager<C> {
        AcceptanceFilterManager::with_latch(controller, controller::controllers_initialized())
    }

    pub fn with_latch(controller: C, latch: &'static InitLatch) -> AcceptanceFilterManager<C> {
        AcceptanceFilterManager { controller, latch }
    }

    #[inline]
    pub fn controller(&self) -> &C {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Bring up `buses`.
    ///
    /// Controllers are initialized together, once per latch. Each bus is
    /// then put in its operating mode, switched to `Bypass` if it has no
    /// filters yet, and given its default filters. A bus that fails to come
    /// up is logged and skipped so the remaining buses still start; the
    /// first such error is returned once every bus was tried. Failing to
    /// install a default filter is logged and does not fail bring-up.
    pub fn initialize(&mut self, buses: &mut [CanBus]) -> Result<(), FilterError> {
        controller::initialize_all_controllers_with(self.latch, &mut self.controller, buses)?;

        let mut result = Ok(());
        for bus in buses.iter_mut() {
            if let Err(e) = self.initialize_bus(bus) {
                debug!("Unable to bring up bus {}: {}", bus.address(), e);
                if result.is_ok() {
                    result = Err(e);
                }
                continue;
            }

            if !self.configure_default_filters(bus) {
                debug!("Unable to initialize CAN acceptance filters");
            }
        }

        result
    }

    fn initialize_bus(&mut self, bus: &mut CanBus) -> Result<(), FilterError> {
        if bus.config().writable {
            debug!("Initializing bus {} in writable mode", bus.address());
        } else {
            debug!("Initializing bus {} in listen only mode", bus.address());
        }
        self.controller.configure_operating_mode(bus.config())?;

        // a bus that already holds filters keeps filtering
        if bus.filters.is_empty() {
            self.switch_mode(bus, ReceiveMode::Bypass)?;
        }
        Ok(())
    }

    fn configure_default_filters(&mut self, bus: &mut CanBus) -> bool {
        let ids = bus.config().default_filters.clone();
        let mut all_added = true;

        for id in ids {
            if let Err(e) = self.add_filter(bus, id) {
                debug!("Default filter {:#x} on bus {} not added: {}", id, bus.address(), e);
                all_added = false;
            }
        }

        all_added
    }

    /// Accept frames with identifier `id` on `bus`.
    ///
    /// Adding an id that already has a slot succeeds without touching the
    /// table, unless the previous apply was rejected. A bus in `Bypass` is
    /// switched to `Normal` first. If the controller rejects the new table
    /// the slot stays assigned and the error is returned; calling again
    /// retries the apply.
    ///
    /// A new id on a bus without free slots fails with `ExhaustedPool`
    /// before anything is changed, mode included.
    pub fn add_filter(&mut self, bus: &mut CanBus, id: u32) -> Result<(), FilterError> {
        let id = StandardId::new(id)?;

        let present = bus.filters.contains(id);
        if !present && bus.filters.is_full() {
            debug!("All acceptance filter slots already taken, can't add {}", id);
            return Err(FilterError::ExhaustedPool(id));
        }

        if bus.mode == ReceiveMode::Bypass {
            self.switch_mode(bus, ReceiveMode::Normal)?;
        }

        if present {
            if bus.table_stale {
                return self.apply_table(bus);
            }
            return Ok(());
        }

        let slot = bus.filters.try_allocate(id)?;
        debug!("Acceptance filter {} on bus {} uses slot {}", id, bus.address(), slot);
        self.apply_table(bus)
    }

    /// Stop accepting frames with identifier `id` on `bus`.
    ///
    /// The table is reapplied, and when the last filter goes the bus
    /// switches to `Bypass` first. The table is applied even if the mode
    /// switch failed.
    ///
    /// Removing an id without a slot does nothing, unless an earlier removal
    /// left work undone: a rejected table is applied again and an empty bus
    /// still in `Normal` is switched to `Bypass`. Calling again after a
    /// failure therefore retries it.
    pub fn remove_filter(&mut self, bus: &mut CanBus, id: u32) -> Result<(), FilterError> {
        let id = match StandardId::new(id) {
            Ok(id) => id,
            // can never have been assigned
            Err(_) => return Ok(()),
        };

        if !bus.filters.release(id) {
            return self.finish_removal(bus);
        }

        let mut result = Ok(());
        if bus.filters.is_empty() {
            // when all filters are removed, switch into bypass mode
            result = self.switch_mode(bus, ReceiveMode::Bypass);
        }

        let applied = self.apply_table(bus);
        result.and(applied)
    }

    fn finish_removal(&mut self, bus: &mut CanBus) -> Result<(), FilterError> {
        let mut result = Ok(());
        if bus.filters.is_empty() && bus.mode == ReceiveMode::Normal {
            result = self.switch_mode(bus, ReceiveMode::Bypass);
        }

        if bus.table_stale {
            let applied = self.apply_table(bus);
            result = result.and(applied);
        }
        result
    }

    /// Turn acceptance filtering of `bus` on (`Normal`) or off (`Bypass`).
    ///
    /// This changes reception for every filter on the bus, not only the
    /// caller's.
    pub fn set_mode(&mut self, bus: &mut CanBus, enabled: bool) -> Result<(), FilterError> {
        self.switch_mode(bus, ReceiveMode::from_enabled(enabled))
    }

    // The tracked mode only changes once the controller accepted the switch.
    fn switch_mode(&mut self, bus: &mut CanBus, mode: ReceiveMode) -> Result<(), FilterError> {
        if self.controller.receive_mode_is_global() {
            debug!("The CAN acceptance filter is global - setting {} for all controllers",
                   mode);
        } else {
            debug!("Setting acceptance filter of bus {} to {}", bus.address(), mode);
        }

        match self.controller.set_receive_mode(bus.config(), mode) {
            Ok(()) => {
                bus.mode = mode;
                Ok(())
            }
            Err(e) => {
                warn!("Unable to set bus {} to {} mode: {}", bus.address(), mode, e);
                Err(e.into())
            }
        }
    }

    fn apply_table(&mut self, bus: &mut CanBus) -> Result<(), FilterError> {
        let table = build_filter_table(bus.config().controller_index(), bus.filters.snapshot());
        debug!("Applying acceptance filter table {} to bus {}", table, bus.address());

        match self.controller.apply_filter_table(bus.config(), &table) {
            Ok(()) => {
                bus.table_stale = false;
                Ok(())
            }
            Err(e) => {
                warn!("Unable to apply acceptance filter table to bus {}: {}", bus.address(), e);
                bus.table_stale = true;
                Err(e.into())
            }
        }
    }
}
