//! Ownership of the shared tick source.
//!
//! Every enable/disable of the tick goes through a [`TickGate`], so the
//! "tick runs iff some button is sampling" rule lives in one place.

use crate::hal::TickSource;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickGate {
    armed: bool,
}

impl TickGate {
    pub const fn new() -> Self {
        Self { armed: false }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Disable the tick regardless of what the gate last recorded.
    pub fn reset<T: TickSource>(&mut self, tick: &mut T) {
        tick.disable_tick();
        self.armed = false;
        trace!("tick reset");
    }

    pub fn arm<T: TickSource>(&mut self, tick: &mut T) {
        if !self.armed {
            tick.enable_tick();
            self.armed = true;
            trace!("tick armed");
        }
    }

    pub fn disarm<T: TickSource>(&mut self, tick: &mut T) {
        if self.armed {
            tick.disable_tick();
            self.armed = false;
            trace!("tick disarmed");
        }
    }

    /// Arm while `any_active`, disarm otherwise. Only transitions reach the hardware.
    pub fn update<T: TickSource>(&mut self, tick: &mut T, any_active: bool) {
        if any_active {
            self.arm(tick)
        } else {
            self.disarm(tick)
        }
    }
}
