//! Debounce sampler, driven by the shared tick.
//!
//! Each tick re-reads every monitored button. A button still at its active
//! level accumulates one tick interval of `debounce_time`; a button that has
//! let go is handed back to its edge interrupt. Once no button is held the
//! tick is switched off again.

use crate::config::{ButtonId, Level};
use crate::error::ButtonError;
use crate::hal::Platform;
use crate::registry::Registry;

impl<P: Platform, const N: usize> Registry<P, N> {
    /// Re-read `button` and advance its state by one tick.
    pub fn sample(
        &mut self,
        button: ButtonId,
        pressed_level: Level,
    ) -> Result<(), ButtonError<P::Error>> {
        if self.raw_level(button) == pressed_level {
            self.hold(button);
            Ok(())
        } else if self.states[button.index()].active {
            self.release(button)
        } else {
            Ok(())
        }
    }

    /// Tick entry point. Returns whether any monitored button is still held.
    ///
    /// Every monitored button is sampled even if an earlier one fails to
    /// re-arm; the first error is returned.
    pub fn tick_round(&mut self) -> Result<bool, ButtonError<P::Error>> {
        let mut result = Ok(());
        for index in 0..N {
            if !self.states[index].monitored {
                continue;
            }
            let pressed_level = self.buttons[index].active_level;
            let sampled = self.sample(ButtonId(index as u8), pressed_level);
            if result.is_ok() {
                result = sampled;
            }
        }

        let any_active = self.any_active();
        self.tick.update(&mut self.platform, any_active);
        result.map(|()| any_active)
    }

    /// One round right after start-up, for buttons that were already held
    /// before their edge interrupt was armed.
    pub fn poll_initial_state(&mut self) -> Result<bool, ButtonError<P::Error>> {
        let pressed = self.tick_round()?;
        if pressed {
            info!("button held at start-up");
        }
        Ok(pressed)
    }

    fn hold(&mut self, button: ButtonId) {
        if !self.states[button.index()].active {
            self.catch_up(button);
        }
        let state = &mut self.states[button.index()];
        state.debounce_time = state.debounce_time.saturating_add(P::INTERVAL_MS);
    }

    // Held without the edge path having run: enter sampling mode directly.
    fn catch_up(&mut self, button: ButtonId) {
        let state = &mut self.states[button.index()];
        state.active = true;
        state.debounce_time = 0;
        self.disarm_edge(button);
        debug!("button {}: already held", button);
    }

    fn release(&mut self, button: ButtonId) -> Result<(), ButtonError<P::Error>> {
        // Re-arm before clearing `active` so a failed attach leaves the button sampling.
        self.configure_edge(button, true)?;
        let state = &mut self.states[button.index()];
        state.active = false;
        debug!("button {}: released after {} ms", button, state.debounce_time);
        Ok(())
    }
}
