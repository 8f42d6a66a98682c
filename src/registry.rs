//! Button table, per-button live state and the edge trigger path.
//!
//! A button is in exactly one of two modes once initialised in
//! [`ButtonMode::Interrupt`]: edge-armed (idle, waiting for the pin to reach
//! its active level) or tick-sampling (pressed, re-read on every tick). The
//! sampling half lives in [`debouncer`](crate::debouncer).

use crate::config::{AttachOptions, ButtonConfig, ButtonId, ButtonMode, Level};
use crate::error::ButtonError;
use crate::hal::Platform;
use crate::tick::TickGate;

/// Live state of one button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pub(crate) active: bool,
    /// Milliseconds held, in tick increments. Clamps at `u16::MAX`.
    pub(crate) debounce_time: u16,
    pub(crate) edge_armed: bool,
    /// Edge armed since the last `init`/`uninit`; visited by the tick.
    pub(crate) monitored: bool,
}

impl ButtonState {
    pub const fn new() -> Self {
        Self {
            active: false,
            debounce_time: 0,
            edge_armed: false,
            monitored: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn debounce_time(&self) -> u16 {
        self.debounce_time
    }

    pub fn is_edge_armed(&self) -> bool {
        self.edge_armed
    }

    pub fn is_monitored(&self) -> bool {
        self.monitored
    }
}

pub struct Registry<P: Platform, const N: usize> {
    pub(crate) platform: P,
    pub(crate) buttons: [ButtonConfig<P::Pin>; N],
    pub(crate) states: [ButtonState; N],
    pub(crate) tick: TickGate,
}

impl<P: Platform, const N: usize> Registry<P, N> {
    // Every slot must be addressable by a `ButtonId`.
    const ID_RANGE: () = assert!(N <= u8::MAX as usize + 1, "too many buttons for ButtonId");

    pub const fn new(platform: P, buttons: [ButtonConfig<P::Pin>; N]) -> Self {
        let () = Self::ID_RANGE;
        Self {
            platform,
            buttons,
            states: [ButtonState::new(); N],
            tick: TickGate::new(),
        }
    }

    /// Bring `button` up in `mode`. In interrupt mode the button starts edge-armed.
    pub fn init(&mut self, button: ButtonId, mode: ButtonMode) -> Result<(), ButtonError<P::Error>> {
        let pin = self.buttons[button.index()].pin;
        self.platform.configure_as_input_pullup(pin);
        if self.states[button.index()].edge_armed {
            self.disarm_edge(button);
        }
        self.states[button.index()] = ButtonState::new();

        let mut armed = Ok(());
        if mode == ButtonMode::Interrupt {
            // Start from a quiet tick; another button that is still held re-arms it below.
            self.tick.reset(&mut self.platform);

            armed = self.configure_edge(button, true);
            if armed.is_ok() {
                self.platform.set_priority(P::VECTOR, P::PRIORITY);
                self.platform.clear_pending(P::VECTOR);
                self.platform.enable(P::VECTOR);
            }
        }

        // Runs on the error path too, so a held button keeps its tick.
        let any_active = self.any_active();
        self.tick.update(&mut self.platform, any_active);
        armed?;

        debug!("button {} initialised, mode {}", button, mode);
        Ok(())
    }

    /// Detach every button's edge interrupt. Live state is left as is.
    pub fn uninit(&mut self) {
        for (config, state) in self.buttons.iter().zip(self.states.iter_mut()) {
            self.platform.detach(config.pin);
            state.edge_armed = false;
            state.monitored = false;
        }
        debug!("buttons uninitialised");
    }

    /// Arm or disarm the edge interrupt of `button`. Arming an armed button is a no-op.
    ///
    /// A successfully armed button joins the set visited by the tick.
    pub fn configure_edge(
        &mut self,
        button: ButtonId,
        enable: bool,
    ) -> Result<(), ButtonError<P::Error>> {
        let config = self.buttons[button.index()];

        if enable {
            if self.states[button.index()].edge_armed {
                return Ok(());
            }
            if let Err(e) = self.platform.attach(
                config.pin,
                config.active_level.entering_edge(),
                button,
                AttachOptions::BUTTON,
            ) {
                warn!("button {}: edge attach failed", button);
                return Err(ButtonError::Attach(e));
            }
            let state = &mut self.states[button.index()];
            state.edge_armed = true;
            state.monitored = true;
        } else {
            self.disarm_edge(button);
        }
        Ok(())
    }

    pub(crate) fn disarm_edge(&mut self, button: ButtonId) {
        self.platform.detach(self.buttons[button.index()].pin);
        self.states[button.index()].edge_armed = false;
    }

    /// Edge entry point, called by the interrupt dispatch layer.
    ///
    /// Hands the button over from the edge interrupt to the tick. An edge
    /// reported for a button that is not edge-armed is stale and ignored.
    pub fn on_edge(&mut self, button: ButtonId) {
        let state = &mut self.states[button.index()];
        if !state.edge_armed {
            trace!("button {}: stale edge", button);
            return;
        }

        state.debounce_time = 0;
        state.active = true;

        self.disarm_edge(button);
        self.tick.arm(&mut self.platform);
        trace!("button {}: edge", button);
    }

    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.states[button.index()].active
    }

    pub fn pressed_duration(&self, button: ButtonId) -> u16 {
        self.states[button.index()].debounce_time
    }

    /// Restart the duration count without touching the mode.
    pub fn reset_debounce(&mut self, button: ButtonId) {
        self.states[button.index()].debounce_time = 0;
    }

    /// Unfiltered pin level. Reconfigures the pin as a pulled-up input first.
    pub fn raw_level(&mut self, button: ButtonId) -> Level {
        let pin = self.buttons[button.index()].pin;
        self.platform.configure_as_input_pullup(pin);
        self.platform.read_level(pin)
    }

    pub fn state(&self, button: ButtonId) -> ButtonState {
        self.states[button.index()]
    }

    pub fn config(&self, button: ButtonId) -> &ButtonConfig<P::Pin> {
        &self.buttons[button.index()]
    }

    pub fn tick_armed(&self) -> bool {
        self.tick.is_armed()
    }

    /// Any monitored button currently pressed.
    pub fn any_active(&self) -> bool {
        self.states.iter().any(|s| s.monitored && s.active)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
