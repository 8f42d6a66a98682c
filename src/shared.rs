//! A [`Registry`] reachable from interrupt handlers, tasks and the main loop.
//!
//! Every call takes one critical section, so a query never sees a button
//! half way through a transition.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::{ButtonId, ButtonMode, Level};
use crate::error::ButtonError;
use crate::hal::Platform;
use crate::registry::{ButtonState, Registry};

pub struct SharedButtons<P: Platform, const N: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Registry<P, N>>>,
}

impl<P: Platform, const N: usize> SharedButtons<P, N> {
    pub const fn new(registry: Registry<P, N>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(registry)),
        }
    }

    /// Run `f` with exclusive access to the registry.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Registry<P, N>) -> R) -> R {
        self.inner.lock(|registry| f(&mut registry.borrow_mut()))
    }

    pub fn init(&self, button: ButtonId, mode: ButtonMode) -> Result<(), ButtonError<P::Error>> {
        self.lock(|r| r.init(button, mode))
    }

    pub fn uninit(&self) {
        self.lock(|r| r.uninit())
    }

    pub fn configure_edge(&self, button: ButtonId, enable: bool) -> Result<(), ButtonError<P::Error>> {
        self.lock(|r| r.configure_edge(button, enable))
    }

    pub fn on_edge(&self, button: ButtonId) {
        self.lock(|r| r.on_edge(button))
    }

    pub fn tick_round(&self) -> Result<bool, ButtonError<P::Error>> {
        self.lock(|r| r.tick_round())
    }

    pub fn poll_initial_state(&self) -> Result<bool, ButtonError<P::Error>> {
        self.lock(|r| r.poll_initial_state())
    }

    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.lock(|r| r.is_pressed(button))
    }

    pub fn pressed_duration(&self, button: ButtonId) -> u16 {
        self.lock(|r| r.pressed_duration(button))
    }

    pub fn reset_debounce(&self, button: ButtonId) {
        self.lock(|r| r.reset_debounce(button))
    }

    pub fn raw_level(&self, button: ButtonId) -> Level {
        self.lock(|r| r.raw_level(button))
    }

    /// Pressed flag and duration read together.
    pub fn state(&self, button: ButtonId) -> ButtonState {
        self.lock(|r| r.state(button))
    }
}
