//! Capabilities the button core needs from the platform.
//!
//! The core never talks to registers. A board implements these traits once
//! (see `gpio::NrfPlatform` for the nRF52840) and tests implement them with
//! recording mocks.

use crate::config::{AttachOptions, ButtonId, Edge, Level};

pub trait Gpio {
    type Pin: Copy;

    fn configure_as_input_pullup(&mut self, pin: Self::Pin);
    fn read_level(&mut self, pin: Self::Pin) -> Level;
}

/// Per-pin edge interrupts.
///
/// Attaching a pin that is already attached must replace the old
/// registration, never add a second one.
pub trait EdgeInterrupt: Gpio {
    type Error;

    /// Route `edge` on `pin` to the edge entry point for `button`.
    fn attach(
        &mut self,
        pin: Self::Pin,
        edge: Edge,
        button: ButtonId,
        options: AttachOptions,
    ) -> Result<(), Self::Error>;

    fn detach(&mut self, pin: Self::Pin);
}

pub trait InterruptController {
    type Vector: Copy;
    type Priority: Copy;

    fn set_priority(&mut self, vector: Self::Vector, priority: Self::Priority);
    fn clear_pending(&mut self, vector: Self::Vector);
    fn enable(&mut self, vector: Self::Vector);
}

/// The periodic tick shared by every button while any of them is held.
pub trait TickSource: InterruptController {
    /// Time between two ticks in milliseconds; the debounce quantum.
    const INTERVAL_MS: u16;
    const VECTOR: Self::Vector;
    const PRIORITY: Self::Priority;

    fn enable_tick(&mut self);
    fn disable_tick(&mut self);
}

/// Everything a [`Registry`](crate::Registry) needs.
pub trait Platform: EdgeInterrupt + TickSource {}

impl<T: EdgeInterrupt + TickSource> Platform for T {}
