#![cfg_attr(not(test), no_std)]
#![cfg_attr(feature = "firmware", feature(type_alias_impl_trait))]

#[macro_use]
mod fmt;

pub mod config;
pub mod debouncer;
pub mod error;
pub mod hal;
pub mod registry;
pub mod shared;
pub mod tick;

#[cfg(feature = "firmware")]
pub mod board;
#[cfg(feature = "firmware")]
pub mod gpio;

#[cfg(test)]
mod mock;

pub use config::{AttachOptions, ButtonConfig, ButtonId, ButtonMode, Edge, Level};
pub use error::ButtonError;
pub use hal::{EdgeInterrupt, Gpio, InterruptController, Platform, TickSource};
pub use registry::{ButtonState, Registry};
pub use shared::SharedButtons;
pub use tick::TickGate;
