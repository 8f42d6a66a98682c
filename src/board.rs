//! Board table for the nRF52840-DK.

use embassy_nrf::interrupt::Priority;

use crate::config::{ButtonConfig, ButtonId, Level};
use crate::gpio::NrfPlatform;
use crate::shared::SharedButtons;

pub const BUTTON_COUNT: usize = 1;

/// Debounce quantum, and the period of the tick while a button is held.
pub const DEBOUNCE_INTERVAL_MS: u16 = 1;

/// Priority of the tick vector (RTC1, shared with the embassy time driver).
pub const TICK_PRIORITY: Priority = Priority::P2;
pub const GPIOTE_PRIORITY: Priority = Priority::P2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
#[repr(u8)]
pub enum BoardButton {
    Mode = 0,
}

impl From<BoardButton> for ButtonId {
    fn from(value: BoardButton) -> Self {
        ButtonId(value as u8)
    }
}

/// Pins are `port * 32 + pin`. Button 1 on the DK is P0.11, wired to ground.
pub const BUTTONS: [ButtonConfig<u8>; BUTTON_COUNT] = [ButtonConfig::new(11, Level::Low)];

pub type Buttons = SharedButtons<NrfPlatform, BUTTON_COUNT>;
