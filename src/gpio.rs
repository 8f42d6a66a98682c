//! nRF52840 implementation of the button platform.
//!
//! Each button pin is a [`Flex`] parked in a slot. The platform configures
//! and reads it from there through the HAL. While a button is edge-armed,
//! [`edge_task`] takes the pin out of the slot to wait on it, and puts it back
//! before handing over to the tick. Edge and tick arming reach the tasks as
//! [`Signal`]s. [`tick_task`] owns the embassy-time ticker.

use core::cell::RefCell;
use core::pin::pin;

use defmt::Format;
use embassy_nrf::gpio::{AnyPin, Flex, Pull};
use embassy_nrf::interrupt::{self, Interrupt, InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use futures::future::{select, Either};

use crate::board::{self, Buttons, BUTTON_COUNT};
use crate::config::{AttachOptions, ButtonId, Edge, Level};
use crate::hal::{EdgeInterrupt, Gpio, InterruptController, TickSource};

type ArmSignal = Signal<CriticalSectionRawMutex, Option<Edge>>;
type PinSlot = Mutex<CriticalSectionRawMutex, RefCell<Option<Flex<'static, AnyPin>>>>;

#[allow(clippy::declare_interior_mutable_const)]
const DISARMED: ArmSignal = Signal::new();
#[allow(clippy::declare_interior_mutable_const)]
const EMPTY: PinSlot = Mutex::new(RefCell::new(None));

static EDGE_ARM: [ArmSignal; BUTTON_COUNT] = [DISARMED; BUTTON_COUNT];
static PINS: [PinSlot; BUTTON_COUNT] = [EMPTY; BUTTON_COUNT];
static TICK_ARM: Signal<CriticalSectionRawMutex, bool> = Signal::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum AttachError {
    UnknownPin(u8),
}

/// Hand the pin of `button` to the platform. Call before `init`.
pub fn install_pin(button: ButtonId, pin: AnyPin) {
    let mut flex = Flex::new(pin);
    flex.set_as_input(Pull::Up);
    PINS[button.index()].lock(|slot| *slot.borrow_mut() = Some(flex));
}

pub struct NrfPlatform;

fn index_of(pin: u8) -> Option<usize> {
    board::BUTTONS.iter().position(|b| b.pin == pin)
}

fn with_pin<R>(pin: u8, f: impl FnOnce(&mut Flex<'static, AnyPin>) -> R) -> Option<R> {
    let index = index_of(pin)?;
    PINS[index].lock(|slot| slot.borrow_mut().as_mut().map(f))
}

impl Gpio for NrfPlatform {
    type Pin = u8;

    fn configure_as_input_pullup(&mut self, pin: u8) {
        if with_pin(pin, |flex| flex.set_as_input(Pull::Up)).is_none() {
            trace!("pin {} is with its edge watcher", pin);
        }
    }

    fn read_level(&mut self, pin: u8) -> Level {
        match with_pin(pin, |flex| Level::from(flex.is_high())) {
            Some(level) => level,
            // Taken by edge_task, which reports the active level itself.
            None => index_of(pin)
                .map(|index| board::BUTTONS[index].active_level.inverted())
                .unwrap_or(Level::High),
        }
    }
}

impl EdgeInterrupt for NrfPlatform {
    type Error = AttachError;

    fn attach(
        &mut self,
        pin: u8,
        edge: Edge,
        button: ButtonId,
        options: AttachOptions,
    ) -> Result<(), AttachError> {
        let index = index_of(pin).ok_or(AttachError::UnknownPin(pin))?;
        trace!("attach pin {} button {} {} {}", pin, button, edge, options);
        EDGE_ARM[index].signal(Some(edge));
        Ok(())
    }

    fn detach(&mut self, pin: u8) {
        if let Some(index) = index_of(pin) {
            EDGE_ARM[index].signal(None);
        }
    }
}

impl InterruptController for NrfPlatform {
    type Vector = Interrupt;
    type Priority = Priority;

    fn set_priority(&mut self, vector: Interrupt, priority: Priority) {
        vector.set_priority(priority);
    }

    fn clear_pending(&mut self, vector: Interrupt) {
        vector.unpend();
    }

    fn enable(&mut self, vector: Interrupt) {
        // SAFETY: the tick vector is RTC1, whose handler belongs to the embassy time driver.
        unsafe { vector.enable() };
    }
}

impl TickSource for NrfPlatform {
    const INTERVAL_MS: u16 = board::DEBOUNCE_INTERVAL_MS;
    const VECTOR: Interrupt = interrupt::RTC1;
    const PRIORITY: Priority = board::TICK_PRIORITY;

    fn enable_tick(&mut self) {
        TICK_ARM.signal(true);
    }

    fn disable_tick(&mut self) {
        TICK_ARM.signal(false);
    }
}

enum Wake {
    Edge,
    Rearm(Option<Edge>),
}

/// Waits for `button` to reach its active level while it is edge-armed.
// pool_size tracks board::BUTTON_COUNT.
#[embassy_executor::task(pool_size = 1)]
pub async fn edge_task(buttons: &'static Buttons, button: ButtonId) -> ! {
    let arm = &EDGE_ARM[button.index()];
    let slot = &PINS[button.index()];
    let mut armed = None;
    loop {
        let Some(edge) = armed else {
            armed = arm.wait().await;
            continue;
        };
        let Some(mut flex) = slot.lock(|s| s.borrow_mut().take()) else {
            warn!("button {}: no pin installed", button);
            armed = arm.wait().await;
            continue;
        };

        let wake = match select(pin!(wait_for_active(&mut flex, edge)), pin!(arm.wait())).await {
            Either::Left(_) => Wake::Edge,
            Either::Right((next, _)) => Wake::Rearm(next),
        };
        // Back in the slot before the tick needs to sample it.
        slot.lock(|s| *s.borrow_mut() = Some(flex));

        match wake {
            // Disarmed by on_edge; the release re-arms through the signal.
            Wake::Edge => {
                armed = None;
                buttons.on_edge(button);
            }
            Wake::Rearm(next) => armed = next,
        }
    }
}

// Port DETECT is level sensed, so a button already held when armed fires at once.
async fn wait_for_active(flex: &mut Flex<'static, AnyPin>, edge: Edge) {
    match edge {
        Edge::Falling => flex.wait_for_low().await,
        Edge::Rising => flex.wait_for_high().await,
    }
}

/// Runs the debounce tick while any button is held.
#[embassy_executor::task]
pub async fn tick_task(buttons: &'static Buttons) -> ! {
    loop {
        if !TICK_ARM.wait().await {
            continue;
        }

        let mut ticker = Ticker::every(Duration::from_millis(board::DEBOUNCE_INTERVAL_MS as u64));
        loop {
            match select(pin!(ticker.next()), pin!(TICK_ARM.wait())).await {
                Either::Left(_) => {
                    if let Err(e) = buttons.tick_round() {
                        warn!("tick round: {}", e);
                    }
                }
                Either::Right((true, _)) => {}
                Either::Right((false, _)) => break,
            }
        }
    }
}
