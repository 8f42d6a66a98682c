#![no_std]
#![no_main]
#![feature(type_alias_impl_trait)]

use defmt_rtt as _;
use embassy_nrf::{self as _, Peripherals};
use panic_probe as _;

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin as _;
use embassy_time::{Duration, Ticker};
use nrf_button::board::{self, BoardButton, Buttons};
use nrf_button::gpio::{edge_task, install_pin, tick_task, NrfPlatform};
use nrf_button::{ButtonId, ButtonMode, Registry};
use static_cell::StaticCell;

static BUTTONS: StaticCell<Buttons> = StaticCell::new();

const REPORT_INTERVAL: Duration = Duration::from_millis(20);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = init_peripherials();

    let mode_pin = p.P0_11.degrade();
    let mode: ButtonId = BoardButton::Mode.into();
    defmt::assert_eq!(mode_pin.psel_bits() as u8, board::BUTTONS[mode.index()].pin);
    install_pin(mode, mode_pin);

    let buttons: &'static Buttons =
        BUTTONS.init(Buttons::new(Registry::new(NrfPlatform, board::BUTTONS)));

    spawner.must_spawn(tick_task(buttons));
    spawner.must_spawn(edge_task(buttons, mode));
    info!("Button tasks spawned");

    unwrap!(buttons.init(mode, ButtonMode::Interrupt));
    match buttons.poll_initial_state() {
        Ok(true) => info!("Button {} held at boot", BoardButton::Mode),
        Ok(false) => {}
        Err(e) => warn!("Initial poll failed: {}", e),
    }
    info!("Buttons initialized");

    let mut ticker = Ticker::every(REPORT_INTERVAL);
    let mut was_pressed = false;
    loop {
        let state = buttons.state(mode);
        if state.is_active() != was_pressed {
            was_pressed = state.is_active();
            if was_pressed {
                info!("Button {} pressed", BoardButton::Mode);
            } else {
                info!(
                    "Button {} released after {} ms",
                    BoardButton::Mode,
                    state.debounce_time()
                );
            }
        }
        ticker.next().await;
    }
}

fn init_peripherials() -> Peripherals {
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = board::GPIOTE_PRIORITY;
    config.time_interrupt_priority = board::TICK_PRIORITY;
    let p = embassy_nrf::init(config);

    info!("Peripherals Initalized");
    p
}
