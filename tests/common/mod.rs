#![allow(dead_code)]

use nrf_button::{
    AttachOptions, ButtonConfig, ButtonId, ButtonMode, Edge, EdgeInterrupt, Gpio,
    InterruptController, Level, Registry, TickSource,
};

pub const TICK_MS: u16 = 5;
pub const RTC1: u16 = 17;

pub const MODE: ButtonId = ButtonId(0);
pub const USER: ButtonId = ButtonId(1);
pub const MODE_PIN: u8 = 11;
pub const USER_PIN: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Pullup(u8),
    Attach(u8, Edge, ButtonId, AttachOptions),
    Detach(u8),
    TickOn,
    TickOff,
    Priority(u16, u8),
    Unpend(u16),
    EnableVector(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refused;

/// Board with two active-low buttons. Records every call into `calls`.
pub struct Board {
    pub levels: [Level; 32],
    pub handlers: Vec<(u8, ButtonId)>,
    pub calls: Vec<Call>,
    pub refuse_attach: bool,
}

impl Board {
    pub fn new() -> Self {
        Self {
            levels: [Level::High; 32],
            handlers: Vec::new(),
            calls: Vec::new(),
            refuse_attach: false,
        }
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn tick_enabled(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, Call::TickOn | Call::TickOff))
            .is_some_and(|c| *c == Call::TickOn)
    }

    pub fn edge_handlers(&self, pin: u8) -> usize {
        self.handlers.iter().filter(|(p, _)| *p == pin).count()
    }
}

impl Gpio for Board {
    type Pin = u8;

    fn configure_as_input_pullup(&mut self, pin: u8) {
        self.calls.push(Call::Pullup(pin));
    }

    fn read_level(&mut self, pin: u8) -> Level {
        self.levels[pin as usize]
    }
}

impl EdgeInterrupt for Board {
    type Error = Refused;

    fn attach(
        &mut self,
        pin: u8,
        edge: Edge,
        button: ButtonId,
        options: AttachOptions,
    ) -> Result<(), Refused> {
        if self.refuse_attach {
            return Err(Refused);
        }
        self.calls.push(Call::Attach(pin, edge, button, options));
        // A nested attach replaces the earlier handler.
        self.handlers.retain(|(p, _)| *p != pin);
        self.handlers.push((pin, button));
        Ok(())
    }

    fn detach(&mut self, pin: u8) {
        self.calls.push(Call::Detach(pin));
        self.handlers.retain(|(p, _)| *p != pin);
    }
}

impl InterruptController for Board {
    type Vector = u16;
    type Priority = u8;

    fn set_priority(&mut self, vector: u16, priority: u8) {
        self.calls.push(Call::Priority(vector, priority));
    }

    fn clear_pending(&mut self, vector: u16) {
        self.calls.push(Call::Unpend(vector));
    }

    fn enable(&mut self, vector: u16) {
        self.calls.push(Call::EnableVector(vector));
    }
}

impl TickSource for Board {
    const INTERVAL_MS: u16 = TICK_MS;
    const VECTOR: u16 = RTC1;
    const PRIORITY: u8 = 2;

    fn enable_tick(&mut self) {
        self.calls.push(Call::TickOn);
    }

    fn disable_tick(&mut self) {
        self.calls.push(Call::TickOff);
    }
}

pub type Buttons = Registry<Board, 2>;

pub fn buttons() -> Buttons {
    let mut buttons = Registry::new(
        Board::new(),
        [
            ButtonConfig::new(MODE_PIN, Level::Low),
            ButtonConfig::new(USER_PIN, Level::Low),
        ],
    );
    buttons.init(MODE, ButtonMode::Interrupt).unwrap();
    buttons.init(USER, ButtonMode::Interrupt).unwrap();
    buttons.platform_mut().calls.clear();
    buttons
}

pub fn press(buttons: &mut Buttons, pin: u8) {
    buttons.platform_mut().levels[pin as usize] = Level::Low;
}

pub fn release(buttons: &mut Buttons, pin: u8) {
    buttons.platform_mut().levels[pin as usize] = Level::High;
}

/// Exactly one mode per monitored button, and the tick runs iff some button samples.
pub fn assert_modes(buttons: &Buttons) {
    for id in [MODE, USER] {
        let state = buttons.state(id);
        assert_ne!(
            state.is_active(),
            state.is_edge_armed(),
            "button {:?} in both or neither mode",
            id
        );
        let pin = buttons.config(id).pin;
        assert_eq!(buttons.platform().edge_handlers(pin), state.is_edge_armed() as usize);
    }
    assert_eq!(buttons.tick_armed(), buttons.any_active());
}
