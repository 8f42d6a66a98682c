//! Recording platform for the unit tests.

use crate::config::{AttachOptions, ButtonId, Edge, Level};
use crate::hal::{EdgeInterrupt, Gpio, InterruptController, TickSource};

pub const PINS: usize = 8;
pub const TICK_VECTOR: u8 = 17;
pub const TICK_PRIORITY: u8 = 3;
pub const INTERVAL_MS: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachRefused;

pub struct MockPlatform {
    pub levels: [Level; PINS],
    pub attached: [Option<(Edge, ButtonId)>; PINS],
    pub fail_attach: bool,
    pub attach_calls: usize,
    pub detach_calls: usize,
    pub pullups: usize,
    pub tick_enabled: bool,
    pub tick_enables: usize,
    pub tick_disables: usize,
    pub priority: Option<(u8, u8)>,
    pub pending_cleared: bool,
    pub vector_enabled: bool,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            // Pulled up, nothing pressed.
            levels: [Level::High; PINS],
            attached: [None; PINS],
            fail_attach: false,
            attach_calls: 0,
            detach_calls: 0,
            pullups: 0,
            tick_enabled: false,
            tick_enables: 0,
            tick_disables: 0,
            priority: None,
            pending_cleared: false,
            vector_enabled: false,
        }
    }
}

impl Gpio for MockPlatform {
    type Pin = u8;

    fn configure_as_input_pullup(&mut self, _pin: u8) {
        self.pullups += 1;
    }

    fn read_level(&mut self, pin: u8) -> Level {
        self.levels[pin as usize]
    }
}

impl EdgeInterrupt for MockPlatform {
    type Error = AttachRefused;

    fn attach(
        &mut self,
        pin: u8,
        edge: Edge,
        button: ButtonId,
        _options: AttachOptions,
    ) -> Result<(), AttachRefused> {
        if self.fail_attach {
            return Err(AttachRefused);
        }
        self.attach_calls += 1;
        self.attached[pin as usize] = Some((edge, button));
        Ok(())
    }

    fn detach(&mut self, pin: u8) {
        self.detach_calls += 1;
        self.attached[pin as usize] = None;
    }
}

impl InterruptController for MockPlatform {
    type Vector = u8;
    type Priority = u8;

    fn set_priority(&mut self, vector: u8, priority: u8) {
        self.priority = Some((vector, priority));
    }

    fn clear_pending(&mut self, _vector: u8) {
        self.pending_cleared = true;
    }

    fn enable(&mut self, _vector: u8) {
        self.vector_enabled = true;
    }
}

impl TickSource for MockPlatform {
    const INTERVAL_MS: u16 = INTERVAL_MS;
    const VECTOR: u8 = TICK_VECTOR;
    const PRIORITY: u8 = TICK_PRIORITY;

    fn enable_tick(&mut self) {
        self.tick_enabled = true;
        self.tick_enables += 1;
    }

    fn disable_tick(&mut self) {
        self.tick_enabled = false;
        self.tick_disables += 1;
    }
}
