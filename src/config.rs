//! Static button configuration and the small value types shared with the platform.

/// Raw logical level of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// The transition that moves a pin *into* this level.
    pub const fn entering_edge(self) -> Edge {
        match self {
            Level::Low => Edge::Falling,
            Level::High => Edge::Rising,
        }
    }

    pub const fn inverted(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Falling,
    Rising,
}

/// How a button is driven after `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonMode {
    /// Plain input, read on demand. No interrupts are touched.
    Gpio,
    /// Edge interrupt while idle, tick sampling while pressed.
    Interrupt,
}

/// Index of a button in the registry. Boards usually wrap this in their own enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonId(pub u8);

impl ButtonId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One row of the board button table. Fixed for the lifetime of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig<Pin> {
    pub pin: Pin,
    /// Level the pin reads while the button is held.
    pub active_level: Level,
}

impl<Pin> ButtonConfig<Pin> {
    pub const fn new(pin: Pin, active_level: Level) -> Self {
        Self { pin, active_level }
    }
}

pub const INTERRUPT_FLAG_NONE: u32 = 0;

/// Extra settings handed to the edge interrupt controller on attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttachOptions {
    /// Keep a previously installed handler chained behind this one.
    pub keep_handler: bool,
    pub flags: u32,
}

impl AttachOptions {
    /// What every button attach uses: no chained handler, no special flags.
    pub const BUTTON: AttachOptions = AttachOptions {
        keep_handler: false,
        flags: INTERRUPT_FLAG_NONE,
    };
}

impl Default for AttachOptions {
    fn default() -> Self {
        Self::BUTTON
    }
}
