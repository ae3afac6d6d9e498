//! Remap module type definitions

use std::collections::HashMap;
use std::io;

use evdev::{AbsoluteAxisCode, EventType, InputEvent, KeyCode, RelativeAxisCode};

/// Result type for daemon setup and the remap loop
pub type RemapResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Whether the pad is passed through untouched or emulating keyboard+mouse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Ordinary controller: the grab is released and nothing is synthesized
    Gamepad,
    /// The pad is exclusively grabbed and remapped to the virtual devices
    Emulation,
}

impl Mode {
    pub fn flipped(self) -> Mode {
        match self {
            Mode::Gamepad => Mode::Emulation,
            Mode::Emulation => Mode::Gamepad,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Gamepad => "gamepad",
            Mode::Emulation => "emulation",
        }
    }
}

/// Last observed value per input code, default 0 for codes never seen.
///
/// Keyed on (event type, code) because evdev code numbers are only unique
/// within one event type.
#[derive(Clone, Debug, Default)]
pub struct EventCache {
    values: HashMap<(u16, u16), i32>,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, event_type: EventType, code: u16) -> i32 {
        self.values.get(&(event_type.0, code)).copied().unwrap_or(0)
    }

    /// Record an event's value. The loop calls this last, so the remappers
    /// always observe the value from before the current event.
    pub fn record(&mut self, event: &InputEvent) {
        self.values
            .insert((event.event_type().0, event.code()), event.value());
    }
}

/// One axis's metadata as reported by the physical device
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AxisRange {
    pub minimum: i32,
    pub maximum: i32,
    pub resolution: i32,
}

/// Axis metadata captured once at startup, looked up by absolute-axis code
#[derive(Clone, Debug, Default)]
pub struct AxisRanges {
    ranges: HashMap<u16, AxisRange>,
}

impl AxisRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, axis: AbsoluteAxisCode, range: AxisRange) {
        self.ranges.insert(axis.0, range);
    }

    pub fn get(&self, axis: AbsoluteAxisCode) -> Option<AxisRange> {
        self.ranges.get(&axis.0).copied()
    }
}

/// Process-lifetime mutable state, threaded through the loop by exclusive
/// reference - single writer, no ambient globals.
#[derive(Clone, Debug)]
pub struct DaemonState {
    pub mode: Mode,
    pub cache: EventCache,
}

impl DaemonState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Emulation,
            cache: EventCache::new(),
        }
    }
}

/// Blocking source of physical pad events with exclusive-grab control
pub trait EventSource {
    /// Block until the next physical event or a device error
    fn next_event(&mut self) -> io::Result<InputEvent>;
    fn grab(&mut self) -> io::Result<()>;
    fn ungrab(&mut self) -> io::Result<()>;
}

/// Sink that applies a batch of events as one atomic state update (the
/// implementation appends the SYN_REPORT terminator)
pub trait EventSink {
    fn send(&mut self, batch: &[InputEvent]) -> io::Result<()>;
}

/// Key press/release event destined for a virtual sink
pub fn key_event(key: KeyCode, value: i32) -> InputEvent {
    InputEvent::new(EventType::KEY.0, key.0, value)
}

/// Relative-motion event destined for the virtual trackpad
pub fn rel_event(axis: RelativeAxisCode, value: i32) -> InputEvent {
    InputEvent::new(EventType::RELATIVE.0, axis.0, value)
}
