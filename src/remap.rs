//! The remapping core - turns one physical pad into a keyboard and trackpad
//!
//! Every physical event runs through a fixed cycle: mode arbitration first,
//! then the two remappers against the cache as it was *before* the event,
//! then the cache update. While emulation mode is active the pad is held
//! under an exclusive grab so no other consumer sees its raw events; gamepad
//! mode releases the grab and stops synthesizing.
//!
//! ## Module Structure
//! - `types.rs`: Mode, EventCache, DaemonState, axis metadata, the
//!   EventSource/EventSink capability traits
//! - `pure/`: Pure functions (layout positioner, keyboard/trackpad mapping,
//!   mode-toggle detection)
//! - `pipelines/`: High-level orchestration (the blocking remap loop)

mod pipelines;
mod pure;
mod types;

// Re-export types
pub use types::{
    AxisRange, AxisRanges, DaemonState, EventCache, EventSink, EventSource, Mode, RemapResult,
    key_event, rel_event,
};

// Re-export pipelines
pub use pipelines::run_remap_loop;

// Re-export pure functions
pub use pure::{GRID_COLS, GRID_ROWS, LAYOUT, keyboard_map, mode_toggle_fires, trackpad_map, vkbd_keypos};
