//! Pure remapping functions
//!
//! Deterministic over (event, cache, ranges, mode); no device I/O.

mod keyboard;
mod layout;
mod mode;
mod trackpad;

pub use keyboard::keyboard_map;
pub use layout::{GRID_COLS, GRID_ROWS, LAYOUT, vkbd_keypos};
pub use mode::mode_toggle_fires;
pub use trackpad::trackpad_map;
