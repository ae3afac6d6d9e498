//! Atomic device I/O operations

mod locate;
mod pad;
mod virtual_out;

pub use locate::{DEFAULT_PAD_PATH, locate_pad};
pub use pad::PhysicalPad;
pub use virtual_out::{build_keyboard, build_trackpad};
