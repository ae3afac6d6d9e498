//! Pure helpers for the device layer

mod classify;

pub use classify::is_gamepad;
