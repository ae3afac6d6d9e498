// Device classification (pure functions)

use evdev::{AttributeSetRef, KeyCode};

/// Classify an evdev device by its supported keys: anything reporting a
/// south face button counts as a gamepad for the scan fallback.
pub fn is_gamepad(supported_keys: Option<&AttributeSetRef<KeyCode>>) -> bool {
    supported_keys.map_or(false, |keys| keys.contains(KeyCode::BTN_SOUTH))
}
