// Mode-toggle detection

use evdev::{EventSummary, EventType, InputEvent, KeyCode};

use crate::remap::types::EventCache;

/// True when this event should flip the gamepad/emulation mode.
///
/// Fires while the mode button is already held: the current value must be
/// truthy AND the button's cached previous value must be truthy, so a
/// sustained press (repeat events included) keeps re-triggering. Kept as
/// shipped rather than tightened to a strict rising edge.
pub fn mode_toggle_fires(event: InputEvent, cache: &EventCache) -> bool {
    match event.destructure() {
        EventSummary::Key(_, KeyCode::BTN_MODE, value) => {
            value != 0 && cache.value(EventType::KEY, KeyCode::BTN_MODE.0) != 0
        }
        _ => false,
    }
}
