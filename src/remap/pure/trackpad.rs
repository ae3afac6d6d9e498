// Trackpad remapping: pointer buttons and hat-to-relative motion

use evdev::{AbsoluteAxisCode, EventSummary, EventType, InputEvent, KeyCode, RelativeAxisCode};

use crate::remap::types::{EventCache, Mode, key_event, rel_event};

/// Scale applied to second-hat deltas. Y is negated so that pad-up moves the
/// pointer up in screen coordinates.
const MOTION_COEFF_X: f32 = 0.01;
const MOTION_COEFF_Y: f32 = -0.01;

/// Map one physical event to the trackpad batch it synthesizes. Same shape
/// as the keyboard remapper: pure, and empty outside emulation mode.
pub fn trackpad_map(event: InputEvent, cache: &EventCache, mode: Mode) -> Vec<InputEvent> {
    if mode != Mode::Emulation {
        return Vec::new();
    }

    match event.destructure() {
        EventSummary::Key(_, KeyCode::BTN_TL, value) => {
            vec![key_event(KeyCode::BTN_RIGHT, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_TR, value) => {
            vec![key_event(KeyCode::BTN_LEFT, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_TL2, value) => {
            vec![key_event(KeyCode::BTN_MIDDLE, value)]
        }
        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_HAT1X, value) => abs2rel(
            AbsoluteAxisCode::ABS_HAT1X,
            value,
            cache,
            RelativeAxisCode::REL_X,
            MOTION_COEFF_X,
        ),
        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_HAT1Y, value) => abs2rel(
            AbsoluteAxisCode::ABS_HAT1Y,
            value,
            cache,
            RelativeAxisCode::REL_Y,
            MOTION_COEFF_Y,
        ),
        _ => Vec::new(),
    }
}

/// Convert an absolute hat position into a relative delta against the cached
/// previous position. A zero on either side means the finger just landed or
/// just lifted; those emit nothing, or the pointer would jump across the
/// whole pad surface. The scaled delta truncates toward zero.
fn abs2rel(
    axis: AbsoluteAxisCode,
    value: i32,
    cache: &EventCache,
    rel_out: RelativeAxisCode,
    coeff: f32,
) -> Vec<InputEvent> {
    let previous = cache.value(EventType::ABSOLUTE, axis.0);
    if value == 0 || previous == 0 {
        return Vec::new();
    }

    let delta = ((value - previous) as f32 * coeff) as i32;
    vec![rel_event(rel_out, delta)]
}
