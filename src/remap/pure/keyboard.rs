// Keyboard remapping: fixed buttons, stick thresholds, grid typing

use evdev::{AbsoluteAxisCode, EventSummary, InputEvent, KeyCode};

use super::layout::{LAYOUT, vkbd_keypos};
use crate::remap::types::{AxisRange, AxisRanges, EventCache, Mode, key_event};

/// Map one physical event to the keyboard batch it synthesizes.
///
/// Pure over its inputs; the positioner it consults is itself pure over the
/// cache. Outside emulation mode, and for any unmapped code, the batch is
/// empty.
pub fn keyboard_map(
    event: InputEvent,
    cache: &EventCache,
    ranges: &AxisRanges,
    mode: Mode,
) -> Vec<InputEvent> {
    if mode != Mode::Emulation {
        return Vec::new();
    }

    match event.destructure() {
        // Modifiers, d-pad and auxiliary buttons forward the raw value, so
        // these keys are held as long as the physical button is
        EventSummary::Key(_, KeyCode::BTN_TR2, value) => {
            vec![key_event(KeyCode::KEY_LEFTMETA, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_DPAD_UP, value) => {
            vec![key_event(KeyCode::KEY_UP, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_DPAD_DOWN, value) => {
            vec![key_event(KeyCode::KEY_DOWN, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_DPAD_LEFT, value) => {
            vec![key_event(KeyCode::KEY_LEFT, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_DPAD_RIGHT, value) => {
            vec![key_event(KeyCode::KEY_RIGHT, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_TRIGGER_HAPPY1, value) => {
            vec![key_event(KeyCode::KEY_LEFTSHIFT, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_TRIGGER_HAPPY2, value) => {
            vec![key_event(KeyCode::KEY_RIGHTALT, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_TRIGGER_HAPPY3, value) => {
            vec![key_event(KeyCode::KEY_LEFTCTRL, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_TRIGGER_HAPPY4, value) => {
            vec![key_event(KeyCode::KEY_LEFTALT, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_SELECT, value) => {
            vec![key_event(KeyCode::KEY_TAB, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_START, value) => {
            vec![key_event(KeyCode::KEY_DELETE, value)]
        }
        EventSummary::Key(_, KeyCode::BTN_BASE, value) => {
            vec![key_event(KeyCode::KEY_COMPOSE, value)]
        }
        // Stick deflection types paging/home keys at the extremes
        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_Y, value) => joy2keys(
            value,
            ranges.get(AbsoluteAxisCode::ABS_Y),
            KeyCode::KEY_PAGEUP,
            KeyCode::KEY_PAGEDOWN,
        ),
        EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_X, value) => joy2keys(
            value,
            ranges.get(AbsoluteAxisCode::ABS_X),
            KeyCode::KEY_HOME,
            KeyCode::KEY_END,
        ),
        // Face buttons type through the virtual keyboard grid
        EventSummary::Key(_, KeyCode::BTN_SOUTH, value) => {
            key2vkbd(value, cache, ranges, 0, KeyCode::KEY_ENTER)
        }
        EventSummary::Key(_, KeyCode::BTN_EAST, value) => {
            key2vkbd(value, cache, ranges, 1, KeyCode::KEY_ESC)
        }
        EventSummary::Key(_, KeyCode::BTN_NORTH, value) => {
            key2vkbd(value, cache, ranges, 2, KeyCode::KEY_BACKSPACE)
        }
        EventSummary::Key(_, KeyCode::BTN_WEST, value) => {
            key2vkbd(value, cache, ranges, 3, KeyCode::KEY_SPACE)
        }
        _ => Vec::new(),
    }
}

/// Threshold mapping for one stick axis: release both paired keys near
/// center, press exactly one key at the exact extremes, stay silent while
/// the stick is in transit (anything else would storm the sink).
fn joy2keys(
    value: i32,
    range: Option<AxisRange>,
    key_min: KeyCode,
    key_max: KeyCode,
) -> Vec<InputEvent> {
    let Some(range) = range else {
        return Vec::new();
    };

    if value.abs() <= range.resolution {
        vec![key_event(key_min, 0), key_event(key_max, 0)]
    } else if value == range.minimum {
        vec![key_event(key_min, 1)]
    } else if value == range.maximum {
        vec![key_event(key_max, 1)]
    } else {
        Vec::new()
    }
}

/// Face-button typing: a press taps the grid key the hat currently selects,
/// or the button's fallback key while the hat rests at center. The tap is an
/// immediate press+release pair, soft-keyboard style; the button's own
/// release emits nothing.
fn key2vkbd(
    value: i32,
    cache: &EventCache,
    ranges: &AxisRanges,
    section: usize,
    fallback: KeyCode,
) -> Vec<InputEvent> {
    if value == 0 {
        return Vec::new();
    }

    let hat = ranges.get(AbsoluteAxisCode::ABS_HAT0X).unwrap_or_default();
    let key = match vkbd_keypos(cache, hat) {
        Some((row, col)) => LAYOUT[row][col][section],
        None => fallback,
    };
    vec![key_event(key, 1), key_event(key, 0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::EventType;

    const STICK_MIN: i32 = -32768;
    const STICK_MAX: i32 = 32767;
    const STICK_RES: i32 = 128;
    const HAT_MAX: i32 = 32767;

    fn test_ranges() -> AxisRanges {
        let mut ranges = AxisRanges::new();
        let stick = AxisRange {
            minimum: STICK_MIN,
            maximum: STICK_MAX,
            resolution: STICK_RES,
        };
        ranges.insert(AbsoluteAxisCode::ABS_X, stick);
        ranges.insert(AbsoluteAxisCode::ABS_Y, stick);
        ranges.insert(
            AbsoluteAxisCode::ABS_HAT0X,
            AxisRange {
                minimum: -HAT_MAX,
                maximum: HAT_MAX,
                resolution: 0,
            },
        );
        ranges
    }

    fn key(code: KeyCode, value: i32) -> InputEvent {
        InputEvent::new(EventType::KEY.0, code.0, value)
    }

    fn abs(code: AbsoluteAxisCode, value: i32) -> InputEvent {
        InputEvent::new(EventType::ABSOLUTE.0, code.0, value)
    }

    fn out(batch: &[InputEvent]) -> Vec<(u16, i32)> {
        batch.iter().map(|ev| (ev.code(), ev.value())).collect()
    }

    #[test]
    fn fixed_buttons_forward_their_value() {
        let cache = EventCache::new();
        let ranges = test_ranges();

        let pressed = keyboard_map(key(KeyCode::BTN_TR2, 1), &cache, &ranges, Mode::Emulation);
        assert_eq!(out(&pressed), vec![(KeyCode::KEY_LEFTMETA.0, 1)]);

        let released = keyboard_map(key(KeyCode::BTN_TR2, 0), &cache, &ranges, Mode::Emulation);
        assert_eq!(out(&released), vec![(KeyCode::KEY_LEFTMETA.0, 0)]);

        let dpad = keyboard_map(key(KeyCode::BTN_DPAD_LEFT, 1), &cache, &ranges, Mode::Emulation);
        assert_eq!(out(&dpad), vec![(KeyCode::KEY_LEFT.0, 1)]);
    }

    #[test]
    fn stick_near_center_releases_both_paired_keys() {
        let cache = EventCache::new();
        let ranges = test_ranges();

        for value in [0, STICK_RES, -STICK_RES] {
            let batch = keyboard_map(
                abs(AbsoluteAxisCode::ABS_Y, value),
                &cache,
                &ranges,
                Mode::Emulation,
            );
            assert_eq!(
                out(&batch),
                vec![(KeyCode::KEY_PAGEUP.0, 0), (KeyCode::KEY_PAGEDOWN.0, 0)],
                "value {}",
                value
            );
        }
    }

    #[test]
    fn stick_extremes_press_exactly_one_key() {
        let cache = EventCache::new();
        let ranges = test_ranges();

        let at_min = keyboard_map(
            abs(AbsoluteAxisCode::ABS_Y, STICK_MIN),
            &cache,
            &ranges,
            Mode::Emulation,
        );
        assert_eq!(out(&at_min), vec![(KeyCode::KEY_PAGEUP.0, 1)]);

        let at_max = keyboard_map(
            abs(AbsoluteAxisCode::ABS_X, STICK_MAX),
            &cache,
            &ranges,
            Mode::Emulation,
        );
        assert_eq!(out(&at_max), vec![(KeyCode::KEY_END.0, 1)]);
    }

    #[test]
    fn stick_in_transit_emits_nothing() {
        let cache = EventCache::new();
        let ranges = test_ranges();

        for value in [STICK_RES + 1, STICK_MAX / 2, STICK_MIN + 1] {
            let batch = keyboard_map(
                abs(AbsoluteAxisCode::ABS_X, value),
                &cache,
                &ranges,
                Mode::Emulation,
            );
            assert!(batch.is_empty(), "value {}", value);
        }
    }

    #[test]
    fn face_button_at_center_taps_the_fallback_key() {
        let cache = EventCache::new();
        let ranges = test_ranges();

        let batch = keyboard_map(key(KeyCode::BTN_SOUTH, 1), &cache, &ranges, Mode::Emulation);
        assert_eq!(
            out(&batch),
            vec![(KeyCode::KEY_ENTER.0, 1), (KeyCode::KEY_ENTER.0, 0)]
        );

        let batch = keyboard_map(key(KeyCode::BTN_WEST, 1), &cache, &ranges, Mode::Emulation);
        assert_eq!(
            out(&batch),
            vec![(KeyCode::KEY_SPACE.0, 1), (KeyCode::KEY_SPACE.0, 0)]
        );
    }

    #[test]
    fn face_button_with_hat_deflection_taps_the_grid_key() {
        // Up-left selects the top-left cell: keys 1/2/3/4 by face button
        let mut cache = EventCache::new();
        cache.record(&abs(AbsoluteAxisCode::ABS_HAT0X, -HAT_MAX));
        cache.record(&abs(AbsoluteAxisCode::ABS_HAT0Y, HAT_MAX));
        let ranges = test_ranges();

        let south = keyboard_map(key(KeyCode::BTN_SOUTH, 1), &cache, &ranges, Mode::Emulation);
        assert_eq!(
            out(&south),
            vec![(KeyCode::KEY_1.0, 1), (KeyCode::KEY_1.0, 0)]
        );

        let west = keyboard_map(key(KeyCode::BTN_WEST, 1), &cache, &ranges, Mode::Emulation);
        assert_eq!(
            out(&west),
            vec![(KeyCode::KEY_4.0, 1), (KeyCode::KEY_4.0, 0)]
        );
    }

    #[test]
    fn face_button_release_emits_nothing() {
        let cache = EventCache::new();
        let ranges = test_ranges();

        let batch = keyboard_map(key(KeyCode::BTN_SOUTH, 0), &cache, &ranges, Mode::Emulation);
        assert!(batch.is_empty());
    }

    #[test]
    fn gamepad_mode_emits_nothing() {
        let cache = EventCache::new();
        let ranges = test_ranges();

        let batch = keyboard_map(key(KeyCode::BTN_TR2, 1), &cache, &ranges, Mode::Gamepad);
        assert!(batch.is_empty());
    }

    #[test]
    fn unmapped_codes_emit_nothing() {
        let cache = EventCache::new();
        let ranges = test_ranges();

        let batch = keyboard_map(key(KeyCode::BTN_THUMBL, 1), &cache, &ranges, Mode::Emulation);
        assert!(batch.is_empty());

        let batch = keyboard_map(key(KeyCode::BTN_MODE, 1), &cache, &ranges, Mode::Emulation);
        assert!(batch.is_empty());
    }
}
