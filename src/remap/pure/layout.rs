// Virtual keyboard layout and the hat-switch grid positioner

use evdev::{AbsoluteAxisCode, EventType, KeyCode};

use crate::remap::types::{AxisRange, EventCache};

pub const GRID_ROWS: usize = 5;
pub const GRID_COLS: usize = 3;

/// The on-pad virtual keyboard: 5 rows x 3 columns, each cell carrying one
/// key per face button (south, east, north, west).
pub const LAYOUT: [[[KeyCode; 4]; GRID_COLS]; GRID_ROWS] = [
    [
        [KeyCode::KEY_1, KeyCode::KEY_2, KeyCode::KEY_3, KeyCode::KEY_4],
        [KeyCode::KEY_5, KeyCode::KEY_6, KeyCode::KEY_7, KeyCode::KEY_8],
        [KeyCode::KEY_9, KeyCode::KEY_0, KeyCode::KEY_MINUS, KeyCode::KEY_EQUAL],
    ],
    [
        [KeyCode::KEY_Q, KeyCode::KEY_W, KeyCode::KEY_E, KeyCode::KEY_R],
        [KeyCode::KEY_T, KeyCode::KEY_Y, KeyCode::KEY_U, KeyCode::KEY_I],
        [KeyCode::KEY_O, KeyCode::KEY_P, KeyCode::KEY_LEFTBRACE, KeyCode::KEY_RIGHTBRACE],
    ],
    [
        [KeyCode::KEY_A, KeyCode::KEY_S, KeyCode::KEY_D, KeyCode::KEY_F],
        [KeyCode::KEY_G, KeyCode::KEY_H, KeyCode::KEY_J, KeyCode::KEY_K],
        [KeyCode::KEY_L, KeyCode::KEY_SEMICOLON, KeyCode::KEY_APOSTROPHE, KeyCode::KEY_BACKSLASH],
    ],
    [
        [KeyCode::KEY_Z, KeyCode::KEY_X, KeyCode::KEY_C, KeyCode::KEY_V],
        [KeyCode::KEY_B, KeyCode::KEY_N, KeyCode::KEY_M, KeyCode::KEY_COMMA],
        [KeyCode::KEY_DOT, KeyCode::KEY_SLASH, KeyCode::KEY_GRAVE, KeyCode::KEY_102ND],
    ],
    [
        [KeyCode::KEY_F1, KeyCode::KEY_F2, KeyCode::KEY_F3, KeyCode::KEY_F4],
        [KeyCode::KEY_F5, KeyCode::KEY_F6, KeyCode::KEY_F7, KeyCode::KEY_F8],
        [KeyCode::KEY_F9, KeyCode::KEY_SYSRQ, KeyCode::KEY_SCROLLLOCK, KeyCode::KEY_PAUSE],
    ],
];

/// Grid cell currently selected by the first hat switch, from the cached
/// axis values. None while the hat rests at center (both axes exactly 0).
///
/// The hat's square range is remapped linearly onto the grid, with the Y
/// axis inverted so pushing up selects row 0. Dividing by 2*maximum + 1
/// keeps full deflection inside the last row/column instead of overflowing.
pub fn vkbd_keypos(cache: &EventCache, hat: AxisRange) -> Option<(usize, usize)> {
    let hat_x = cache.value(EventType::ABSOLUTE, AbsoluteAxisCode::ABS_HAT0X.0);
    let hat_y = cache.value(EventType::ABSOLUTE, AbsoluteAxisCode::ABS_HAT0Y.0);
    if hat_x == 0 && hat_y == 0 {
        return None;
    }

    let span = 2 * hat.maximum + 1;
    let row = (((hat_y - hat.maximum) * GRID_ROWS as i32).abs() / span).min(GRID_ROWS as i32 - 1);
    let col = ((hat_x + hat.maximum) * GRID_COLS as i32 / span).clamp(0, GRID_COLS as i32 - 1);
    Some((row as usize, col as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::InputEvent;

    const HAT_MAX: i32 = 32767;

    fn hat_range(maximum: i32) -> AxisRange {
        AxisRange {
            minimum: -maximum,
            maximum,
            resolution: 0,
        }
    }

    fn cache_with_hat(x: i32, y: i32) -> EventCache {
        let mut cache = EventCache::new();
        cache.record(&InputEvent::new(
            EventType::ABSOLUTE.0,
            AbsoluteAxisCode::ABS_HAT0X.0,
            x,
        ));
        cache.record(&InputEvent::new(
            EventType::ABSOLUTE.0,
            AbsoluteAxisCode::ABS_HAT0Y.0,
            y,
        ));
        cache
    }

    #[test]
    fn centered_hat_selects_nothing() {
        let cache = EventCache::new();
        assert_eq!(vkbd_keypos(&cache, hat_range(HAT_MAX)), None);

        let cache = cache_with_hat(0, 0);
        assert_eq!(vkbd_keypos(&cache, hat_range(HAT_MAX)), None);
    }

    #[test]
    fn any_deflection_selects_a_cell() {
        let cache = cache_with_hat(1, 0);
        assert!(vkbd_keypos(&cache, hat_range(HAT_MAX)).is_some());

        let cache = cache_with_hat(0, -1);
        assert!(vkbd_keypos(&cache, hat_range(HAT_MAX)).is_some());
    }

    #[test]
    fn corners_map_to_corner_cells() {
        // Up selects row 0, left selects column 0
        let cache = cache_with_hat(-HAT_MAX, HAT_MAX);
        assert_eq!(vkbd_keypos(&cache, hat_range(HAT_MAX)), Some((0, 0)));

        // Full down-right lands in the last row and column, not past them
        let cache = cache_with_hat(HAT_MAX, -HAT_MAX);
        assert_eq!(
            vkbd_keypos(&cache, hat_range(HAT_MAX)),
            Some((GRID_ROWS - 1, GRID_COLS - 1))
        );
    }

    #[test]
    fn horizontal_deflection_lands_in_middle_row() {
        let cache = cache_with_hat(HAT_MAX, 0);
        let (row, _) = vkbd_keypos(&cache, hat_range(HAT_MAX)).unwrap();
        assert_eq!(row, GRID_ROWS / 2);
    }

    #[test]
    fn coordinates_stay_in_bounds_for_any_valid_pair() {
        for maximum in [1, 255, HAT_MAX] {
            let step = (2 * maximum / 16).max(1);
            let mut x = -maximum;
            while x <= maximum {
                let mut y = -maximum;
                while y <= maximum {
                    let cache = cache_with_hat(x, y);
                    if let Some((row, col)) = vkbd_keypos(&cache, hat_range(maximum)) {
                        assert!(row < GRID_ROWS, "row {} for ({}, {})", row, x, y);
                        assert!(col < GRID_COLS, "col {} for ({}, {})", col, x, y);
                    }
                    y += step;
                }
                x += step;
            }
        }
    }

    #[test]
    fn unit_range_hat_still_resolves_in_bounds() {
        // A plain d-pad style hat reports only -1/0/1
        let cache = cache_with_hat(1, 1);
        assert_eq!(vkbd_keypos(&cache, hat_range(1)), Some((0, 2)));

        // |(-1 - 1) * 5| / 3 truncates to row 3; the coarse range cannot
        // reach the last row, but it must not overflow either
        let cache = cache_with_hat(-1, -1);
        assert_eq!(vkbd_keypos(&cache, hat_range(1)), Some((3, 0)));
    }
}
