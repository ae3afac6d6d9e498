// Building the uinput keyboard and trackpad sinks (I/O)

use std::io;

use evdev::uinput::VirtualDevice;
use evdev::{AttributeSet, InputEvent, KeyCode, RelativeAxisCode};

use crate::remap::{EventSink, LAYOUT};

const KEYBOARD_NAME: &str = "padmapd keyboard";
const TRACKPAD_NAME: &str = "padmapd trackpad";

/// Keys the virtual keyboard carries besides the grid layout: the fixed
/// button mappings, both stick threshold pairs and the face-button
/// fallbacks.
const FIXED_KEYS: [KeyCode; 20] = [
    KeyCode::KEY_PAGEUP,
    KeyCode::KEY_PAGEDOWN,
    KeyCode::KEY_HOME,
    KeyCode::KEY_END,
    KeyCode::KEY_UP,
    KeyCode::KEY_DOWN,
    KeyCode::KEY_LEFT,
    KeyCode::KEY_RIGHT,
    KeyCode::KEY_LEFTSHIFT,
    KeyCode::KEY_LEFTCTRL,
    KeyCode::KEY_LEFTMETA,
    KeyCode::KEY_LEFTALT,
    KeyCode::KEY_RIGHTALT,
    KeyCode::KEY_ENTER,
    KeyCode::KEY_ESC,
    KeyCode::KEY_BACKSPACE,
    KeyCode::KEY_SPACE,
    KeyCode::KEY_TAB,
    KeyCode::KEY_COMPOSE,
    KeyCode::KEY_DELETE,
];

/// Create the uinput keyboard able to emit every key the remapper can
/// synthesize.
pub fn build_keyboard() -> io::Result<VirtualDevice> {
    let mut keys: AttributeSet<KeyCode> = AttributeSet::default();
    for key in FIXED_KEYS {
        keys.insert(key);
    }
    for row in LAYOUT.iter() {
        for cell in row.iter() {
            for &key in cell.iter() {
                keys.insert(key);
            }
        }
    }

    VirtualDevice::builder()?
        .name(KEYBOARD_NAME)
        .with_keys(&keys)?
        .build()
}

/// Create the uinput pointer device: three buttons plus relative motion.
pub fn build_trackpad() -> io::Result<VirtualDevice> {
    let mut buttons: AttributeSet<KeyCode> = AttributeSet::default();
    buttons.insert(KeyCode::BTN_LEFT);
    buttons.insert(KeyCode::BTN_RIGHT);
    buttons.insert(KeyCode::BTN_MIDDLE);

    let mut axes: AttributeSet<RelativeAxisCode> = AttributeSet::default();
    axes.insert(RelativeAxisCode::REL_X);
    axes.insert(RelativeAxisCode::REL_Y);

    VirtualDevice::builder()?
        .name(TRACKPAD_NAME)
        .with_keys(&buttons)?
        .with_relative_axes(&axes)?
        .build()
}

impl EventSink for VirtualDevice {
    // emit writes the batch and terminates it with a SYN_REPORT, so the
    // receiving side applies it as one atomic state update
    fn send(&mut self, batch: &[InputEvent]) -> io::Result<()> {
        self.emit(batch)
    }
}
