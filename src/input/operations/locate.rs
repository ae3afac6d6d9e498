// Resolving the physical pad's device node

use std::io;
use std::path::{Path, PathBuf};

use crate::input::pure::is_gamepad;

/// The controller this build targets, by stable by-id path
pub const DEFAULT_PAD_PATH: &str =
    "/dev/input/by-id/usb-Valve_Software_Steam_Controller_123456789ABCDEF-if02-event-joystick";

/// Resolve the pad node: an explicit override wins, then the built-in by-id
/// path, then a scan of /dev/input for the first gamepad-capable device.
pub fn locate_pad(device_override: Option<&str>) -> io::Result<PathBuf> {
    if let Some(path) = device_override {
        return Ok(PathBuf::from(path));
    }

    if Path::new(DEFAULT_PAD_PATH).exists() {
        return Ok(PathBuf::from(DEFAULT_PAD_PATH));
    }

    println!(
        "[padmapd] {} not present, scanning /dev/input for a gamepad",
        DEFAULT_PAD_PATH
    );
    for (path, dev) in evdev::enumerate() {
        if is_gamepad(dev.supported_keys()) {
            println!(
                "[padmapd] scan picked {} ({})",
                path.display(),
                dev.name().unwrap_or("unnamed")
            );
            return Ok(path);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        "no gamepad-capable input device found",
    ))
}
