mod input;
mod remap;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::input::{PhysicalPad, build_keyboard, build_trackpad, locate_pad};
use crate::remap::{DaemonState, EventSource, RemapResult, run_remap_loop};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        return;
    }

    let mut device_override: Option<String> = None;
    if let Some(device_index) = args.iter().position(|arg| arg == "--device") {
        if let Some(next_arg) = args.get(device_index + 1) {
            device_override = Some(next_arg.clone());
        } else {
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(1);
        }
    }

    if let Err(e) = run(device_override.as_deref()) {
        eprintln!("[padmapd] fatal: {}", e);
        std::process::exit(1);
    }
}

fn run(device_override: Option<&str>) -> RemapResult<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::SeqCst);
            println!("[padmapd] shutdown requested, waiting for the next pad event");
        })?;
    }

    let mut pad = PhysicalPad::open(locate_pad(device_override)?)?;
    let ranges = pad.ranges().clone();

    let mut keyboard = build_keyboard()?;
    let mut trackpad = build_trackpad()?;
    println!("[padmapd] virtual keyboard and trackpad created");

    // Emulation is the initial mode, so the pad starts out grabbed. A grab
    // failure here is fatal; recovery needs human intervention anyway.
    pad.grab()?;
    println!("[padmapd] emulation mode active, pad exclusively grabbed");

    let mut state = DaemonState::new();
    run_remap_loop(
        &mut pad,
        &mut keyboard,
        &mut trackpad,
        &ranges,
        &mut state,
        &shutdown,
    )
}

static USAGE_TEXT: &str = r#"
padmapd - remap one game controller to a virtual keyboard and trackpad

Usage: padmapd [OPTIONS]

Options:
    --device <path>   Read events from this device node instead of the built-in
                      controller path (a scan of /dev/input is the fallback).
    --help            Show this help text.

Hold the pad's mode button to switch between keyboard/mouse emulation and
plain gamepad passthrough.
"#;
