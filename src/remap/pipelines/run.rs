// The read -> remap -> write loop

use std::sync::atomic::{AtomicBool, Ordering};

use crate::remap::pure::{keyboard_map, mode_toggle_fires, trackpad_map};
use crate::remap::types::{AxisRanges, DaemonState, EventSink, EventSource, Mode, RemapResult};

/// Drive the remap cycle until shutdown is requested or the pad fails.
///
/// Strictly serial: one blocking read, full processing, then the next read,
/// so synthesized ordering mirrors physical ordering. Whichever way the loop
/// ends, a held grab is released before returning.
pub fn run_remap_loop(
    source: &mut impl EventSource,
    keyboard: &mut impl EventSink,
    trackpad: &mut impl EventSink,
    ranges: &AxisRanges,
    state: &mut DaemonState,
    shutdown: &AtomicBool,
) -> RemapResult<()> {
    let result = drive(source, keyboard, trackpad, ranges, state, shutdown);

    if state.mode == Mode::Emulation {
        if let Err(e) = source.ungrab() {
            println!("[padmapd] could not release the pad grab on exit: {}", e);
        }
    }

    result
}

fn drive(
    source: &mut impl EventSource,
    keyboard: &mut impl EventSink,
    trackpad: &mut impl EventSink,
    ranges: &AxisRanges,
    state: &mut DaemonState,
    shutdown: &AtomicBool,
) -> RemapResult<()> {
    while !shutdown.load(Ordering::SeqCst) {
        let event = source.next_event()?;

        // Mode arbitration runs against the pre-event cache, before any
        // dispatch for this same event
        if mode_toggle_fires(event, &state.cache) {
            state.mode = state.mode.flipped();
            match state.mode {
                Mode::Emulation => source.grab()?,
                Mode::Gamepad => source.ungrab()?,
            }
            println!("[padmapd] switched to {} mode", state.mode.name());
        }

        let keyboard_batch = keyboard_map(event, &state.cache, ranges, state.mode);
        if !keyboard_batch.is_empty() {
            keyboard.send(&keyboard_batch)?;
        }

        let trackpad_batch = trackpad_map(event, &state.cache, state.mode);
        if !trackpad_batch.is_empty() {
            trackpad.send(&trackpad_batch)?;
        }

        // Cache update comes last; the remappers above saw the old values
        state.cache.record(&event);
    }

    println!("[padmapd] shutdown flag observed, leaving the remap loop");
    Ok(())
}
