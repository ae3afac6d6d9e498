// PhysicalPad: blocking reads from the controller node (I/O)

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;

use evdev::{AbsoluteAxisCode, Device, InputEvent};

use crate::remap::{AxisRange, AxisRanges, EventSource};

/// The opened controller, wrapped for the remap loop: blocking event reads,
/// grab control, and the axis metadata captured once at open time.
pub struct PhysicalPad {
    dev: Device,
    ranges: AxisRanges,
    pending: VecDeque<InputEvent>,
}

impl PhysicalPad {
    /// Open the pad node and read each axis's (minimum, maximum, resolution).
    /// The device stays in blocking mode; the loop is meant to sleep until
    /// the next physical event.
    pub fn open(path: PathBuf) -> io::Result<Self> {
        let dev = Device::open(&path)?;
        println!(
            "[padmapd] physical pad: {} ({})",
            dev.name().unwrap_or("unnamed"),
            path.display()
        );

        let mut ranges = AxisRanges::new();
        match dev.get_abs_state() {
            Ok(abs_state) => {
                for (code, info) in abs_state.iter().enumerate() {
                    if info.minimum == 0 && info.maximum == 0 {
                        continue;
                    }
                    ranges.insert(
                        AbsoluteAxisCode(code as u16),
                        AxisRange {
                            minimum: info.minimum,
                            maximum: info.maximum,
                            resolution: info.resolution,
                        },
                    );
                }
            }
            Err(e) => {
                println!(
                    "[padmapd] could not read axis ranges ({}), axis mappings will be inert",
                    e
                );
            }
        }

        Ok(Self {
            dev,
            ranges,
            pending: VecDeque::new(),
        })
    }

    pub fn ranges(&self) -> &AxisRanges {
        &self.ranges
    }
}

impl EventSource for PhysicalPad {
    fn next_event(&mut self) -> io::Result<InputEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }
            // fetch_events blocks until the kernel has at least one event;
            // the batch is queued so callers still see them one at a time
            let fetched: Vec<InputEvent> = self.dev.fetch_events()?.collect();
            self.pending.extend(fetched);
        }
    }

    fn grab(&mut self) -> io::Result<()> {
        self.dev.grab()
    }

    fn ungrab(&mut self) -> io::Result<()> {
        self.dev.ungrab()
    }
}
