//! Serial telemetry frame.
//!
//! One frame is written per control tick as a comma-separated line:
//!
//! ```text
//! <rain_analog>,<rain_detected 0|1>,<switch_on 0|1>,<servo_position>,<buzzer_level>
//! ```
//!
//! Field order and the integer encoding of booleans are fixed; host-side
//! tooling (the monitor and any plotting front-end) depends on them.
//! [`TelemetryFrame::from_str`] accepts any line the firmware produces
//! and rejects everything else so debug chatter on the same port can be
//! skipped.

use core::fmt::{self, Write as _};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TelemetryError;

/// Number of comma-separated fields in a frame.
pub const FIELD_COUNT: usize = 5;

/// Longest rendered frame: `65535,1,1,255,255`.
pub const MAX_LINE_LEN: usize = 20;

/// Fixed-capacity rendered line (no trailing newline).
pub type TelemetryLine = heapless::String<MAX_LINE_LEN>;

/// A single tick's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub rain_analog: u16,
    pub rain_detected: bool,
    pub switch_on: bool,
    pub servo_position: u8,
    pub buzzer_level: u8,
}

impl TelemetryFrame {
    /// Render into a stack buffer.  Never truncates: every field is bounded.
    pub fn to_line(&self) -> TelemetryLine {
        let mut line = TelemetryLine::new();
        let written = write!(line, "{self}");
        debug_assert!(written.is_ok(), "telemetry frame overflowed {MAX_LINE_LEN} bytes");
        line
    }
}

impl fmt::Display for TelemetryFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.rain_analog,
            u8::from(self.rain_detected),
            u8::from(self.switch_on),
            self.servo_position,
            self.buzzer_level,
        )
    }
}

impl FromStr for TelemetryFrame {
    type Err = TelemetryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let count = line.split(',').count();
        if count != FIELD_COUNT {
            return Err(TelemetryError::FieldCount(count));
        }

        let mut values = [0i64; FIELD_COUNT];
        for (index, (slot, field)) in values.iter_mut().zip(line.split(',')).enumerate() {
            *slot = field
                .trim()
                .parse()
                .map_err(|_| TelemetryError::InvalidField { index })?;
        }

        let [analog, rain, switch, position, level] = values;
        Ok(Self {
            rain_analog: u16::try_from(analog)
                .map_err(|_| TelemetryError::OutOfRange { index: 0 })?,
            rain_detected: rain != 0,
            switch_on: switch != 0,
            servo_position: u8::try_from(position)
                .map_err(|_| TelemetryError::OutOfRange { index: 3 })?,
            buzzer_level: u8::try_from(level)
                .map_err(|_| TelemetryError::OutOfRange { index: 4 })?,
        })
    }
}

/// Running summary of a telemetry stream, as shown by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TelemetryStats {
    pub frames: u64,
    pub skipped_lines: u64,
    pub rain_frames: u64,
    pub alert_frames: u64,
    pub min_analog: Option<u16>,
    pub max_analog: Option<u16>,
    pub last: Option<TelemetryFrame>,
}

impl TelemetryStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line.  Returns the frame if the line was telemetry.
    pub fn ingest(&mut self, line: &str) -> Option<TelemetryFrame> {
        if line.trim().is_empty() {
            return None;
        }
        match line.parse::<TelemetryFrame>() {
            Ok(frame) => {
                self.record(frame);
                Some(frame)
            }
            Err(_) => {
                self.skipped_lines += 1;
                None
            }
        }
    }

    pub fn record(&mut self, frame: TelemetryFrame) {
        self.frames += 1;
        if frame.rain_detected {
            self.rain_frames += 1;
        }
        if frame.buzzer_level > 0 {
            self.alert_frames += 1;
        }
        let analog = frame.rain_analog;
        self.min_analog = Some(self.min_analog.map_or(analog, |m| m.min(analog)));
        self.max_analog = Some(self.max_analog.map_or(analog, |m| m.max(analog)));
        self.last = Some(frame);
    }
}
