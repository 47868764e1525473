//! Fuzz target: `TelemetryFrame::from_str`
//!
//! Feeds arbitrary bytes, as the monitor would see them on a noisy serial
//! line, into the frame parser.  It must never panic, and anything it
//! accepts must render to a line that parses back to the same frame.
//!
//! cargo fuzz run fuzz_telemetry_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use ventguard::telemetry::{MAX_LINE_LEN, TelemetryFrame, TelemetryStats};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let mut stats = TelemetryStats::new();
    for line in text.lines() {
        if let Some(frame) = stats.ingest(line) {
            let rendered = frame.to_line();
            assert!(rendered.len() <= MAX_LINE_LEN);
            assert_eq!(rendered.as_str().parse::<TelemetryFrame>(), Ok(frame));
        }
    }
    assert!(stats.frames + stats.skipped_lines <= text.lines().count() as u64);
});
