//! Serial telemetry sink.
//!
//! Writes one telemetry line per [`AppEvent::Telemetry`] to any
//! `std::io::Write` (UART-backed stdout on target, stdout or a buffer on
//! the host).  All other events are forwarded to the [`LogEventSink`].

use std::io::Write;

use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

use super::log_sink::LogEventSink;

pub struct SerialTelemetrySink<W> {
    out: W,
    log: LogEventSink,
    lines_written: u64,
    write_failures: u64,
}

impl<W: Write> SerialTelemetrySink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            log: LogEventSink::new(),
            lines_written: 0,
            write_failures: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn write_failures(&self) -> u64 {
        self.write_failures
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for SerialTelemetrySink<W> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(frame) => {
                let line = frame.to_line();
                match writeln!(self.out, "{}", line.as_str()).and_then(|()| self.out.flush()) {
                    Ok(()) => self.lines_written += 1,
                    Err(e) => {
                        // Logged once; the counter tracks the rest.
                        if self.write_failures == 0 {
                            warn!("telemetry write failed: {}", e);
                        }
                        self.write_failures += 1;
                    }
                }
            }
            other => self.log.emit(other),
        }
    }
}
