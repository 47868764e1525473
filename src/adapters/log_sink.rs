//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger on target, `env_logger` on the
//! host).  Telemetry frames go out at `trace` level so they do not flood
//! the console; the serial sink is their real destination.

use log::{info, trace};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                trace!(
                    "TELEM | rain={} {} | switch={} | servo={}° | buzzer={}",
                    t.rain_analog,
                    if t.rain_detected { "WET" } else { "DRY" },
                    if t.switch_on { "ON" } else { "OFF" },
                    t.servo_position,
                    t.buzzer_level,
                );
            }
            AppEvent::TargetChanged { from, to, reason } => match reason {
                Some(r) => info!("TARGET | {:?} -> {:?} ({:?})", from, to, r),
                None => info!("TARGET | {:?} -> {:?}", from, to),
            },
            AppEvent::TargetReached {
                target,
                position_deg,
            } => {
                info!("SERVO | reached {:?} at {}°", target, position_deg);
            }
            AppEvent::Started { position_deg } => {
                info!("START | servo={}°", position_deg);
            }
        }
    }
}
