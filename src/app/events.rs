//! Outbound application events.
//!
//! The [`ControllerService`](super::service::ControllerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: write the telemetry line to
//! serial, log transitions, record them in a test.

use crate::control::{CloseReason, VentTarget};
use crate::telemetry::TelemetryFrame;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started; the servo was commanded to this angle.
    Started { position_deg: u8 },

    /// Per-tick telemetry frame.
    Telemetry(TelemetryFrame),

    /// The policy picked a different target than on the previous tick.
    TargetChanged {
        from: VentTarget,
        to: VentTarget,
        reason: Option<CloseReason>,
    },

    /// The servo arrived at the current target.
    TargetReached { target: VentTarget, position_deg: u8 },
}
