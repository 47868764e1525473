//! Controller service, the hexagonal core.
//!
//! [`ControllerService`] owns the configuration and the cross-tick
//! [`ControllerState`].  Each call to [`tick`](ControllerService::tick)
//! runs one full pass:
//!
//! ```text
//!  SensorPort ──▶ policy::decide ──▶ ActuatorPort (buzzer)
//!                       │
//!                       └──▶ stepper::step_toward ──▶ ActuatorPort (servo)
//!                                                          │
//!                                       EventSink ◀── telemetry frame
//! ```
//!
//! The service never sleeps.  The caller owns the loop and the inter-tick
//! delay.

use log::{debug, info};

use crate::config::SystemConfig;
use crate::control::stepper::{self, StepOutcome};
use crate::control::{ControllerState, Decision, VentTarget, policy};
use crate::error::Result;
use crate::sensors::SensorSnapshot;
use crate::telemetry::TelemetryFrame;

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort, TimePort};

/// Everything one tick observed and decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub now_ms: u32,
    pub snapshot: SensorSnapshot,
    pub decision: Decision,
    pub step: StepOutcome,
    pub frame: TelemetryFrame,
}

/// The application service orchestrates all domain logic.
pub struct ControllerService {
    config: SystemConfig,
    state: ControllerState,
    last_target: Option<VentTarget>,
    tick_count: u64,
}

impl ControllerService {
    /// Construct the service from a validated configuration.
    pub fn new(config: SystemConfig) -> Result<Self> {
        config.validate()?;
        let state = ControllerState::new(&config);
        Ok(Self {
            config,
            state,
            last_target: None,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Park the servo at its power-on angle and silence the buzzer.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let position_deg = self.state.servo_position;
        hw.set_buzzer(0);
        hw.move_servo(position_deg);
        sink.emit(&AppEvent::Started { position_deg });
        info!("Controller started, servo at {}°", position_deg);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: sample → decide → actuate → report.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`].  This avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl TimePort,
        sink: &mut impl EventSink,
    ) -> TickReport {
        self.tick_count += 1;

        // 1. Sample
        let snapshot = hw.sample();
        let now_ms = clock.now_ms();

        // 2. Decide
        let decision = policy::decide(&mut self.state, &snapshot, now_ms, &self.config);
        if self.last_target != Some(decision.target) {
            if let Some(from) = self.last_target {
                sink.emit(&AppEvent::TargetChanged {
                    from,
                    to: decision.target,
                    reason: decision.reason,
                });
            }
            self.last_target = Some(decision.target);
        }

        // 3. Actuate
        hw.set_buzzer(decision.buzzer_level);

        let target_deg = decision.target.angle(&self.config);
        let step = stepper::step_toward(
            &mut self.state,
            target_deg,
            now_ms,
            self.config.servo_step_interval_ms,
        );
        if let StepOutcome::Stepped(position_deg) = step {
            hw.move_servo(position_deg);
            if position_deg == target_deg {
                sink.emit(&AppEvent::TargetReached {
                    target: decision.target,
                    position_deg,
                });
            }
        }

        // 4. Report
        let frame = TelemetryFrame {
            rain_analog: snapshot.rain_analog,
            rain_detected: snapshot.rain_detected,
            switch_on: snapshot.switch_on,
            servo_position: self.state.servo_position,
            buzzer_level: decision.buzzer_level,
        };
        sink.emit(&AppEvent::Telemetry(frame));
        debug!("tick {}: {:?} {:?}", self.tick_count, decision.target, step);

        TickReport {
            now_ms,
            snapshot,
            decision,
            step,
            frame,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Cross-tick state (servo angle, timestamps).
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Servo angle last commanded.
    pub fn servo_position(&self) -> u8 {
        self.state.servo_position
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
