//! Simulated hardware for host runs.
//!
//! [`SimHardware`] implements both ports over plain fields: tests and the
//! simulator set the inputs directly and inspect what the controller
//! commanded.  [`Scenario`] scripts the inputs over time and
//! [`Scenario::play`] runs a controller through it.

use embedded_hal::delay::DelayNs;

use crate::adapters::time::SimClock;
use crate::app::ports::{ActuatorPort, EventSink, SensorPort};
use crate::app::service::ControllerService;
use crate::sensors::SensorSnapshot;

/// In-memory stand-in for the sensor/actuator board.
#[derive(Debug, Clone)]
pub struct SimHardware {
    /// What the next `sample()` returns.
    pub inputs: SensorSnapshot,
    servo: Option<u8>,
    servo_writes: u64,
    buzzer: u8,
}

impl SimHardware {
    pub fn new(inputs: SensorSnapshot) -> Self {
        Self {
            inputs,
            servo: None,
            servo_writes: 0,
            buzzer: 0,
        }
    }

    /// Last angle commanded, `None` before the first write.
    pub fn servo_angle(&self) -> Option<u8> {
        self.servo
    }

    /// Number of servo commands received.
    pub fn servo_writes(&self) -> u64 {
        self.servo_writes
    }

    pub fn buzzer_level(&self) -> u8 {
        self.buzzer
    }
}

impl SensorPort for SimHardware {
    fn sample(&mut self) -> SensorSnapshot {
        self.inputs
    }
}

impl ActuatorPort for SimHardware {
    fn set_buzzer(&mut self, level: u8) {
        self.buzzer = level;
    }

    fn move_servo(&mut self, angle_deg: u8) {
        self.servo = Some(angle_deg);
        self.servo_writes += 1;
    }
}

/// Inputs held constant for a stretch of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub duration_ms: u32,
    pub inputs: SensorSnapshot,
}

/// A sequence of input phases played back against the simulated clock.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    phases: Vec<Phase>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a phase.
    #[must_use]
    pub fn then(mut self, duration_ms: u32, inputs: SensorSnapshot) -> Self {
        self.phases.push(Phase {
            duration_ms,
            inputs,
        });
        self
    }

    /// Dry start, a shower that builds and fades, then a long dry spell,
    /// then the manual switch thrown on a dry day.
    pub fn passing_shower() -> Self {
        let dry = SensorSnapshot::idle(1023);
        let rain = |rain_analog| SensorSnapshot {
            switch_on: false,
            rain_detected: true,
            rain_analog,
        };
        Self::new()
            .then(8_000, dry)
            .then(500, rain(780))
            .then(1_000, rain(520))
            .then(2_000, rain(240))
            .then(1_500, SensorSnapshot { rain_detected: false, ..rain(610) })
            .then(9_000, dry)
            .then(3_000, SensorSnapshot { switch_on: true, ..dry })
            .then(3_000, dry)
    }

    /// Inputs in effect `elapsed_ms` into the run; `None` once it is over.
    pub fn inputs_at(&self, elapsed_ms: u64) -> Option<SensorSnapshot> {
        let mut start = 0u64;
        for phase in &self.phases {
            let end = start + u64::from(phase.duration_ms);
            if elapsed_ms < end {
                return Some(phase.inputs);
            }
            start = end;
        }
        None
    }

    pub fn total_ms(&self) -> u64 {
        self.phases.iter().map(|p| u64::from(p.duration_ms)).sum()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Tick `service` once per configured interval until the script runs
    /// out, feeding each phase's inputs into `hw`.  `pace` is called after
    /// every tick with the interval just simulated, so a caller can sleep
    /// on a real clock.  Returns the number of ticks run.
    pub fn play(
        &self,
        service: &mut ControllerService,
        hw: &mut SimHardware,
        clock: &mut SimClock,
        sink: &mut impl EventSink,
        mut pace: impl FnMut(u32),
    ) -> u64 {
        let tick_ms = service.config().tick_interval_ms;
        let mut ticks = 0;
        while let Some(inputs) = self.inputs_at(clock.elapsed_ms()) {
            hw.inputs = inputs;
            service.tick(hw, &*clock, sink);
            clock.delay_ms(tick_ms);
            pace(tick_ms);
            ticks += 1;
        }
        ticks
    }
}
