//! Mock `embedded-hal` peripherals and a recording event sink.
//!
//! Pins, ADC and PWM channels keep their state behind `Rc` handles, so a
//! test holds one clone while the other is moved into the adapter, then
//! flips inputs or inspects outputs through its own copy.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::digital::{self, InputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use ventguard::app::events::AppEvent;
use ventguard::app::ports::EventSink;
use ventguard::control::VentTarget;
use ventguard::sensors::AnalogSource;
use ventguard::telemetry::TelemetryFrame;

// ── Digital input ─────────────────────────────────────────────

/// Input pin.  A level of `None` makes every read fail.
#[derive(Clone)]
pub struct MockPin {
    level: Rc<Cell<Option<bool>>>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn new(high: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(Some(high))),
        }
    }

    pub fn set(&self, high: bool) {
        self.level.set(Some(high));
    }

    pub fn fail(&self) {
        self.level.set(None);
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.level.get().ok_or(digital::ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ── Analog input ──────────────────────────────────────────────

#[derive(Clone)]
pub struct MockAdc {
    value: Rc<Cell<Option<u16>>>,
}

#[allow(dead_code)]
impl MockAdc {
    pub fn new(value: u16) -> Self {
        Self {
            value: Rc::new(Cell::new(Some(value))),
        }
    }

    pub fn set(&self, value: u16) {
        self.value.set(Some(value));
    }

    pub fn fail(&self) {
        self.value.set(None);
    }
}

impl AnalogSource for MockAdc {
    type Error = &'static str;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        self.value.get().ok_or("conversion timeout")
    }
}

// ── PWM output ────────────────────────────────────────────────

/// PWM channel that records every duty it accepts.
#[derive(Clone)]
pub struct MockPwm {
    max: u16,
    duties: Rc<RefCell<Vec<u16>>>,
    broken: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl MockPwm {
    pub fn new(max: u16) -> Self {
        Self {
            max,
            duties: Rc::new(RefCell::new(Vec::new())),
            broken: Rc::new(Cell::new(false)),
        }
    }

    pub fn last_duty(&self) -> Option<u16> {
        self.duties.borrow().last().copied()
    }

    pub fn writes(&self) -> usize {
        self.duties.borrow().len()
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.set(broken);
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = pwm::ErrorKind;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.broken.get() {
            return Err(pwm::ErrorKind::Other);
        }
        self.duties.borrow_mut().push(duty);
        Ok(())
    }
}

// ── Recording sink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<TelemetryFrame> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Telemetry(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    /// `(from, to)` of every target change, in order.
    pub fn target_changes(&self) -> Vec<(VentTarget, VentTarget)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::TargetChanged { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn reached(&self) -> Vec<(VentTarget, u8)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::TargetReached {
                    target,
                    position_deg,
                } => Some((*target, *position_deg)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
