//! Unified error types for the VentGuard firmware.
//!
//! The control policy itself is total and never fails.  These types cover
//! the edges around it: configuration validation, hardware access in the
//! adapters, and parsing telemetry on the host side.  All variants are
//! `Copy` so they can be logged and passed around without allocation.

use core::fmt;

// ── Top-level firmware error ────────────────────────────────

/// Failure in a hardware-facing layer, tagged with the subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Switch, rain DO or rain AO could not be read.
    Sensor(SensorError),
    /// Servo or buzzer PWM rejected a duty.
    Actuator(ActuatorError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ── Sensor errors ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Analog conversion on the rain AO channel failed.
    AdcReadFailed,
    /// Digital input level could not be read.
    GpioReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "analog conversion failed"),
            Self::GpioReadFailed => write!(f, "digital input unreadable"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ── Actuator errors ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The PWM channel refused the duty value.
    PwmWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM duty rejected"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ── Configuration errors ────────────────────────────────────

/// Errors from [`SystemConfig`](crate::config::SystemConfig) loading and
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter is out of range or contradicts another; the message
    /// names it.
    ValidationFailed(&'static str),
    /// Override document could not be deserialised.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => f.write_str(msg),
            Self::Malformed => write!(f, "malformed config document"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Telemetry parse errors ──────────────────────────────────

/// Reasons a serial line is not a telemetry frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    /// Line did not split into exactly five comma-separated fields.
    FieldCount(usize),
    /// Field at `index` is not an integer.
    InvalidField { index: usize },
    /// Field at `index` is an integer outside the field's range.
    OutOfRange { index: usize },
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected 5 fields, got {n}"),
            Self::InvalidField { index } => write!(f, "field {index} is not an integer"),
            Self::OutOfRange { index } => write!(f, "field {index} out of range"),
        }
    }
}

impl core::error::Error for TelemetryError {}

// ── Convenience Result alias ────────────────────────────────

/// `Result` with the crate [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
