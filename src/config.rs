//! System configuration parameters
//!
//! All tunable parameters for the VentGuard controller.  Defaults match the
//! bench-calibrated unit; the rain references need recalibrating per sensor
//! plate.  Values are fixed at startup and validated before the control loop
//! runs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Servo travel ---
    /// Servo angle (degrees) for the fully open vent
    pub open_position_deg: u8,
    /// Servo angle (degrees) for the fully closed vent
    pub close_position_deg: u8,

    // --- Timing ---
    /// Quiet time after the last rain detection before opening is allowed (ms)
    pub reopen_delay_ms: u32,
    /// Minimum time between successive one-degree servo steps (ms)
    pub servo_step_interval_ms: u32,
    /// Delay between control ticks (ms)
    pub tick_interval_ms: u32,

    // --- Rain sensor calibration ---
    /// Analog reading of a dry plate; maps to buzzer level 0
    pub rain_dry_reference: u16,
    /// Analog reading of a soaked plate; maps to buzzer level 255
    pub rain_wet_reference: u16,
    /// Full-scale analog reading
    pub rain_adc_max: u16,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Servo
            open_position_deg: 0,
            close_position_deg: 90,

            // Timing
            reopen_delay_ms: 5000,
            servo_step_interval_ms: 15, // ~67°/s
            tick_interval_ms: 50,       // 20 Hz

            // Rain calibration (10-bit ADC)
            rain_dry_reference: 900,
            rain_wet_reference: 200,
            rain_adc_max: 1023,
        }
    }
}

impl SystemConfig {
    /// Reject parameter sets the control loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.open_position_deg == self.close_position_deg {
            return Err(ConfigError::ValidationFailed(
                "open and close positions must differ",
            ));
        }
        if self.open_position_deg > 180 || self.close_position_deg > 180 {
            return Err(ConfigError::ValidationFailed(
                "servo positions must be within 0-180 degrees",
            ));
        }
        if self.servo_step_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "servo step interval must be non-zero",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "tick interval must be non-zero",
            ));
        }
        if self.rain_dry_reference == self.rain_wet_reference {
            return Err(ConfigError::ValidationFailed(
                "dry and wet references must differ",
            ));
        }
        if self.rain_dry_reference > self.rain_adc_max
            || self.rain_wet_reference > self.rain_adc_max
        {
            return Err(ConfigError::ValidationFailed(
                "rain references exceed ADC full scale",
            ));
        }
        Ok(())
    }

    /// Parse a JSON override file on top of the defaults.  Missing fields
    /// keep their default values.  The result is validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
