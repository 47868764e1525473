//! GPIO / peripheral pin assignments for the VentGuard controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Manual close switch.  HIGH = engaged (close requested).
pub const SWITCH_GPIO: i32 = 7;

/// MH-RD rain module digital output.  Active-low: LOW = rain present.
pub const RAIN_DIGITAL_GPIO: i32 = 4;

/// MH-RD rain module analog output, ADC1 channel 0 (GPIO 1 on ESP32-S3).
/// Higher readings mean a drier sensing plate.
pub const RAIN_ANALOG_GPIO: i32 = 1;

/// Native ADC resolution on the ESP32-S3 (12-bit).
pub const ADC_NATIVE_BITS: u32 = 12;
/// Resolution the calibration references are expressed in (10-bit, 0 – 1023).
pub const ADC_REPORTED_BITS: u32 = 10;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Hobby servo signal line (LEDC channel 0).
pub const SERVO_GPIO: i32 = 3;

/// Piezo buzzer drive (LEDC channel 1).
pub const BUZZER_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Servo frame rate: 50 Hz, 20 ms period.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// Servo frame period in microseconds.
pub const SERVO_PERIOD_US: u32 = 1_000_000 / SERVO_PWM_FREQ_HZ;
/// LEDC resolution for the servo timer.  14-bit gives ~1.2 µs per count.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Pulse width commanding 0°.
pub const SERVO_MIN_PULSE_US: u32 = 544;
/// Pulse width commanding 180°.
pub const SERVO_MAX_PULSE_US: u32 = 2400;
/// Mechanical travel that the pulse range above spans.
pub const SERVO_TRAVEL_DEG: u8 = 180;

/// Buzzer PWM carrier (2 kHz, audible on a passive piezo).
pub const BUZZER_PWM_FREQ_HZ: u32 = 2_000;
/// LEDC resolution for the buzzer.  8-bit gives 0 – 255 levels.
pub const BUZZER_PWM_RESOLUTION_BITS: u32 = 8;
