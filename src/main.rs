//! VentGuard firmware entry point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter        SerialTelemetrySink  Monotonic-  │
//! │  (Sensor + Actuator)    (EventSink)          Clock       │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────         │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │       ControllerService (pure logic)           │      │
//! │  │  policy · stepper · telemetry frame            │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! One tick every `tick_interval_ms`, forever.  Reset is the only way out.
#![deny(unused_must_use)]

use anyhow::{Context, Result, bail, ensure};
use embedded_hal::delay::DelayNs;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::{Gpio1, Pin, PinDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::sys::EspError;
use log::info;

use ventguard::adapters::hardware::HardwareAdapter;
use ventguard::adapters::serial::SerialTelemetrySink;
use ventguard::adapters::time::MonotonicClock;
use ventguard::app::service::ControllerService;
use ventguard::config::SystemConfig;
use ventguard::drivers::buzzer::Buzzer;
use ventguard::drivers::servo::ServoDriver;
use ventguard::pins;
use ventguard::sensors::rain::RainSensor;
use ventguard::sensors::switch::ManualSwitch;
use ventguard::sensors::{AnalogSource, SensorHub};

// ── Rain AO channel ───────────────────────────────────────────
//
// Oneshot ADC read, scaled from the native 12-bit range down to the
// 10-bit range the calibration references are expressed in.

struct RainAdc<'d> {
    channel: AdcChannelDriver<'d, Gpio1, &'d AdcDriver<'d, ADC1>>,
}

impl AnalogSource for RainAdc<'_> {
    type Error = EspError;

    fn read_raw(&mut self) -> Result<u16, EspError> {
        let shift = pins::ADC_NATIVE_BITS - pins::ADC_REPORTED_BITS;
        self.channel.read().map(|raw| raw >> shift)
    }
}

// ── Pin and timer plumbing ────────────────────────────────────

/// Hand back `pin` if it is the GPIO `pins` assigns to `what`.
fn assigned<P: Pin>(pin: P, gpio: i32, what: &str) -> Result<P> {
    let actual = i32::from(pin.pin());
    ensure!(actual == gpio, "{what} wired to GPIO {actual}, pins.rs says {gpio}");
    Ok(pin)
}

/// LEDC timer resolution for a bit width from `pins`.
fn ledc_resolution(bits: u32) -> Result<Resolution> {
    Ok(match bits {
        8 => Resolution::Bits8,
        10 => Resolution::Bits10,
        12 => Resolution::Bits12,
        14 => Resolution::Bits14,
        other => bail!("unsupported LEDC resolution: {other} bits"),
    })
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("VentGuard v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().context("default configuration")?;
    info!(
        "Config: close={}° reopen_delay={}ms step={}ms tick={}ms dry={} wet={}",
        config.close_position_deg,
        config.reopen_delay_ms,
        config.servo_step_interval_ms,
        config.tick_interval_ms,
        config.rain_dry_reference,
        config.rain_wet_reference,
    );

    // ── 3. Peripherals (checked against `pins`) ───────────────
    let peripherals = Peripherals::take().context("peripherals already taken")?;
    let io = peripherals.pins;

    let switch = PinDriver::input(assigned(io.gpio7, pins::SWITCH_GPIO, "switch")?)
        .context("switch GPIO")?;
    let rain_do = PinDriver::input(assigned(io.gpio4, pins::RAIN_DIGITAL_GPIO, "rain DO")?)
        .context("rain DO GPIO")?;

    let adc = AdcDriver::new(peripherals.adc1).context("ADC1")?;
    let rain_ao = RainAdc {
        channel: AdcChannelDriver::new(
            &adc,
            assigned(io.gpio1, pins::RAIN_ANALOG_GPIO, "rain AO")?,
            &AdcChannelConfig {
                attenuation: DB_11,
                ..Default::default()
            },
        )
        .context("rain AO channel")?,
    };

    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(pins::SERVO_PWM_FREQ_HZ.Hz())
            .resolution(ledc_resolution(pins::SERVO_PWM_RESOLUTION_BITS)?),
    )
    .context("servo LEDC timer")?;
    let servo_pin = assigned(io.gpio3, pins::SERVO_GPIO, "servo")?;
    let servo_pwm = LedcDriver::new(peripherals.ledc.channel0, &servo_timer, servo_pin)
        .context("servo LEDC channel")?;

    let buzzer_timer = LedcTimerDriver::new(
        peripherals.ledc.timer1,
        &TimerConfig::new()
            .frequency(pins::BUZZER_PWM_FREQ_HZ.Hz())
            .resolution(ledc_resolution(pins::BUZZER_PWM_RESOLUTION_BITS)?),
    )
    .context("buzzer LEDC timer")?;
    let buzzer_pin = assigned(io.gpio5, pins::BUZZER_GPIO, "buzzer")?;
    let buzzer_pwm = LedcDriver::new(peripherals.ledc.channel1, &buzzer_timer, buzzer_pin)
        .context("buzzer LEDC channel")?;

    // ── 4. Adapters ───────────────────────────────────────────
    let sensor_hub = SensorHub::new(
        ManualSwitch::new(switch),
        RainSensor::new(rain_do, rain_ao),
        config.rain_adc_max,
    );
    let mut hw = HardwareAdapter::new(
        sensor_hub,
        ServoDriver::new(servo_pwm),
        Buzzer::new(buzzer_pwm),
    );
    let mut clock = MonotonicClock::new();
    let mut sink = SerialTelemetrySink::new(std::io::stdout());

    // ── 5. Controller ─────────────────────────────────────────
    let tick_ms = config.tick_interval_ms;
    let mut service = ControllerService::new(config)?;
    service.start(&mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        service.tick(&mut hw, &clock, &mut sink);
        clock.delay_ms(tick_ms);
    }
}
