//! HardwareAdapter over mock `embedded-hal` pins and PWM channels.

use ventguard::adapters::hardware::HardwareAdapter;
use ventguard::adapters::time::SimClock;
use ventguard::app::ports::{ActuatorPort, SensorPort};
use ventguard::app::service::ControllerService;
use ventguard::config::SystemConfig;
use ventguard::drivers::buzzer::Buzzer;
use ventguard::drivers::servo::{ServoDriver, duty_for_pulse, pulse_us_for_angle};
use ventguard::error::{Error, SensorError};
use ventguard::pins;
use ventguard::sensors::rain::RainSensor;
use ventguard::sensors::switch::ManualSwitch;
use ventguard::sensors::{SensorHub, SensorSnapshot};

use crate::mock_hw::{MockAdc, MockPin, MockPwm, RecordingSink};

const SERVO_MAX_DUTY: u16 = (1 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;
const BUZZER_MAX_DUTY: u16 = (1 << pins::BUZZER_PWM_RESOLUTION_BITS) - 1;

type Adapter = HardwareAdapter<MockPin, MockPin, MockAdc, MockPwm, MockPwm>;

/// Handles to every mock line plus the adapter that owns their twins.
struct Board {
    switch: MockPin,
    rain_do: MockPin,
    rain_ao: MockAdc,
    servo: MockPwm,
    buzzer: MockPwm,
    hw: Adapter,
}

/// Switch released (low), rain DO idle (high), plate dry.
fn board() -> Board {
    let switch = MockPin::new(false);
    let rain_do = MockPin::new(true);
    let rain_ao = MockAdc::new(1023);
    let servo = MockPwm::new(SERVO_MAX_DUTY);
    let buzzer = MockPwm::new(BUZZER_MAX_DUTY);

    let hub = SensorHub::new(
        ManualSwitch::new(switch.clone()),
        RainSensor::new(rain_do.clone(), rain_ao.clone()),
        1023,
    );
    let hw = HardwareAdapter::new(
        hub,
        ServoDriver::new(servo.clone()),
        Buzzer::new(buzzer.clone()),
    );
    Board {
        switch,
        rain_do,
        rain_ao,
        servo,
        buzzer,
        hw,
    }
}

// ── Sensing ───────────────────────────────────────────────────

#[test]
fn idle_board_reads_dry_and_released() {
    let mut b = board();
    assert_eq!(b.hw.sample(), SensorSnapshot::idle(1023));
}

#[test]
fn rain_digital_output_is_active_low() {
    let mut b = board();
    b.rain_do.set(false);
    b.rain_ao.set(310);
    let snap = b.hw.sample();
    assert!(snap.rain_detected);
    assert_eq!(snap.rain_analog, 310);
}

#[test]
fn switch_high_means_engaged() {
    let mut b = board();
    b.switch.set(true);
    assert!(b.hw.sample().switch_on);
}

#[test]
fn failed_reads_keep_previous_values() {
    let mut b = board();
    b.switch.set(true);
    b.rain_do.set(false);
    b.rain_ao.set(455);
    let good = b.hw.sample();

    b.switch.fail();
    b.rain_do.fail();
    b.rain_ao.fail();
    assert_eq!(b.hw.sample(), good);

    // Recovery is picked up on the next read.
    b.rain_ao.set(470);
    assert_eq!(b.hw.sample().rain_analog, 470);
}

#[test]
fn driver_failures_surface_as_sensor_errors() {
    let pin = MockPin::new(true);
    let adc = MockAdc::new(512);
    pin.fail();
    adc.fail();
    let mut switch = ManualSwitch::new(pin.clone());
    let mut rain = RainSensor::new(pin, adc);

    let gpio = Error::Sensor(SensorError::GpioReadFailed);
    assert_eq!(switch.read(), Err(gpio));
    assert_eq!(rain.read_detected(), Err(gpio));
    let err = rain.read_level().unwrap_err();
    assert_eq!(err, Error::Sensor(SensorError::AdcReadFailed));
    assert_eq!(err.to_string(), "sensor: analog conversion failed");
}

#[test]
fn failure_before_first_read_reports_idle_defaults() {
    let mut b = board();
    b.rain_ao.fail();
    b.rain_do.set(false);
    let snap = b.hw.sample();
    assert_eq!(snap.rain_analog, 1023);
    assert!(snap.rain_detected);
}

// ── Actuation ─────────────────────────────────────────────────

#[test]
fn servo_duty_tracks_angle() {
    let mut b = board();
    b.hw.move_servo(0);
    assert_eq!(b.servo.last_duty(), Some(445));
    b.hw.move_servo(90);
    assert_eq!(b.servo.last_duty(), Some(1205));
    b.hw.move_servo(180);
    assert_eq!(b.servo.last_duty(), Some(1965));
    assert_eq!(b.hw.servo().angle(), Some(180));
}

#[test]
fn buzzer_duty_is_level_fraction_of_full_scale() {
    let mut b = board();
    b.hw.set_buzzer(255);
    assert_eq!(b.buzzer.last_duty(), Some(255));
    b.hw.set_buzzer(128);
    assert_eq!(b.buzzer.last_duty(), Some(128));
    assert!(b.hw.buzzer().is_sounding());
    b.hw.set_buzzer(0);
    assert_eq!(b.buzzer.last_duty(), Some(0));
    assert!(!b.hw.buzzer().is_sounding());
}

#[test]
fn pwm_failure_is_absorbed() {
    let mut b = board();
    b.hw.move_servo(30);
    b.hw.set_buzzer(40);

    b.servo.set_broken(true);
    b.buzzer.set_broken(true);
    b.hw.move_servo(31);
    b.hw.set_buzzer(200);

    assert_eq!(b.hw.servo().angle(), Some(30));
    assert_eq!(b.hw.buzzer().level(), 40);
    assert_eq!(b.servo.writes(), 1);
}

// ── End to end ────────────────────────────────────────────────

#[test]
fn service_drives_real_adapter_from_pin_levels() {
    let mut b = board();
    let mut svc = ControllerService::new(SystemConfig::default()).unwrap();
    let clock = SimClock::starting_at(0);
    let mut sink = RecordingSink::new();

    svc.start(&mut b.hw, &mut sink);
    assert_eq!(b.servo.last_duty(), Some(445));
    assert_eq!(b.buzzer.last_duty(), Some(0));

    b.rain_do.set(false);
    b.rain_ao.set(200);
    let first = svc.tick(&mut b.hw, &clock, &mut sink);
    assert!(first.frame.rain_detected);
    assert_eq!(b.buzzer.last_duty(), Some(255));
    assert_eq!(b.servo.writes(), 1);

    clock.set_ms(15);
    svc.tick(&mut b.hw, &clock, &mut sink);
    assert_eq!(
        b.servo.last_duty(),
        Some(duty_for_pulse(pulse_us_for_angle(1), SERVO_MAX_DUTY))
    );
    assert_eq!(b.hw.servo().angle(), Some(1));
}
