//! Fuzz target: `policy::decide` + `stepper::step_toward`
//!
//! Each 4-byte chunk of input is one tick: a time delta, the two digital
//! inputs and an analog reading.  Whatever the sequence, the servo stays
//! between the two positions, moves at most one degree per step interval,
//! and the buzzer only sounds while closing.
//!
//! cargo fuzz run fuzz_control_inputs

#![no_main]

use libfuzzer_sys::fuzz_target;
use ventguard::config::SystemConfig;
use ventguard::control::policy::decide;
use ventguard::control::stepper::step_toward;
use ventguard::control::{ControllerState, StepOutcome};
use ventguard::sensors::SensorSnapshot;

fuzz_target!(|data: &[u8]| {
    let cfg = SystemConfig::default();
    let mut st = ControllerState::new(&cfg);
    let mut now: u32 = 0;
    let mut last_step: Option<u32> = None;

    for chunk in data.chunks_exact(4) {
        now = now.wrapping_add(u32::from(chunk[0]));
        let snap = SensorSnapshot {
            switch_on: chunk[1] & 1 != 0,
            rain_detected: chunk[1] & 2 != 0,
            rain_analog: u16::from_le_bytes([chunk[2], chunk[3]]) & 0x03ff,
        };

        let d = decide(&mut st, &snap, now, &cfg);
        if !d.closing {
            assert_eq!(d.buzzer_level, 0);
        }

        let before = st.servo_position;
        let target = d.target.angle(&cfg);
        if let StepOutcome::Stepped(p) = step_toward(&mut st, target, now, cfg.servo_step_interval_ms) {
            assert_eq!(before.abs_diff(p), 1);
            if let Some(prev) = last_step {
                assert!(now.wrapping_sub(prev) >= cfg.servo_step_interval_ms);
            }
            last_step = Some(now);
        }
        assert!(st.servo_position <= cfg.close_position_deg);
    }
});
