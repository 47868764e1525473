//! Full scripted run: the passing-shower scenario rendered to a serial
//! byte stream and read back the way the monitor reads it.

use ventguard::adapters::serial::SerialTelemetrySink;
use ventguard::adapters::sim::{Scenario, SimHardware};
use ventguard::adapters::time::SimClock;
use ventguard::app::service::ControllerService;
use ventguard::config::SystemConfig;
use ventguard::sensors::SensorSnapshot;
use ventguard::telemetry::{TelemetryFrame, TelemetryStats};

struct Run {
    frames: Vec<TelemetryFrame>,
    stats: TelemetryStats,
    ticks: u64,
    paced_ms: u64,
    lines_written: u64,
    write_failures: u64,
}

fn run(scenario: &Scenario) -> Run {
    let mut svc = ControllerService::new(SystemConfig::default()).unwrap();
    let mut hw = SimHardware::new(SensorSnapshot::idle(1023));
    let mut clock = SimClock::new();
    let mut sink = SerialTelemetrySink::new(Vec::new());
    let mut paced_ms = 0;

    svc.start(&mut hw, &mut sink);
    let ticks = scenario.play(&mut svc, &mut hw, &mut clock, &mut sink, |ms| {
        paced_ms += u64::from(ms);
    });
    assert_eq!(clock.elapsed_ms(), paced_ms);

    let lines_written = sink.lines_written();
    let write_failures = sink.write_failures();
    let bytes = sink.into_inner();
    let text = String::from_utf8(bytes).unwrap();

    let mut stats = TelemetryStats::new();
    let frames = text.lines().filter_map(|l| stats.ingest(l)).collect();
    Run {
        frames,
        stats,
        ticks,
        paced_ms,
        lines_written,
        write_failures,
    }
}

#[test]
fn every_tick_produces_one_parseable_line() {
    let scenario = Scenario::passing_shower();
    let r = run(&scenario);

    let ticks = scenario.total_ms() / 50;
    assert_eq!(ticks, 560);
    assert_eq!(r.ticks, ticks);
    assert_eq!(r.paced_ms, scenario.total_ms());
    assert_eq!(r.lines_written, ticks);
    assert_eq!(r.write_failures, 0);
    assert_eq!(r.stats.frames, ticks);
    assert_eq!(r.stats.skipped_lines, 0);
    // 3.5 s of detected rain at 50 ms per tick.
    assert_eq!(r.stats.rain_frames, 70);
    assert_eq!(r.stats.min_analog, Some(240));
    assert_eq!(r.stats.max_analog, Some(1023));
}

#[test]
fn servo_never_moves_more_than_one_degree_per_frame() {
    let r = run(&Scenario::passing_shower());
    for pair in r.frames.windows(2) {
        let (a, b) = (pair[0].servo_position, pair[1].servo_position);
        assert!(a.abs_diff(b) <= 1, "jump {a} -> {b}");
        assert!(b <= 90);
    }
}

#[test]
fn buzzer_only_sounds_while_travelling_closed() {
    let r = run(&Scenario::passing_shower());
    for pair in r.frames.windows(2) {
        if pair[1].buzzer_level > 0 {
            assert!(pair[0].servo_position < 90);
            assert!(pair[1].servo_position > pair[0].servo_position);
        }
    }
    // Rain closes the vent from 8.00 s until it arrives at 10.90 s.
    assert_eq!(r.stats.alert_frames, 59);
    assert_eq!(r.frames.iter().map(|f| f.buzzer_level).max(), Some(240));
}

#[test]
fn shower_closes_fully_and_run_ends_open() {
    let r = run(&Scenario::passing_shower());
    assert!(r.frames.iter().any(|f| f.servo_position == 90));
    // Switch phase: 60 ticks closing, dry tail: 60 ticks back to open.
    let last = r.stats.last.unwrap();
    assert_eq!(last.servo_position, 0);
    assert!(!last.switch_on);
}
