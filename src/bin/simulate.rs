//! Desktop simulator for the VentGuard controller.
//!
//! Runs the real [`ControllerService`] against simulated hardware and a
//! scripted passing shower, on a simulated clock.  Telemetry lines go to
//! stdout in the firmware's serial format; logs go to stderr.  Pipe into
//! `rain-monitor` to watch the run:
//!
//! ```text
//! rain-sim | rain-monitor -
//! RUST_LOG=debug rain-sim --realtime --config bench.json
//! ```
//!
//! # Options
//!
//! | Flag              | Effect                                        |
//! |-------------------|-----------------------------------------------|
//! | `--realtime`      | sleep for each tick instead of running flat out |
//! | `--config <path>` | JSON overrides on top of the default config   |

use std::io;

use anyhow::{Context, Result, bail};
use embedded_hal::delay::DelayNs;
use log::info;

use ventguard::adapters::serial::SerialTelemetrySink;
use ventguard::adapters::sim::{Scenario, SimHardware};
use ventguard::adapters::time::{MonotonicClock, SimClock};
use ventguard::app::service::ControllerService;
use ventguard::config::SystemConfig;

struct Options {
    realtime: bool,
    config_path: Option<String>,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options {
        realtime: false,
        config_path: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--realtime" => opts.realtime = true,
            "--config" => {
                opts.config_path = Some(args.next().context("--config needs a path")?);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(opts)
}

fn load_config(path: Option<&str>) -> Result<SystemConfig> {
    let Some(path) = path else {
        return Ok(SystemConfig::default());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config = SystemConfig::from_json(&json).with_context(|| format!("parsing {path}"))?;
    info!("Loaded config overrides from {}", path);
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let opts = parse_args()?;
    let config = load_config(opts.config_path.as_deref())?;

    let scenario = Scenario::passing_shower();
    info!(
        "Simulating {} phases over {} ms at {} ms/tick",
        scenario.phases().len(),
        scenario.total_ms(),
        config.tick_interval_ms
    );

    let mut service = ControllerService::new(config)?;
    let mut hw = SimHardware::new(scenario.inputs_at(0).context("empty scenario")?);
    let mut clock = SimClock::new();
    let mut wall = MonotonicClock::new();
    let mut sink = SerialTelemetrySink::new(io::stdout().lock());

    service.start(&mut hw, &mut sink);
    scenario.play(&mut service, &mut hw, &mut clock, &mut sink, |ms| {
        if opts.realtime {
            wall.delay_ms(ms);
        }
    });

    info!(
        "Done: {} ticks, {} servo commands, final position {}°, {} lines written",
        service.tick_count(),
        hw.servo_writes(),
        service.servo_position(),
        sink.lines_written()
    );
    if sink.write_failures() > 0 {
        bail!("{} telemetry lines could not be written", sink.write_failures());
    }
    Ok(())
}
