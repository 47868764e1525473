//! Telemetry monitor.
//!
//! Reads the controller's serial telemetry and prints one status line per
//! frame.  Lines that are not telemetry (boot banners, log output) are
//! skipped.
//!
//! With no argument the first USB serial port found is opened at 9600 baud.
//! A lost or missing board is retried every few seconds until the monitor
//! is stopped; a summary is printed each time the link drops.  `-` reads
//! stdin instead and prints the summary once the input ends.
//!
//! ```text
//! rain-monitor
//! rain-monitor /dev/ttyUSB0 --baud 115200
//! rain-sim | rain-monitor - --json
//! ```

use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};

use ventguard::adapters::serial_port::{self, DEFAULT_BAUD, LineReader, LinkRead};
use ventguard::telemetry::{TelemetryFrame, TelemetryStats};

/// Pause between attempts to find or reopen the board.
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

enum Source {
    Stdin,
    /// Explicit device path, or `None` to auto-detect.
    Serial(Option<String>),
}

struct Options {
    json: bool,
    baud: u32,
    source: Source,
}

fn parse_args() -> Result<Options> {
    let mut opts = Options {
        json: false,
        baud: DEFAULT_BAUD,
        source: Source::Serial(None),
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => opts.json = true,
            "--baud" => {
                let value = args.next().context("--baud needs a rate")?;
                opts.baud = value
                    .parse()
                    .with_context(|| format!("invalid baud rate: {value}"))?;
            }
            "-" => opts.source = Source::Stdin,
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            path => opts.source = Source::Serial(Some(path.to_owned())),
        }
    }
    Ok(opts)
}

fn status_line(frame: &TelemetryFrame) -> String {
    format!(
        "RainValue (AO): {:>4} | RainDetected: {:<3} | Switch: {:<3} | ServoPos: {:>3} | BuzzerVol: {:>3}",
        frame.rain_analog,
        if frame.rain_detected { "YES" } else { "NO" },
        if frame.switch_on { "ON" } else { "OFF" },
        frame.servo_position,
        frame.buzzer_level,
    )
}

struct Monitor<W> {
    out: W,
    json: bool,
    stats: TelemetryStats,
}

impl<W: Write> Monitor<W> {
    fn line(&mut self, line: &str) -> Result<()> {
        match self.stats.ingest(line) {
            Some(frame) if self.json => writeln!(self.out, "{}", serde_json::to_string(&frame)?)?,
            Some(frame) => writeln!(self.out, "{}", status_line(&frame))?,
            None => debug!("skipped: {}", line.trim_end()),
        }
        Ok(())
    }

    fn summary(&mut self) -> Result<()> {
        let stats = &self.stats;
        if self.json {
            writeln!(self.out, "{}", serde_json::to_string(stats)?)?;
        } else {
            writeln!(
                self.out,
                "-- {} frames, {} skipped, {} with rain, {} with buzzer, AO range {}..{}",
                stats.frames,
                stats.skipped_lines,
                stats.rain_frames,
                stats.alert_frames,
                stats.min_analog.map_or_else(|| "-".to_owned(), |v| v.to_string()),
                stats.max_analog.map_or_else(|| "-".to_owned(), |v| v.to_string()),
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Feed lines until the stream closes.  Timeouts are waited out.
    fn drain(&mut self, reader: &mut LineReader<impl Read>) -> io::Result<()> {
        loop {
            match reader.poll()? {
                LinkRead::Line(line) => {
                    if let Err(e) = self.line(&line) {
                        return Err(io::Error::other(e));
                    }
                }
                LinkRead::Idle => {}
                LinkRead::Closed => return Ok(()),
            }
        }
    }
}

/// The explicit path, or whatever USB serial port is plugged in now.
fn resolve_port(explicit: Option<&str>) -> Option<String> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    match serial_port::find_port() {
        Ok(Some(path)) => Some(path),
        Ok(None) => {
            warn!("No USB serial port found");
            None
        }
        Err(e) => {
            warn!("Listing serial ports: {}", e);
            None
        }
    }
}

fn watch_serial<W: Write>(monitor: &mut Monitor<W>, explicit: Option<&str>, baud: u32) -> Result<()> {
    loop {
        if let Some(path) = resolve_port(explicit) {
            match serial_port::open(&path, baud) {
                Ok(port) => {
                    info!("Connected to {} at {} baud", path, baud);
                    match monitor.drain(&mut LineReader::new(port)) {
                        Ok(()) => warn!("{}: link closed", path),
                        Err(e) => warn!("{}: {}", path, e),
                    }
                    monitor.summary()?;
                }
                Err(e) => warn!("Opening {}: {}", path, e),
            }
        }
        info!("Reconnecting in {} s", RECONNECT_DELAY.as_secs());
        thread::sleep(RECONNECT_DELAY);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let opts = parse_args()?;
    let mut monitor = Monitor {
        out: io::stdout().lock(),
        json: opts.json,
        stats: TelemetryStats::new(),
    };

    match opts.source {
        Source::Stdin => {
            monitor
                .drain(&mut LineReader::new(io::stdin().lock()))
                .context("reading stdin")?;
            monitor.summary()
        }
        Source::Serial(path) => watch_serial(&mut monitor, path.as_deref(), opts.baud),
    }
}
