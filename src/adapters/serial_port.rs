//! Host side of the serial link: finding the board, opening the port and
//! splitting the byte stream into lines.
//!
//! The board prints at 9600 baud.  Reads use a short timeout so a quiet
//! link shows up as [`LinkRead::Idle`] rather than blocking forever; a
//! partial line is kept across timeouts and completed on a later read.

use std::io::{self, BufRead, BufReader, Read};
use std::time::Duration;

use serialport::SerialPort;

/// Baud rate the firmware's serial console runs at.
pub const DEFAULT_BAUD: u32 = 9600;

/// Per-read timeout on the open port.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Substrings (lowercase) that mark a USB serial adapter or native USB CDC
/// port: macOS `cu.usbmodem*` / `cu.usbserial*`, Linux `ttyACM*` / `ttyUSB*`.
const USB_SERIAL_MARKERS: [&str; 4] = ["usbmodem", "usbserial", "ttyacm", "ttyusb"];

/// Choose the port a board is most likely on.  USB serial names win; any
/// macOS call-out device (`/dev/cu.*`) is the fallback.
pub fn pick_port(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| {
            let name = name.to_lowercase();
            USB_SERIAL_MARKERS.iter().any(|m| name.contains(m))
        })
        .or_else(|| names.iter().find(|name| name.starts_with("/dev/cu.")))
        .map(String::as_str)
}

/// Enumerate the system's serial ports and [`pick_port`] among them.
pub fn find_port() -> serialport::Result<Option<String>> {
    let names: Vec<String> = serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .collect();
    Ok(pick_port(&names).map(str::to_owned))
}

/// Open `path` at `baud` with [`READ_TIMEOUT`].
pub fn open(path: &str, baud: u32) -> serialport::Result<Box<dyn SerialPort>> {
    serialport::new(path, baud).timeout(READ_TIMEOUT).open()
}

/// Result of one [`LineReader::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRead {
    /// A complete line, newline stripped.
    Line(String),
    /// Nothing new yet (read timed out).
    Idle,
    /// End of stream.
    Closed,
}

/// Line splitter that survives read timeouts.
pub struct LineReader<R> {
    inner: BufReader<R>,
    pending: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            pending: Vec::new(),
        }
    }

    /// Read until the next newline, a timeout, or end of stream.  Invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn poll(&mut self) -> io::Result<LinkRead> {
        match self.inner.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(LinkRead::Closed),
            Ok(_) => Ok(LinkRead::Line(self.take_line())),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Ok(LinkRead::Idle)
            }
            Err(e) => Err(e),
        }
    }

    fn take_line(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending)
            .trim_end_matches(['\r', '\n'])
            .to_owned();
        self.pending.clear();
        line
    }
}
