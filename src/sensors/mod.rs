//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! tick.  Readings are raw: no debouncing, no filtering.

pub mod rain;
pub mod switch;

use log::warn;

use rain::RainSensor;
use switch::ManualSwitch;

/// Raw analog input.  `embedded-hal` 1.0 has no ADC trait, so platform
/// adapters implement this for their ADC channel driver.
pub trait AnalogSource {
    type Error: core::fmt::Debug;

    /// One conversion, already scaled to the reported resolution.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

/// A point-in-time snapshot of every input in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Manual close switch engaged.
    pub switch_on: bool,
    /// Rain module reports water on the plate (digital output).
    pub rain_detected: bool,
    /// Rain module analog output.  Higher = drier.
    pub rain_analog: u16,
}

impl SensorSnapshot {
    /// Reading of an idle installation: switch off, dry plate.
    pub const fn idle(adc_max: u16) -> Self {
        Self {
            switch_on: false,
            rain_detected: false,
            rain_analog: adc_max,
        }
    }
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub<S, D, A> {
    pub switch: ManualSwitch<S>,
    pub rain: RainSensor<D, A>,
    last: SensorSnapshot,
}

impl<S, D, A> SensorHub<S, D, A>
where
    S: embedded_hal::digital::InputPin,
    D: embedded_hal::digital::InputPin,
    A: AnalogSource,
{
    /// Construct a new hub.  `adc_max` seeds the fallback reading used
    /// until the first successful analog conversion.
    pub fn new(switch: ManualSwitch<S>, rain: RainSensor<D, A>, adc_max: u16) -> Self {
        Self {
            switch,
            rain,
            last: SensorSnapshot::idle(adc_max),
        }
    }

    /// Read every sensor and return a unified snapshot.
    ///
    /// Individual read failures are logged and the previous good value is
    /// retained.
    pub fn read_all(&mut self) -> SensorSnapshot {
        match self.switch.read() {
            Ok(on) => self.last.switch_on = on,
            Err(e) => warn!("switch: {}, keeping {}", e, self.last.switch_on),
        }
        match self.rain.read_detected() {
            Ok(wet) => self.last.rain_detected = wet,
            Err(e) => warn!("rain digital: {}, keeping {}", e, self.last.rain_detected),
        }
        match self.rain.read_level() {
            Ok(level) => self.last.rain_analog = level,
            Err(e) => warn!("rain analog: {}, keeping {}", e, self.last.rain_analog),
        }
        self.last
    }
}
