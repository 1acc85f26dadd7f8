//! ==============================================================================
//! domain.rs - sensor kinds, readings and the device snapshot
//! ==============================================================================
//!
//! purpose:
//!     the plain data the simulator passes around. nothing in here knows about
//!     locks, tasks or http; it is built by simulator.rs, held by store.rs and
//!     turned into wire records by api.rs.
//!
//! ==============================================================================

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::ops::Range;

/// the three simulated sensors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Humidity,
    Vibration,
}

impl SensorKind {
    /// every sensor, in the order reported by /info
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::Vibration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
            SensorKind::Vibration => "vibration",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Humidity => "%",
            SensorKind::Vibration => "mm/s",
        }
    }

    /// half-open range a present value is drawn from
    pub fn range(self) -> Range<f64> {
        match self {
            SensorKind::Temperature => 18.0..30.0,
            SensorKind::Humidity => 30.0..70.0,
            SensorKind::Vibration => 0.0..5.0,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            SensorKind::Temperature => "/temperature",
            SensorKind::Humidity => "/humidity",
            SensorKind::Vibration => "/vibration",
        }
    }
}

/// one sensor's value for one tick
/// `value: None` means the sensor did not report this tick
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReading {
    pub value: Option<f64>,
    pub unit: &'static str,
}

impl SensorReading {
    pub fn present(kind: SensorKind, value: f64) -> Self {
        Self { value: Some(value), unit: kind.unit() }
    }

    pub fn absent(kind: SensorKind) -> Self {
        Self { value: None, unit: kind.unit() }
    }

    /// value with exactly two decimals, e.g. "23.46"
    pub fn formatted_value(&self) -> Option<String> {
        self.value.map(|v| format!("{:.2}", v))
    }
}

/// complete state of the simulated device as of one publish
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceState {
    /// publish counter, 0 for the startup state
    pub sequence: u64,
    pub temperature: SensorReading,
    pub humidity: SensorReading,
    pub vibration: SensorReading,
    pub device_failed: bool,
}

impl DeviceState {
    pub fn reading(&self, kind: SensorKind) -> &SensorReading {
        match kind {
            SensorKind::Temperature => &self.temperature,
            SensorKind::Humidity => &self.humidity,
            SensorKind::Vibration => &self.vibration,
        }
    }
}

/// who this simulator is; fixed for the life of the process
#[derive(Clone, Debug)]
pub struct SimulatorIdentity {
    pub id: String,
    pub start_time: DateTime<Utc>,
}

impl SimulatorIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), start_time: Utc::now() }
    }
}

/// rfc 3339, second precision, always utc
pub fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ==============================================================================
// wire records
// ==============================================================================

/// body of POST /temperature, /humidity, /vibration
#[derive(Debug, Serialize)]
pub struct SensorResponse {
    pub value: Option<String>,
    pub unit: &'static str,
}

impl From<&SensorReading> for SensorResponse {
    fn from(reading: &SensorReading) -> Self {
        Self { value: reading.formatted_value(), unit: reading.unit }
    }
}

/// body of GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// body of GET /info
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub simulator_id: String,
    pub port: String,
    pub sensor_types: Vec<&'static str>,
    pub start_time: String,
}
