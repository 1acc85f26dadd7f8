//! ==============================================================================
//! simulator.rs - the update loop
//! ==============================================================================
//!
//! purpose:
//!     once per tick, redraw every sensor and the device failure flag, then
//!     publish the result to the store as one snapshot.
//!
//! failure model:
//!     six independent draws per tick:
//!     - device failure: bernoulli(0.05)
//!     - per sensor absence: bernoulli(0.10), value ~ uniform(range) if present
//!     a device failure does not touch the sensor draws, and one sensor going
//!     absent does not affect the others.
//!
//! relationships:
//!     - writes: store.rs (publish)
//!     - uses: domain.rs (SensorKind ranges)
//!     - started by: main.rs
//!
//! ==============================================================================

use crate::domain::{DeviceState, SensorKind, SensorReading};
use crate::store::SensorStore;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// failure probabilities per tick
#[derive(Clone, Copy, Debug)]
pub struct FailureModel {
    pub device_failure_prob: f64,
    pub sensor_failure_prob: f64,
}

impl Default for FailureModel {
    fn default() -> Self {
        Self { device_failure_prob: 0.05, sensor_failure_prob: 0.10 }
    }
}

impl FailureModel {
    /// draw one complete tick
    pub fn draw_state<R: Rng + ?Sized>(&self, rng: &mut R) -> DeviceState {
        let device_failed = rng.gen_bool(self.device_failure_prob);
        let mut draw = |kind: SensorKind| {
            if rng.gen_bool(self.sensor_failure_prob) {
                SensorReading::absent(kind)
            } else {
                SensorReading::present(kind, rng.gen_range(kind.range()))
            }
        };

        DeviceState {
            sequence: 0,
            temperature: draw(SensorKind::Temperature),
            humidity: draw(SensorKind::Humidity),
            vibration: draw(SensorKind::Vibration),
            device_failed,
        }
    }
}

/// startup state: every sensor reporting, device up
pub fn initial_state<R: Rng + ?Sized>(rng: &mut R) -> DeviceState {
    let mut present = |kind: SensorKind| SensorReading::present(kind, rng.gen_range(kind.range()));
    DeviceState {
        sequence: 0,
        temperature: present(SensorKind::Temperature),
        humidity: present(SensorKind::Humidity),
        vibration: present(SensorKind::Vibration),
        device_failed: false,
    }
}

/// process-wide generator, seeded once from the wall clock
pub fn seeded_rng() -> StdRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(seed)
}

/// regenerate the device state forever, one tick per `interval`
pub async fn run_update_loop<R>(
    store: Arc<SensorStore>,
    mut rng: R,
    model: FailureModel,
    interval: Duration,
    show_sensor_data: bool,
) where
    R: Rng + Send,
{
    tracing::info!("[SIM] update loop started ({}ms tick)", interval.as_millis());
    loop {
        tokio::time::sleep(interval).await;

        let state = model.draw_state(&mut rng);
        let failed = state.device_failed;
        let summary = show_sensor_data.then(|| summarize(&state));
        let sequence = store.publish(state).await;

        if failed {
            tracing::warn!("[SIM] tick {}: simulating device failure", sequence);
        }
        if let Some(summary) = summary {
            tracing::info!("[SIM] tick {}: {}", sequence, summary);
        } else {
            tracing::debug!("[SIM] tick {} published", sequence);
        }
    }
}

fn summarize(state: &DeviceState) -> String {
    SensorKind::ALL
        .iter()
        .map(|&kind| {
            let value = state.reading(kind).formatted_value();
            format!("{}={}", kind.name(), value.as_deref().unwrap_or("--"))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
