//! ==============================================================================
//! store.rs - the one shared device snapshot
//! ==============================================================================
//!
//! purpose:
//!     holds the current DeviceState. one writer (the update loop), many
//!     readers (every http request).
//!
//! sharing model:
//!     the state is an immutable Arc<DeviceState>. publishing swaps the Arc
//!     under a write lock; reading clones the Arc under a read lock. the lock
//!     is held only for that swap/clone, so a handler keeps its snapshot for
//!     the whole request without blocking the next tick, and can never see
//!     fields from two different ticks.
//!
//! ==============================================================================

use crate::domain::DeviceState;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct SensorStore {
    current: RwLock<Arc<DeviceState>>,
}

impl SensorStore {
    pub fn new(initial: DeviceState) -> Self {
        Self { current: RwLock::new(Arc::new(initial)) }
    }

    /// replace the current snapshot; returns the sequence number it was given
    pub async fn publish(&self, mut state: DeviceState) -> u64 {
        let mut guard = self.current.write().await;
        state.sequence = guard.sequence + 1;
        let sequence = state.sequence;
        *guard = Arc::new(state);
        sequence
    }

    pub async fn current(&self) -> Arc<DeviceState> {
        self.current.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SensorKind, SensorReading};

    /// every field derived from the same marker so a torn read is detectable
    fn marked(marker: u64) -> DeviceState {
        let m = marker as f64;
        DeviceState {
            sequence: 0,
            temperature: SensorReading::present(SensorKind::Temperature, m),
            humidity: SensorReading::present(SensorKind::Humidity, m + 0.5),
            vibration: if marker % 2 == 0 {
                SensorReading::present(SensorKind::Vibration, m)
            } else {
                SensorReading::absent(SensorKind::Vibration)
            },
            device_failed: marker % 3 == 0,
        }
    }

    fn is_consistent(state: &DeviceState) -> bool {
        let Some(t) = state.temperature.value else { return false };
        let marker = t as u64;
        state.humidity.value == Some(t + 0.5)
            && state.vibration.value == (marker % 2 == 0).then_some(t)
            && state.device_failed == (marker % 3 == 0)
    }

    #[tokio::test]
    async fn test_publish_replaces_and_numbers() {
        let store = SensorStore::new(marked(0));
        assert_eq!(store.current().await.sequence, 0);

        assert_eq!(store.publish(marked(7)).await, 1);
        assert_eq!(store.publish(marked(8)).await, 2);

        let now = store.current().await;
        assert_eq!(now.sequence, 2);
        assert_eq!(now.temperature.value, Some(8.0));
    }

    #[tokio::test]
    async fn test_snapshot_survives_publish() {
        let store = SensorStore::new(marked(1));
        let held = store.current().await;
        store.publish(marked(2)).await;

        // a reader keeps the snapshot it took
        assert_eq!(held.temperature.value, Some(1.0));
        assert_eq!(store.current().await.temperature.value, Some(2.0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_torn_reads_under_concurrent_publish() {
        let store = Arc::new(SensorStore::new(marked(0)));

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for marker in 1..=5_000u64 {
                    store.publish(marked(marker)).await;
                    if marker % 64 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let store = store.clone();
            readers.push(tokio::spawn(async move {
                let mut last_seq = 0;
                for _ in 0..5_000 {
                    let snap = store.current().await;
                    assert!(is_consistent(&snap), "torn snapshot: {:?}", snap);
                    assert!(snap.sequence >= last_seq, "sequence went backwards");
                    last_seq = snap.sequence;
                }
            }));
        }

        writer.await.unwrap();
        for r in readers {
            r.await.unwrap();
        }
        assert_eq!(store.current().await.sequence, 5_000);
    }
}
