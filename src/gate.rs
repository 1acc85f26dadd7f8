//! ==============================================================================
//! gate.rs - whole-device failure check
//! ==============================================================================
//!
//! every handler runs this after the method has been accepted and before it
//! serializes anything. a failed device answers 500 on every endpoint until
//! a later tick clears the flag.
//!
//! ==============================================================================

use crate::domain::DeviceState;
use crate::error::ApiError;

pub fn check(state: &DeviceState) -> Result<(), ApiError> {
    if state.device_failed {
        return Err(ApiError::DeviceFailure);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SensorKind, SensorReading};

    fn state(device_failed: bool) -> DeviceState {
        DeviceState {
            sequence: 1,
            temperature: SensorReading::present(SensorKind::Temperature, 20.0),
            humidity: SensorReading::absent(SensorKind::Humidity),
            vibration: SensorReading::present(SensorKind::Vibration, 1.0),
            device_failed,
        }
    }

    #[test]
    fn test_gate_open_when_device_up() {
        assert_eq!(check(&state(false)), Ok(()));
    }

    #[test]
    fn test_gate_closed_when_device_failed() {
        assert_eq!(check(&state(true)), Err(ApiError::DeviceFailure));
    }
}
