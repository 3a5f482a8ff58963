//! Mock monitor state

use colornav_core::models::{
    CalibrationResult, CalibrationTarget, ColorMode, ColorModeIndex, ColorModeType, KeyLock,
    MarkerState, Monitor, PixelPosition, ValidationResult,
};
use parking_lot::RwLock;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// State shared between connections
pub type SharedState = Arc<RwLock<MockState>>;

/// Panel resolution of the emulated monitor
pub const PANEL_WIDTH: u32 = 3840;
pub const PANEL_HEIGHT: u32 = 2160;

/// One emulated monitor
#[derive(Debug, Clone)]
pub struct MockMonitor {
    pub info: Monitor,
    /// Always indexed 0..=9
    pub color_modes: Vec<ColorMode>,
    pub key_lock: KeyLock,
    pub marker: MarkerState,
    pub marker_position: Option<PixelPosition>,
    pub selfcalibration_running: bool,
    pub targets: Vec<CalibrationTarget>,
    /// Keyed by color mode index
    pub calibration_results: HashMap<u8, Vec<CalibrationResult>>,
    /// Keyed by calibration result id
    pub validation_results: HashMap<String, Vec<ValidationResult>>,
}

impl MockMonitor {
    /// A monitor with ten enabled Standard color modes and nothing recorded
    pub fn new(id: impl Into<String>, model_name: impl Into<String>, serial_number: impl Into<String>) -> Self {
        let color_modes = ColorModeIndex::all()
            .map(|index| color_mode(index.get(), &format!("Mode {}", index), ColorModeType::Standard))
            .collect::<Vec<_>>();

        let mut monitor = Self {
            info: Monitor {
                id: id.into(),
                model_name: model_name.into(),
                serial_number: serial_number.into(),
                extra: Map::new(),
            },
            color_modes,
            key_lock: KeyLock::Off,
            marker: MarkerState::Hide,
            marker_position: None,
            selfcalibration_running: false,
            targets: Vec::new(),
            calibration_results: HashMap::new(),
            validation_results: HashMap::new(),
        };
        monitor.select(0);
        monitor
    }

    /// A CG2700X with preset Standard modes, three Advanced calibration
    /// slots and one recorded calibration with its validation.
    pub fn demo() -> Self {
        let mut monitor = Self::new("CG2700X-21000001", "CG2700X", "21000001");
        monitor.info.extra = object(json!({ "firmwareVersion": "1.0.2" }));
        let presets = [
            (0, "Adobe RGB", ColorModeType::Standard),
            (1, "sRGB", ColorModeType::Standard),
            (2, "DICOM", ColorModeType::Standard),
            (3, "BT.709", ColorModeType::Standard),
            (4, "BT.2100 PQ", ColorModeType::Standard),
            (5, "CAL1", ColorModeType::Advanced),
            (6, "CAL2", ColorModeType::Advanced),
            (7, "CAL3", ColorModeType::Advanced),
            (8, "SyncSignal", ColorModeType::SyncSignal),
            (9, "User", ColorModeType::Standard),
        ];
        monitor.color_modes = presets
            .iter()
            .map(|(index, name, mode_type)| color_mode(*index, name, mode_type.clone()))
            .collect();
        monitor.color_modes[9].enabled = false;
        monitor.select(0);

        let target = target("target-0001", "Print", "CAL1");
        monitor.color_modes[5]
            .details
            .insert("target".to_string(), to_value(&target));
        monitor.targets.push(target);

        monitor.calibration_results.insert(
            5,
            vec![CalibrationResult {
                id: "calres-0001".to_string(),
                executor: Some("COLORNAVIGATOR".to_string()),
                details: object(json!({
                    "colorNavigatorVersion": "7.1.0",
                    "errorCode": 0,
                    "executedAt": "2026-01-15T09:30:00Z",
                    "sensorInformation": { "name": "EX4", "serialNumber": "S0001" }
                })),
            }],
        );
        monitor.calibration_results.insert(
            6,
            vec![CalibrationResult {
                id: "calres-0002".to_string(),
                executor: Some("SELFCALIBRATION".to_string()),
                details: object(json!({ "errorCode": 0, "executedAt": "2026-02-01T03:00:00Z" })),
            }],
        );
        monitor.validation_results.insert(
            "calres-0001".to_string(),
            vec![ValidationResult {
                id: "valres-0001".to_string(),
                details: object(json!({
                    "statistics": { "averageDeltaE": 0.42, "maximumDeltaE": 1.1 },
                    "isConvertedMeasurementDataUnderD50Illuminant": false,
                    "executedAt": "2026-01-15T09:42:00Z"
                })),
            }],
        );
        monitor
    }

    /// Mark `index` as the only selected color mode
    pub fn select(&mut self, index: u8) {
        for mode in &mut self.color_modes {
            mode.selected = mode.index == index;
        }
    }

    pub fn selected_index(&self) -> Option<u8> {
        self.color_modes.iter().find(|m| m.selected).map(|m| m.index)
    }

    pub fn color_mode_mut(&mut self, index: u8) -> Option<&mut ColorMode> {
        self.color_modes.iter_mut().find(|m| m.index == index)
    }
}

/// All emulated monitors
#[derive(Debug, Clone, Default)]
pub struct MockState {
    pub monitors: Vec<MockMonitor>,
}

impl MockState {
    pub fn new(monitors: Vec<MockMonitor>) -> Self {
        Self { monitors }
    }

    /// One demo monitor
    pub fn demo() -> Self {
        Self::new(vec![MockMonitor::demo()])
    }

    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    pub fn monitor(&self, id: &str) -> Option<&MockMonitor> {
        self.monitors.iter().find(|m| m.info.id == id)
    }

    pub fn monitor_mut(&mut self, id: &str) -> Option<&mut MockMonitor> {
        self.monitors.iter_mut().find(|m| m.info.id == id)
    }
}

fn color_mode(index: u8, name: &str, mode_type: ColorModeType) -> ColorMode {
    let details = match mode_type {
        ColorModeType::Advanced => Map::new(),
        _ => object(json!({
            "parameters": {
                "type": if mode_type == ColorModeType::SyncSignal { "SYNC_SIGNAL" } else { "STANDARD" },
                "brightness": { "type": "CANDELA", "value": 120 },
                "whitePoint": { "type": "STANDARD", "value": "D65" },
                "gamma": { "type": "GAMMA", "value": 2.2 }
            }
        })),
    };
    ColorMode {
        selected: false,
        enabled: true,
        index,
        name: name.to_string(),
        mode_type,
        details,
    }
}

fn target(id: &str, name: &str, color_mode_name: &str) -> CalibrationTarget {
    CalibrationTarget {
        id: Some(id.to_string()),
        name: name.to_string(),
        color_mode_name: color_mode_name.to_string(),
        settings: object(json!({
            "parameters": {
                "brightness": { "type": "CANDELA", "value": 80 },
                "whitePoint": { "type": "TEMPERATURE", "value": 5000 },
                "gamma": { "type": "GAMMA", "value": 2.2 }
            },
            "profileUpdateRule": "EVERYTIME",
            "useTargetNameAsProfileName": false,
            "protection": true
        })),
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_monitor_layout() {
        let monitor = MockMonitor::demo();
        assert_eq!(monitor.color_modes.len(), 10);
        assert_eq!(monitor.selected_index(), Some(0));
        assert!(monitor.color_modes[5].is_advanced());
        assert!(monitor.color_modes[5].details.contains_key("target"));
        assert!(monitor.validation_results.contains_key("calres-0001"));
    }

    #[test]
    fn test_monitor_lookup() {
        let mut state = MockState::new(vec![MockMonitor::demo(), MockMonitor::new("EIZO CS2740", "CS2740", "2")]);
        assert_eq!(state.monitor("EIZO CS2740").map(|m| m.info.serial_number.as_str()), Some("2"));
        assert!(state.monitor("CS2740").is_none());

        state.monitor_mut("CG2700X-21000001").unwrap().key_lock = KeyLock::All;
        assert_eq!(state.monitor("CG2700X-21000001").unwrap().key_lock, KeyLock::All);
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut monitor = MockMonitor::new("m", "CS2400R", "1");
        monitor.select(7);
        assert_eq!(monitor.selected_index(), Some(7));
        assert_eq!(monitor.color_modes.iter().filter(|m| m.selected).count(), 1);
    }
}
