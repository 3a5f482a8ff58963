//! ColorNavigator API payloads
//!
//! Only the fields the API documents are typed. Everything else a resource
//! carries is kept in a flattened JSON map so it survives a round trip.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A connected monitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    /// Identifier used in every `/monitors/{id}` path
    pub id: String,
    pub model_name: String,
    pub serial_number: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /monitors`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorList {
    pub monitors: Vec<Monitor>,
}

/// Color mode slot on a monitor (0 to 9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorModeIndex(u8);

impl ColorModeIndex {
    /// Highest color mode index a monitor exposes
    pub const MAX: u8 = 9;

    pub fn new(index: u8) -> Result<Self, Error> {
        Self::try_from(index)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All valid indices in ascending order
    pub fn all() -> impl Iterator<Item = ColorModeIndex> {
        (0..=Self::MAX).map(ColorModeIndex)
    }
}

impl TryFrom<u8> for ColorModeIndex {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index <= Self::MAX {
            Ok(Self(index))
        } else {
            Err(Error::InvalidInput(format!(
                "color mode index {} is out of the range of 0 to {}",
                index,
                Self::MAX
            )))
        }
    }
}

impl From<ColorModeIndex> for u8 {
    fn from(index: ColorModeIndex) -> u8 {
        index.0
    }
}

impl FromStr for ColorModeIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index: u8 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("'{}' is not a color mode index", s)))?;
        Self::try_from(index)
    }
}

impl fmt::Display for ColorModeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color mode type
///
/// Types this client does not know are kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorModeType {
    Standard,
    Advanced,
    SyncSignal,
    Unknown(String),
}

impl ColorModeType {
    pub fn as_str(&self) -> &str {
        match self {
            ColorModeType::Standard => "STANDARD",
            ColorModeType::Advanced => "ADVANCED",
            ColorModeType::SyncSignal => "SYNC_SIGNAL",
            ColorModeType::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ColorModeType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "STANDARD" => ColorModeType::Standard,
            "ADVANCED" => ColorModeType::Advanced,
            "SYNC_SIGNAL" => ColorModeType::SyncSignal,
            _ => ColorModeType::Unknown(raw),
        }
    }
}

impl From<ColorModeType> for String {
    fn from(mode_type: ColorModeType) -> String {
        match mode_type {
            ColorModeType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ColorModeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One color mode of a monitor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorMode {
    pub selected: bool,
    pub enabled: bool,
    pub index: u8,
    pub name: String,
    #[serde(rename = "type")]
    pub mode_type: ColorModeType,
    /// `target` (Advanced) or `parameters` (Standard / SyncSignal), opaque
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ColorMode {
    pub fn is_advanced(&self) -> bool {
        self.mode_type == ColorModeType::Advanced
    }
}

/// `GET /monitors/{id}/color-modes`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorModeList {
    pub color_modes: Vec<ColorMode>,
}

/// `PUT /monitors/{id}/color-modes/selected-index`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SelectedIndex {
    pub index: ColorModeIndex,
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            /// Value as sent on the wire
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(Error::InvalidInput(format!(
                        concat!("'{}' is not a valid ", stringify!($name), " (expected one of: {})"),
                        s,
                        [$($wire),+].join(", ")
                    ))),
                }
            }
        }
    };
}

wire_enum!(
    /// Which physical buttons are locked
    KeyLock { Off => "OFF", Menu => "MENU", All => "ALL" }
);

wire_enum!(
    /// SelfCalibration execution request
    SelfCalibrationAction { Run => "RUN", Stop => "STOP" }
);

wire_enum!(
    /// Pixel inspection cross marker visibility
    MarkerState { Show => "SHOW", Hide => "HIDE" }
);

/// `GET`/`PUT /monitors/{id}/key-lock`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyLockSetting {
    pub key_lock: KeyLock,
}

/// `PUT /monitors/{id}/selfcalibration/execution`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SelfCalibrationExecution {
    pub action: SelfCalibrationAction,
}

/// Pixel coordinate on the monitor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PixelPosition {
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for PixelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// `PUT /monitors/{id}/pixel-inspection/marker`
///
/// Built through [`MarkerRequest::show`] or [`MarkerRequest::hide`] so a
/// `SHOW` request always carries a position and `HIDE` never does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MarkerRequest {
    marker: MarkerState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<PixelPosition>,
}

impl MarkerRequest {
    pub fn show(position: PixelPosition) -> Self {
        Self {
            marker: MarkerState::Show,
            position: Some(position),
        }
    }

    pub fn hide() -> Self {
        Self {
            marker: MarkerState::Hide,
            position: None,
        }
    }

    pub fn state(&self) -> MarkerState {
        self.marker
    }

    pub fn position(&self) -> Option<PixelPosition> {
        self.position
    }
}

/// `GET /monitors/{id}/pixel-inspection`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PixelInspection {
    /// `RGB` or `YCBCR`
    pub color_format: String,
    /// HDCP authentication status of the current input port
    pub hdcp: bool,
    pub position: PixelPosition,
    /// Values received as input signal
    pub raw_value: Value,
    /// Values actually displayed
    pub converted_rgb_full: Value,
    /// Marker visibility, when the server reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerState>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A calibration target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationTarget {
    /// Assigned by the service on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub color_mode_name: String,
    /// parameters, profileUpdateRule, profilePolicy, protection, ...
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

/// `GET /monitors/{id}/targets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetList {
    pub targets: Vec<CalibrationTarget>,
}

/// Recorded outcome of a calibration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalibrationResult {
    pub id: String,
    /// `COLORNAVIGATOR` or `SELFCALIBRATION`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// `GET .../target/calibration-results`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationResultList {
    pub calibration_results: Vec<CalibrationResult>,
}

/// Recorded outcome of a validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub id: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// `GET .../calibration-results/{id}/validation-results`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResultList {
    pub validation_results: Vec<ValidationResult>,
}

/// Body returned alongside 4xx/5xx statuses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_mode_index_range() {
        assert_eq!(ColorModeIndex::new(9).unwrap().get(), 9);
        assert!(ColorModeIndex::new(10).is_err());
        assert!("12".parse::<ColorModeIndex>().is_err());
        assert!("abc".parse::<ColorModeIndex>().is_err());
        assert_eq!(ColorModeIndex::all().count(), 10);
        assert!(serde_json::from_value::<SelectedIndex>(json!({"index": 10})).is_err());
    }

    #[test]
    fn test_selected_index_body() {
        let body = SelectedIndex { index: ColorModeIndex::new(3).unwrap() };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"index": 3}));
    }

    #[test]
    fn test_key_lock_wire_format() {
        let body = KeyLockSetting { key_lock: KeyLock::Menu };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({"keyLock": "MENU"}));
        assert_eq!("all".parse::<KeyLock>().unwrap(), KeyLock::All);
        assert!("partial".parse::<KeyLock>().is_err());
    }

    #[test]
    fn test_marker_hide_omits_position() {
        assert_eq!(
            serde_json::to_value(MarkerRequest::hide()).unwrap(),
            json!({"marker": "HIDE"})
        );
        assert_eq!(
            serde_json::to_value(MarkerRequest::show(PixelPosition { x: 10, y: 20 })).unwrap(),
            json!({"marker": "SHOW", "position": {"x": 10, "y": 20}})
        );
    }

    #[test]
    fn test_color_mode_keeps_opaque_fields() {
        let raw = json!({
            "selected": false,
            "enabled": true,
            "index": 2,
            "name": "Cal",
            "type": "ADVANCED",
            "target": {"id": "t-1", "name": "Print"}
        });
        let mode: ColorMode = serde_json::from_value(raw.clone()).unwrap();
        assert!(mode.is_advanced());
        assert_eq!(mode.details["target"]["id"], "t-1");
        assert_eq!(serde_json::to_value(&mode).unwrap(), raw);
    }

    #[test]
    fn test_unknown_color_mode_type_is_kept_verbatim() {
        let raw = json!({
            "selected": true, "enabled": true, "index": 0, "name": "X", "type": "HDR"
        });
        let mode: ColorMode = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(mode.mode_type, ColorModeType::Unknown("HDR".to_string()));
        assert!(!mode.is_advanced());
        assert_eq!(serde_json::to_value(&mode).unwrap(), raw);

        let sync: ColorModeType = serde_json::from_value(json!("SYNC_SIGNAL")).unwrap();
        assert_eq!(sync, ColorModeType::SyncSignal);
        assert_eq!(serde_json::to_value(sync).unwrap(), json!("SYNC_SIGNAL"));
    }

    #[test]
    fn test_monitor_keeps_undocumented_fields() {
        let raw = json!({
            "id": "m",
            "modelName": "CG",
            "serialNumber": "1",
            "firmwareVersion": "2.0"
        });
        let monitor: Monitor = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(monitor.extra["firmwareVersion"], "2.0");
        assert_eq!(serde_json::to_value(&monitor).unwrap(), raw);
    }

    #[test]
    fn test_target_without_id() {
        let target: CalibrationTarget = serde_json::from_value(json!({
            "name": "API_Target",
            "colorModeName": "CAL_API",
            "protection": false
        }))
        .unwrap();
        assert_eq!(target.id, None);
        assert_eq!(target.settings["protection"], false);
    }
}
