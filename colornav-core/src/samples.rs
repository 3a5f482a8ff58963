//! Built-in request bodies used when no JSON file is supplied.

use serde_json::{Value, json};

/// Standard color mode: 100 cd/m², D65, gamma 2.4, BT.709 with clipping.
pub fn color_mode_settings() -> Value {
    json!({
        "enable": true,
        "name": "API_Sample",
        "type": "STANDARD",
        "parameters": {
            "type": "STANDARD",
            "brightness": { "type": "CANDELA", "value": 100 },
            "whitePoint": { "type": "STANDARD", "value": "D65" },
            "gamma": { "type": "GAMMA", "value": 2.4 },
            "gamut": { "type": "STANDARD", "value": "BT_709", "clipping": true }
        }
    })
}

/// Calibration target for Adobe RGB at 6500 K, gamma 2.2.
pub fn calibration_target() -> Value {
    let neutral = json!({ "hue": 0, "saturation": 0, "lightness": 0 });
    json!({
        "name": "API_Target",
        "colorModeName": "CAL_API",
        "parameters": {
            "brightness": { "type": "CANDELA", "value": 100 },
            "blackLevel": { "type": "MIN" },
            "whitePoint": { "type": "TEMPERATURE", "value": 6500 },
            "gamma": { "type": "GAMMA", "value": 2.2 },
            "gamut": { "type": "STANDARD", "value": "ADOBE_RGB", "clipping": false },
            "calibrationPolicy": "GRAY_BALANCE",
            "sixColors": {
                "red": neutral,
                "green": neutral,
                "blue": neutral,
                "cyan": neutral,
                "magenta": neutral,
                "yellow": neutral
            },
            "optimizeForLimited109": false
        },
        "profileUpdateRule": "EVERYTIME",
        "profilePolicy": {
            "profileVersion": "4.2",
            "toneCurve": "LUT",
            "reflectBlackLevel": true
        },
        "useTargetNameAsProfileName": false,
        "protection": false
    })
}
