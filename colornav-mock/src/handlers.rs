//! Mock endpoint handlers
//!
//! Each handler works on the locked state and returns the status and JSON
//! body the real service would send.

use crate::routes::{Route, RouteMatch};
use crate::state::{MockMonitor, MockState, PANEL_HEIGHT, PANEL_WIDTH};
use colornav_core::models::{
    CalibrationTarget, ColorMode, ColorModeIndex, KeyLockSetting, MarkerRequest, MarkerState,
    PixelPosition, SelectedIndex, SelfCalibrationAction, SelfCalibrationExecution,
};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Status and optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Reply {
    fn ok(body: Value) -> Self {
        Self { status: StatusCode::OK, body: Some(body) }
    }

    fn status(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(json!({ "message": message.into() })),
        }
    }
}

type HandlerResult = std::result::Result<Reply, Reply>;

/// Request pieces the handlers need
pub struct Incoming<'a> {
    pub method: &'a Method,
    pub query: Option<&'a str>,
    pub body: &'a [u8],
}

/// Dispatch a resolved route
pub fn dispatch(state: &mut MockState, matched: &RouteMatch, req: &Incoming<'_>) -> Reply {
    let result = match matched.route {
        Route::Monitors => list_monitors(state, req),
        route => match matched.monitor_id.as_deref().and_then(|id| state.monitor_mut(id)) {
            Some(monitor) => monitor_route(monitor, route, matched, req),
            None => Err(Reply::error(StatusCode::NOT_FOUND, "Monitor not found.")),
        },
    };
    result.unwrap_or_else(|reply| reply)
}

fn monitor_route(
    monitor: &mut MockMonitor,
    route: Route,
    matched: &RouteMatch,
    req: &Incoming<'_>,
) -> HandlerResult {
    match route {
        Route::Monitors => Err(Reply::error(StatusCode::NOT_FOUND, "Not Found")),
        Route::ColorModes => color_modes(monitor, req),
        Route::ColorMode if matched.index.as_deref() == Some("selected-index") => {
            select_color_mode(monitor, req)
        }
        Route::ColorMode => color_mode(monitor, parse_index(matched)?, req),
        Route::CalibrationResults => calibration_results(monitor, parse_index(matched)?, req),
        Route::ValidationResults => validation_results(monitor, parse_index(matched)?, matched, req),
        Route::KeyLock => key_lock(monitor, req),
        Route::PixelInspection => pixel_inspection(monitor, req),
        Route::Marker => marker(monitor, req),
        Route::SelfCalibration => selfcalibration(monitor, req),
        Route::Targets => targets(monitor, req),
    }
}

fn list_monitors(state: &MockState, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::GET])?;
    let monitors: Vec<_> = state.monitors.iter().map(|m| &m.info).collect();
    Ok(Reply::ok(json!({ "monitors": monitors })))
}

fn color_modes(monitor: &MockMonitor, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::GET])?;
    Ok(Reply::ok(json!({ "colorModes": monitor.color_modes })))
}

fn select_color_mode(monitor: &mut MockMonitor, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::PUT])?;
    let selected: SelectedIndex = parse_body(req.body)?;
    let index = selected.index.get();
    monitor.select(index);
    tracing::info!("Mock {}: selected color mode {}", monitor.info.id, index);
    Ok(Reply::ok(json!({ "index": index })))
}

fn color_mode(monitor: &mut MockMonitor, index: u8, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::GET, Method::PATCH])?;
    let mode = monitor
        .color_mode_mut(index)
        .ok_or_else(|| Reply::error(StatusCode::NOT_FOUND, "Color mode not found."))?;

    if req.method == Method::GET {
        return Ok(Reply::ok(to_json(&*mode)?));
    }

    let patch: Value = parse_body(req.body)?;
    let Value::Object(fields) = patch else {
        return Err(Reply::error(StatusCode::BAD_REQUEST, "Request body must be a JSON object."));
    };

    let mut merged = to_json(&*mode)?;
    if let Value::Object(current) = &mut merged {
        for (key, value) in fields {
            match key.as_str() {
                // Read-only attributes
                "index" | "selected" => {}
                "enable" => {
                    current.insert("enabled".to_string(), value);
                }
                _ => {
                    current.insert(key, value);
                }
            }
        }
    }
    *mode = serde_json::from_value::<ColorMode>(merged)
        .map_err(|e| Reply::error(StatusCode::BAD_REQUEST, format!("Invalid color mode settings: {}", e)))?;
    tracing::info!("Mock {}: updated color mode {}", monitor.info.id, index);
    Ok(Reply::status(StatusCode::NO_CONTENT))
}

fn calibration_results(monitor: &MockMonitor, index: u8, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::GET])?;
    advanced_mode(monitor, index)?;
    let results = monitor.calibration_results.get(&index).cloned().unwrap_or_default();
    Ok(Reply::ok(json!({ "calibrationResults": results })))
}

fn validation_results(
    monitor: &MockMonitor,
    index: u8,
    matched: &RouteMatch,
    req: &Incoming<'_>,
) -> HandlerResult {
    allow(req, &[Method::GET])?;
    advanced_mode(monitor, index)?;
    let result_id = matched.result_id.as_deref().unwrap_or_default();
    let known = monitor
        .calibration_results
        .get(&index)
        .is_some_and(|results| results.iter().any(|r| r.id == result_id));
    if !known {
        return Err(Reply::error(StatusCode::NOT_FOUND, "Calibration result not found."));
    }
    let results = monitor.validation_results.get(result_id).cloned().unwrap_or_default();
    Ok(Reply::ok(json!({ "validationResults": results })))
}

fn key_lock(monitor: &mut MockMonitor, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::GET, Method::PUT])?;
    if req.method == Method::GET {
        return Ok(Reply::ok(to_json(&KeyLockSetting { key_lock: monitor.key_lock })?));
    }
    let setting: KeyLockSetting = parse_body(req.body)?;
    monitor.key_lock = setting.key_lock;
    tracing::info!("Mock {}: key lock {}", monitor.info.id, setting.key_lock);
    Ok(Reply::status(StatusCode::NO_CONTENT))
}

fn pixel_inspection(monitor: &mut MockMonitor, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::GET])?;
    let x = coordinate(req.query, "x")?;
    let y = coordinate(req.query, "y")?;
    let position = on_panel(PixelPosition { x, y })?;
    let show_marker = match query_param(req.query, "show-marker") {
        None | Some("false") => false,
        Some("true") => true,
        Some(other) => {
            return Err(Reply::error(
                StatusCode::BAD_REQUEST,
                format!("show-marker must be true or false, got '{}'.", other),
            ));
        }
    };
    if show_marker {
        monitor.marker = MarkerState::Show;
        monitor.marker_position = Some(position);
    }

    // Deterministic 10-bit signal derived from the coordinate
    let (r, g, b) = (x % 1024, y % 1024, (x + y) % 1024);
    Ok(Reply::ok(json!({
        "colorFormat": "RGB",
        "hdcp": false,
        "position": position,
        "rawValue": { "red": r, "green": g, "blue": b },
        "convertedRgbFull": { "red": r >> 2, "green": g >> 2, "blue": b >> 2 },
        "marker": monitor.marker,
    })))
}

fn marker(monitor: &mut MockMonitor, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::PUT])?;
    let request: MarkerRequest = parse_body(req.body)?;
    match (request.state(), request.position()) {
        (MarkerState::Show, Some(position)) => {
            monitor.marker_position = Some(on_panel(position)?);
        }
        (MarkerState::Show, None) => {
            return Err(Reply::error(
                StatusCode::BAD_REQUEST,
                "position is required to show the marker.",
            ));
        }
        (MarkerState::Hide, _) => monitor.marker_position = None,
    }
    monitor.marker = request.state();
    tracing::info!("Mock {}: marker {}", monitor.info.id, monitor.marker);
    Ok(Reply::status(StatusCode::NO_CONTENT))
}

fn selfcalibration(monitor: &mut MockMonitor, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::PUT])?;
    let execution: SelfCalibrationExecution = parse_body(req.body)?;
    monitor.selfcalibration_running = execution.action == SelfCalibrationAction::Run;
    tracing::info!("Mock {}: SelfCalibration {}", monitor.info.id, execution.action);
    Ok(Reply::ok(to_json(&execution)?))
}

fn targets(monitor: &mut MockMonitor, req: &Incoming<'_>) -> HandlerResult {
    allow(req, &[Method::GET, Method::POST])?;
    if req.method == Method::GET {
        return Ok(Reply::ok(json!({ "targets": monitor.targets })));
    }
    let mut target: CalibrationTarget = parse_body(req.body)?;
    target.id = Some(uuid::Uuid::new_v4().to_string());
    monitor.targets.push(target.clone());
    tracing::info!("Mock {}: created target {}", monitor.info.id, target.name);
    Ok(Reply {
        status: StatusCode::CREATED,
        body: Some(to_json(&target)?),
    })
}

fn allow(req: &Incoming<'_>, methods: &[Method]) -> std::result::Result<(), Reply> {
    if methods.contains(req.method) {
        Ok(())
    } else {
        Err(Reply::error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"))
    }
}

fn parse_index(matched: &RouteMatch) -> std::result::Result<u8, Reply> {
    matched
        .index
        .as_deref()
        .unwrap_or_default()
        .parse::<ColorModeIndex>()
        .map(ColorModeIndex::get)
        .map_err(|e| Reply::error(StatusCode::BAD_REQUEST, e.to_string()))
}

fn advanced_mode(monitor: &MockMonitor, index: u8) -> std::result::Result<(), Reply> {
    match monitor.color_modes.iter().find(|m| m.index == index) {
        Some(mode) if mode.is_advanced() => Ok(()),
        Some(_) => Err(Reply::error(
            StatusCode::NOT_FOUND,
            "The color mode has no calibration target.",
        )),
        None => Err(Reply::error(StatusCode::NOT_FOUND, "Color mode not found.")),
    }
}

fn on_panel(position: PixelPosition) -> std::result::Result<PixelPosition, Reply> {
    if position.x < PANEL_WIDTH && position.y < PANEL_HEIGHT {
        Ok(position)
    } else {
        Err(Reply::error(
            StatusCode::BAD_REQUEST,
            format!("Coordinate {} is out of the {}x{} panel.", position, PANEL_WIDTH, PANEL_HEIGHT),
        ))
    }
}

fn query_param<'a>(query: Option<&'a str>, key: &str) -> Option<&'a str> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

fn coordinate(query: Option<&str>, key: &str) -> std::result::Result<u32, Reply> {
    let raw = query_param(query, key)
        .ok_or_else(|| Reply::error(StatusCode::BAD_REQUEST, format!("Query parameter '{}' is required.", key)))?;
    raw.parse()
        .map_err(|_| Reply::error(StatusCode::BAD_REQUEST, format!("'{}' is not a valid {} coordinate.", raw, key)))
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> std::result::Result<T, Reply> {
    serde_json::from_slice(body)
        .map_err(|e| Reply::error(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> std::result::Result<Value, Reply> {
    serde_json::to_value(value)
        .map_err(|e| Reply::error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::ApiRouter;

    fn call(state: &mut MockState, method: Method, uri: &str, body: &str) -> Reply {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri, None),
        };
        let matched = ApiRouter::new().resolve(path).expect("route");
        let req = Incoming { method: &method, query, body: body.as_bytes() };
        dispatch(state, &matched, &req)
    }

    const M: &str = "/monitors/CG2700X-21000001";

    #[test]
    fn test_unknown_monitor_is_404() {
        let mut state = MockState::demo();
        let reply = call(&mut state, Method::GET, "/monitors/nope/key-lock", "");
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body.unwrap()["message"], "Monitor not found.");
    }

    #[test]
    fn test_select_color_mode() {
        let mut state = MockState::demo();
        let reply = call(&mut state, Method::PUT, &format!("{M}/color-modes/selected-index"), r#"{"index": 4}"#);
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(state.monitors[0].selected_index(), Some(4));

        let reply = call(&mut state, Method::PUT, &format!("{M}/color-modes/selected-index"), r#"{"index": 12}"#);
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(state.monitors[0].selected_index(), Some(4));
    }

    #[test]
    fn test_patch_maps_enable_and_keeps_index() {
        let mut state = MockState::demo();
        let reply = call(
            &mut state,
            Method::PATCH,
            &format!("{M}/color-modes/9"),
            r#"{"enable": true, "name": "API_Sample", "index": 3}"#,
        );
        assert_eq!(reply.status, StatusCode::NO_CONTENT);
        let mode = &state.monitors[0].color_modes[9];
        assert!(mode.enabled);
        assert_eq!(mode.name, "API_Sample");
        assert_eq!(mode.index, 9);
    }

    #[test]
    fn test_patch_rejects_non_object() {
        let mut state = MockState::demo();
        let reply = call(&mut state, Method::PATCH, &format!("{M}/color-modes/1"), "[1, 2]");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_marker_show_requires_position() {
        let mut state = MockState::demo();
        let reply = call(&mut state, Method::PUT, &format!("{M}/pixel-inspection/marker"), r#"{"marker": "SHOW"}"#);
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(state.monitors[0].marker, MarkerState::Hide);
    }

    #[test]
    fn test_pixel_inspection_query() {
        let mut state = MockState::demo();
        let reply = call(
            &mut state,
            Method::GET,
            &format!("{M}/pixel-inspection?x=100&y=200&show-marker=true"),
            "",
        );
        assert_eq!(reply.status, StatusCode::OK);
        let body = reply.body.unwrap();
        assert_eq!(body["position"], json!({"x": 100, "y": 200}));
        assert_eq!(body["marker"], "SHOW");

        let reply = call(&mut state, Method::GET, &format!("{M}/pixel-inspection?x=5000&y=0"), "");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);

        let reply = call(&mut state, Method::GET, &format!("{M}/pixel-inspection?y=0"), "");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_calibration_results_need_advanced_mode() {
        let mut state = MockState::demo();
        let reply = call(&mut state, Method::GET, &format!("{M}/color-modes/0/target/calibration-results"), "");
        assert_eq!(reply.status, StatusCode::NOT_FOUND);

        let reply = call(&mut state, Method::GET, &format!("{M}/color-modes/5/target/calibration-results"), "");
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body.unwrap()["calibrationResults"][0]["id"], "calres-0001");
    }

    #[test]
    fn test_wrong_method() {
        let mut state = MockState::demo();
        let reply = call(&mut state, Method::DELETE, &format!("{M}/targets"), "");
        assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_create_target_assigns_id() {
        let mut state = MockState::demo();
        let body = colornav_core::samples::calibration_target().to_string();
        let reply = call(&mut state, Method::POST, &format!("{M}/targets"), &body);
        assert_eq!(reply.status, StatusCode::CREATED);
        let id = reply.body.unwrap()["id"].as_str().unwrap().to_string();
        assert_eq!(state.monitors[0].targets.len(), 2);
        assert_ne!(state.monitors[0].targets[0].id.as_deref(), Some(id.as_str()));
    }
}
