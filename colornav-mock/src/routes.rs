//! API route table
//!
//! Path templates are matched with a radix tree; `selected-index` shares the
//! `{index}` slot and is told apart by the handler.

use matchit::Router as RadixRouter;
use std::borrow::Cow;

/// Endpoint a request path resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Monitors,
    ColorModes,
    ColorMode,
    CalibrationResults,
    ValidationResults,
    KeyLock,
    PixelInspection,
    Marker,
    SelfCalibration,
    Targets,
}

/// Resolved route with its path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub monitor_id: Option<String>,
    pub index: Option<String>,
    pub result_id: Option<String>,
}

const ROUTES: &[(&str, Route)] = &[
    ("/monitors", Route::Monitors),
    ("/monitors/{monitor_id}/color-modes", Route::ColorModes),
    ("/monitors/{monitor_id}/color-modes/{index}", Route::ColorMode),
    (
        "/monitors/{monitor_id}/color-modes/{index}/target/calibration-results",
        Route::CalibrationResults,
    ),
    (
        "/monitors/{monitor_id}/color-modes/{index}/target/calibration-results/{result_id}/validation-results",
        Route::ValidationResults,
    ),
    ("/monitors/{monitor_id}/key-lock", Route::KeyLock),
    ("/monitors/{monitor_id}/pixel-inspection", Route::PixelInspection),
    ("/monitors/{monitor_id}/pixel-inspection/marker", Route::Marker),
    ("/monitors/{monitor_id}/selfcalibration/execution", Route::SelfCalibration),
    ("/monitors/{monitor_id}/targets", Route::Targets),
];

/// Router over the ColorNavigator API paths
pub struct ApiRouter {
    inner: RadixRouter<Route>,
}

impl ApiRouter {
    pub fn new() -> Self {
        let mut inner = RadixRouter::new();
        for (path, route) in ROUTES {
            if let Err(e) = inner.insert(*path, *route) {
                tracing::warn!("Failed to insert route {}: {}", path, e);
            }
        }
        Self { inner }
    }

    /// Resolve a request path (trailing slash tolerated); path parameters
    /// are percent-decoded
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        let matched = self.inner.at(path).ok()?;
        let param = |name: &str| matched.params.get(name).map(decode);
        Some(RouteMatch {
            route: *matched.value,
            monitor_id: param("monitor_id"),
            index: param("index"),
            result_id: param("result_id"),
        })
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

impl Default for ApiRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_routes() {
        let router = ApiRouter::new();
        assert_eq!(router.resolve("/monitors").unwrap().route, Route::Monitors);

        let matched = router.resolve("/monitors/M1/key-lock").unwrap();
        assert_eq!(matched.route, Route::KeyLock);
        assert_eq!(matched.monitor_id.as_deref(), Some("M1"));
    }

    #[test]
    fn test_nested_result_route() {
        let router = ApiRouter::new();
        let matched = router
            .resolve("/monitors/M1/color-modes/5/target/calibration-results/cr-1/validation-results")
            .unwrap();
        assert_eq!(matched.route, Route::ValidationResults);
        assert_eq!(matched.index.as_deref(), Some("5"));
        assert_eq!(matched.result_id.as_deref(), Some("cr-1"));
    }

    #[test]
    fn test_selected_index_uses_index_slot() {
        let router = ApiRouter::new();
        let matched = router.resolve("/monitors/M1/color-modes/selected-index/").unwrap();
        assert_eq!(matched.route, Route::ColorMode);
        assert_eq!(matched.index.as_deref(), Some("selected-index"));
    }

    #[test]
    fn test_params_are_percent_decoded() {
        let router = ApiRouter::new();
        let matched = router
            .resolve("/monitors/EIZO%20CG2700X/color-modes/5/target/calibration-results/a%2Fb/validation-results")
            .unwrap();
        assert_eq!(matched.route, Route::ValidationResults);
        assert_eq!(matched.monitor_id.as_deref(), Some("EIZO CG2700X"));
        assert_eq!(matched.result_id.as_deref(), Some("a/b"));
    }

    #[test]
    fn test_unknown_route() {
        let router = ApiRouter::new();
        assert!(router.resolve("/monitors/M1/brightness").is_none());
        assert!(router.resolve("/").is_none());
    }
}
