use crate::client::{ColorNavigatorClient, decode};
use colornav_core::models::{CalibrationTarget, TargetList};
use colornav_core::{Error, Result};
use reqwest::Method;
use serde_json::Value;

impl ColorNavigatorClient {
    /// `GET /monitors/{id}/targets`
    pub async fn targets(&self, monitor_id: &str) -> Result<Vec<CalibrationTarget>> {
        let url = self.monitor_endpoint(monitor_id, &["targets"]);
        let list: TargetList = self.get_json(url).await?;
        Ok(list.targets)
    }

    /// `POST /monitors/{id}/targets`
    ///
    /// Returns the created target when the service echoes it back; an empty
    /// 201 body yields `None`.
    pub async fn create_target(
        &self,
        monitor_id: &str,
        definition: &Value,
    ) -> Result<Option<CalibrationTarget>> {
        if !definition.is_object() {
            return Err(Error::InvalidInput(
                "calibration target definition must be a JSON object".to_string(),
            ));
        }
        let url = self.monitor_endpoint(monitor_id, &["targets"]);
        let body = self.send_json(Method::POST, url, definition).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode(&body).map(Some)
    }
}
