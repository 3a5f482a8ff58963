//! Color mode, calibration result and validation result endpoints

use crate::client::ColorNavigatorClient;
use colornav_core::models::{
    CalibrationResult, CalibrationResultList, ColorMode, ColorModeIndex, ColorModeList,
    SelectedIndex, ValidationResult, ValidationResultList,
};
use colornav_core::{Error, Result};
use reqwest::Method;
use serde_json::Value;

impl ColorNavigatorClient {
    /// `GET /monitors/{id}/color-modes`
    pub async fn color_modes(&self, monitor_id: &str) -> Result<Vec<ColorMode>> {
        let url = self.monitor_endpoint(monitor_id, &["color-modes"]);
        let list: ColorModeList = self.get_json(url).await?;
        Ok(list.color_modes)
    }

    /// `PUT /monitors/{id}/color-modes/selected-index`
    pub async fn select_color_mode(&self, monitor_id: &str, index: ColorModeIndex) -> Result<()> {
        let url = self.monitor_endpoint(monitor_id, &["color-modes", "selected-index"]);
        self.send_json(Method::PUT, url, &SelectedIndex { index }).await?;
        tracing::info!("Changed the color mode index to {}", index);
        Ok(())
    }

    /// `GET /monitors/{id}/color-modes/{index}`
    pub async fn color_mode(&self, monitor_id: &str, index: ColorModeIndex) -> Result<ColorMode> {
        let index = index.to_string();
        let url = self.monitor_endpoint(monitor_id, &["color-modes", &index]);
        self.get_json(url).await
    }

    /// `PATCH /monitors/{id}/color-modes/{index}`
    ///
    /// `settings` is sent as-is; only the fields present are changed.
    pub async fn update_color_mode(
        &self,
        monitor_id: &str,
        index: ColorModeIndex,
        settings: &Value,
    ) -> Result<()> {
        if !settings.is_object() {
            return Err(Error::InvalidInput(
                "color mode settings must be a JSON object".to_string(),
            ));
        }
        let segment = index.to_string();
        let url = self.monitor_endpoint(monitor_id, &["color-modes", &segment]);
        self.send_json(Method::PATCH, url, settings).await?;
        tracing::info!("Changed color mode {} settings", index);
        Ok(())
    }

    /// `GET .../color-modes/{index}/target/calibration-results`
    pub async fn calibration_results(
        &self,
        monitor_id: &str,
        index: ColorModeIndex,
    ) -> Result<Vec<CalibrationResult>> {
        let index = index.to_string();
        let url = self.monitor_endpoint(
            monitor_id,
            &["color-modes", &index, "target", "calibration-results"],
        );
        let list: CalibrationResultList = self.get_json(url).await?;
        Ok(list.calibration_results)
    }

    /// `GET .../calibration-results/{calibration_result_id}/validation-results`
    pub async fn validation_results(
        &self,
        monitor_id: &str,
        index: ColorModeIndex,
        calibration_result_id: &str,
    ) -> Result<Vec<ValidationResult>> {
        let index = index.to_string();
        let url = self.monitor_endpoint(
            monitor_id,
            &[
                "color-modes",
                &index,
                "target",
                "calibration-results",
                calibration_result_id,
                "validation-results",
            ],
        );
        let list: ValidationResultList = self.get_json(url).await?;
        Ok(list.validation_results)
    }
}
