use crate::client::ColorNavigatorClient;
use colornav_core::Result;
use colornav_core::models::{SelfCalibrationAction, SelfCalibrationExecution};
use reqwest::Method;

impl ColorNavigatorClient {
    /// `PUT /monitors/{id}/selfcalibration/execution`
    pub async fn set_selfcalibration(
        &self,
        monitor_id: &str,
        action: SelfCalibrationAction,
    ) -> Result<()> {
        let url = self.monitor_endpoint(monitor_id, &["selfcalibration", "execution"]);
        self.send_json(Method::PUT, url, &SelfCalibrationExecution { action })
            .await?;
        tracing::info!("SelfCalibration {} accepted", action);
        Ok(())
    }
}
