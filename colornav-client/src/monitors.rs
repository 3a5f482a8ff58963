use crate::client::ColorNavigatorClient;
use colornav_core::models::{Monitor, MonitorList};
use colornav_core::{Error, Result};

impl ColorNavigatorClient {
    /// `GET /monitors`
    pub async fn monitors(&self) -> Result<Vec<Monitor>> {
        let list: MonitorList = self.get_json(self.endpoint(&["monitors"])).await?;
        Ok(list.monitors)
    }

    /// First entry of `GET /monitors`, the monitor the examples operate on
    pub async fn first_monitor(&self) -> Result<Monitor> {
        self.monitors()
            .await?
            .into_iter()
            .next()
            .ok_or(Error::NoMonitor)
    }
}
