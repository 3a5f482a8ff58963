use crate::client::ColorNavigatorClient;
use colornav_core::Result;
use colornav_core::models::{KeyLock, KeyLockSetting};
use reqwest::Method;

impl ColorNavigatorClient {
    /// `GET /monitors/{id}/key-lock`
    pub async fn key_lock(&self, monitor_id: &str) -> Result<KeyLock> {
        let url = self.monitor_endpoint(monitor_id, &["key-lock"]);
        let setting: KeyLockSetting = self.get_json(url).await?;
        Ok(setting.key_lock)
    }

    /// `PUT /monitors/{id}/key-lock`
    pub async fn set_key_lock(&self, monitor_id: &str, key_lock: KeyLock) -> Result<()> {
        let url = self.monitor_endpoint(monitor_id, &["key-lock"]);
        self.send_json(Method::PUT, url, &KeyLockSetting { key_lock }).await?;
        tracing::info!("Changed the key lock setting to {}", key_lock);
        Ok(())
    }
}
