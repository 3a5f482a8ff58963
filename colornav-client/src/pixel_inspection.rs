use crate::client::ColorNavigatorClient;
use colornav_core::Result;
use colornav_core::models::{MarkerRequest, PixelInspection, PixelPosition};
use reqwest::Method;

impl ColorNavigatorClient {
    /// `GET /monitors/{id}/pixel-inspection?x=&y=&show-marker=`
    pub async fn pixel_inspection(
        &self,
        monitor_id: &str,
        position: PixelPosition,
        show_marker: bool,
    ) -> Result<PixelInspection> {
        let url = self.monitor_endpoint(monitor_id, &["pixel-inspection"]);
        let query = [
            ("x", position.x.to_string()),
            ("y", position.y.to_string()),
            ("show-marker", show_marker.to_string()),
        ];
        let body = self
            .execute(self.request(Method::GET, url).query(&query))
            .await?;
        crate::client::decode(&body)
    }

    /// `PUT /monitors/{id}/pixel-inspection/marker`
    pub async fn set_marker(&self, monitor_id: &str, request: MarkerRequest) -> Result<()> {
        let url = self.monitor_endpoint(monitor_id, &["pixel-inspection", "marker"]);
        self.send_json(Method::PUT, url, &request).await?;
        match request.position() {
            Some(position) => tracing::info!("Showing the cross marker at {}", position),
            None => tracing::info!("Hid the cross marker"),
        }
        Ok(())
    }
}
