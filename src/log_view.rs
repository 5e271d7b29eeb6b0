// Ping/uptime history lists. Each load fully replaces the list; fetch errors propagate.

use crate::client::MetricsClient;
use crate::error::ClientError;
use crate::page::SharedPage;
use std::sync::Arc;

#[derive(Clone)]
pub struct LogView {
    client: Arc<MetricsClient>,
    page: SharedPage,
}

impl LogView {
    pub fn new(client: Arc<MetricsClient>, page: SharedPage) -> Self {
        Self { client, page }
    }

    pub async fn load_ping_logs(&self) -> Result<usize, ClientError> {
        let entries = self.client.ping_logs().await?;
        let items: Vec<String> = entries.iter().map(|e| e.render()).collect();
        let n = items.len();
        self.page.write().await.replace_ping_logs(items);
        tracing::debug!(operation = "load_ping_logs", entries = n, "ping log refreshed");
        Ok(n)
    }

    pub async fn load_uptime_logs(&self) -> Result<usize, ClientError> {
        let entries = self.client.uptime_logs().await?;
        let items: Vec<String> = entries.iter().map(|e| e.render()).collect();
        let n = items.len();
        self.page.write().await.replace_uptime_logs(items);
        tracing::debug!(
            operation = "load_uptime_logs",
            entries = n,
            "uptime log refreshed"
        );
        Ok(n)
    }
}
