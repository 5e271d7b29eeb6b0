// User-triggered actions: ping, uptime check, tab switching, initial log load.
// Ping/uptime/log errors are returned to the caller; alerts go to the alert channel.

use crate::alerts::{self, Alert, AlertSender};
use crate::client::MetricsClient;
use crate::error::{ClientError, DashboardError, UiError};
use crate::log_view::LogView;
use crate::models::{PingResult, UptimeResult};
use crate::page::{SharedPage, ids};
use std::sync::Arc;

#[derive(Clone)]
pub struct Dashboard {
    client: Arc<MetricsClient>,
    log_view: LogView,
    page: SharedPage,
    alerts: AlertSender,
}

impl Dashboard {
    pub fn new(client: Arc<MetricsClient>, page: SharedPage, alerts: AlertSender) -> Self {
        let log_view = LogView::new(client.clone(), page.clone());
        Self {
            client,
            log_view,
            page,
            alerts,
        }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Page-ready: load both log lists once. Both loads run; the first error is returned.
    pub async fn on_ready(&self) -> Result<(), ClientError> {
        let (ping, uptime) = futures_util::future::join(
            self.log_view.load_ping_logs(),
            self.log_view.load_uptime_logs(),
        )
        .await;
        ping?;
        uptime?;
        Ok(())
    }

    pub async fn set_input(&self, id: &str, value: impl Into<String>) -> Result<(), UiError> {
        self.page.write().await.set_input(id, value)
    }

    /// Ping whatever is in `ping-target`.
    pub async fn run_ping(&self) -> Result<PingResult, DashboardError> {
        let target = self.page.read().await.input(ids::PING_TARGET)?.to_string();
        Ok(self.ping_target(&target).await?)
    }

    /// Fill `ping-target` with `target` and ping it.
    pub async fn ping(&self, target: &str) -> Result<PingResult, DashboardError> {
        self.set_input(ids::PING_TARGET, target).await?;
        Ok(self.ping_target(target).await?)
    }

    async fn ping_target(&self, target: &str) -> Result<PingResult, ClientError> {
        let result = self.client.ping(target).await?;
        self.page.write().await.set_ping_result(result.render());
        if let Some(alert) = alerts::ping_alert(&result) {
            self.raise(alert);
        }
        self.log_view.load_ping_logs().await?;
        Ok(result)
    }

    /// Check whatever is in `uptime-url`.
    pub async fn run_uptime_check(&self) -> Result<UptimeResult, DashboardError> {
        let url = self.page.read().await.input(ids::UPTIME_URL)?.to_string();
        Ok(self.uptime_for(&url).await?)
    }

    /// Fill `uptime-url` with `url` and check it.
    pub async fn check_uptime(&self, url: &str) -> Result<UptimeResult, DashboardError> {
        self.set_input(ids::UPTIME_URL, url).await?;
        Ok(self.uptime_for(url).await?)
    }

    async fn uptime_for(&self, url: &str) -> Result<UptimeResult, ClientError> {
        let result = self.client.check_uptime(url).await?;
        self.page.write().await.set_uptime_result(&result);
        if let Some(alert) = alerts::uptime_alert(&result) {
            self.raise(alert);
        }
        self.log_view.load_uptime_logs().await?;
        Ok(result)
    }

    /// Show panel `name` and mark `button` (the control that was pressed) active.
    pub async fn open_tab(&self, name: &str, button: &str) -> Result<(), UiError> {
        self.page.write().await.open_tab(name, button)?;
        tracing::debug!(operation = "open_tab", tab = name, button, "tab opened");
        Ok(())
    }

    fn raise(&self, alert: Alert) {
        tracing::info!(%alert, "user alert");
        if self.alerts.send(alert).is_err() {
            tracing::debug!("alert receiver dropped");
        }
    }
}
