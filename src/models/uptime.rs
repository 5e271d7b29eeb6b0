// Uptime check request/response and log rows

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UptimeRequest {
    pub url: String,
}

/// Site status reported by the backend; serializes as "Online" / "Offline".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UptimeStatus {
    Online,
    Offline,
}

impl UptimeStatus {
    pub fn is_online(self) -> bool {
        self == UptimeStatus::Online
    }
}

impl fmt::Display for UptimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UptimeStatus::Online => f.write_str("Online"),
            UptimeStatus::Offline => f.write_str("Offline"),
        }
    }
}

/// Body of POST /api/uptime. `url` is echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptimeResult {
    pub url: String,
    pub status: UptimeStatus,
}

/// Row of GET /api/logs/uptime. Status is kept as the backend's raw string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptimeLogEntry {
    pub time: String,
    pub url: String,
    pub status: String,
}

impl UptimeLogEntry {
    pub fn render(&self) -> String {
        format!("{}: {} → {}", self.time, self.url, self.status)
    }
}
