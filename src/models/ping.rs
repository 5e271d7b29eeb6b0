// Ping check request/response and log rows

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingRequest {
    pub target: String,
}

/// Body of POST /api/ping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PingResponse {
    pub avg_latency: f64,
    pub packet_loss: f64,
}

/// A ping response paired with the target that was sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PingResult {
    pub target: String,
    pub avg_latency: f64,
    pub packet_loss: f64,
}

impl PingResult {
    pub fn new(target: impl Into<String>, response: PingResponse) -> Self {
        Self {
            target: target.into(),
            avg_latency: response.avg_latency,
            packet_loss: response.packet_loss,
        }
    }

    /// Result line for `ping-result`.
    pub fn render(&self) -> String {
        format!(
            "{}: Avg Latency: {} ms | Packet Loss: {}%",
            self.target, self.avg_latency, self.packet_loss
        )
    }
}

/// Row of GET /api/logs/ping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingLogEntry {
    pub time: String,
    pub target: String,
    pub avg: f64,
    pub loss: f64,
}

impl PingLogEntry {
    pub fn render(&self) -> String {
        format!(
            "{}: {} → {}ms, {}% loss",
            self.time, self.target, self.avg, self.loss
        )
    }
}
