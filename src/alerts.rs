// User-facing alerts raised on the success path of ping and uptime checks.
// Distinct from errors: a check that completes can still warrant an alert.

use crate::models::{PingResult, UptimeResult};
use std::fmt;
use tokio::sync::mpsc;

/// Average latency (ms) above which a ping raises an alert.
pub const HIGH_LATENCY_MS: f64 = 500.0;

/// Packet loss (%) above which a ping raises an alert.
pub const HIGH_PACKET_LOSS_PCT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    HighLatency {
        target: String,
        avg_latency: f64,
        packet_loss: f64,
    },
    SiteDown {
        url: String,
    },
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::HighLatency { .. } => f.write_str("High latency or packet loss detected!"),
            Alert::SiteDown { url } => write!(f, "Website {} is DOWN!", url),
        }
    }
}

pub type AlertSender = mpsc::UnboundedSender<Alert>;
pub type AlertReceiver = mpsc::UnboundedReceiver<Alert>;

pub fn channel() -> (AlertSender, AlertReceiver) {
    mpsc::unbounded_channel()
}

/// Alert for a ping result crossing either threshold (strictly greater than).
pub fn ping_alert(result: &PingResult) -> Option<Alert> {
    if result.avg_latency > HIGH_LATENCY_MS || result.packet_loss > HIGH_PACKET_LOSS_PCT {
        Some(Alert::HighLatency {
            target: result.target.clone(),
            avg_latency: result.avg_latency,
            packet_loss: result.packet_loss,
        })
    } else {
        None
    }
}

pub fn uptime_alert(result: &UptimeResult) -> Option<Alert> {
    if result.status.is_online() {
        None
    } else {
        Some(Alert::SiteDown {
            url: result.url.clone(),
        })
    }
}
