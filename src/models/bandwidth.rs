// Bandwidth samples (simulated by the backend)

use serde::{Deserialize, Serialize};

/// One poll tick's figures, in Mbps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandwidthSample {
    pub download: f64,
    pub upload: f64,
}

impl BandwidthSample {
    /// Display text for `dl-speed`, two decimal places.
    pub fn download_text(&self) -> String {
        two_decimals(self.download)
    }

    /// Display text for `ul-speed`, two decimal places.
    pub fn upload_text(&self) -> String {
        two_decimals(self.upload)
    }
}

/// Fixed two-decimal text. Exact ties round away from zero, so 0.125 shows as
/// "0.13" where plain `{:.2}` would give "0.12".
pub fn two_decimals(value: f64) -> String {
    let eighths = value * 8.0;
    // A value halfway between two hundredths is always an odd number of eighths.
    if eighths.fract() == 0.0 && eighths.abs() % 2.0 == 1.0 {
        return format!("{:.2}", (value * 100.0).round() / 100.0);
    }
    format!("{:.2}", value)
}

/// Row of GET /api/bandwidth/history (newest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandwidthHistoryEntry {
    pub time: String,
    pub download: f64,
    pub upload: f64,
}
