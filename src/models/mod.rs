// Wire and view models for the monitor backend

mod bandwidth;
mod ping;
mod uptime;

pub use bandwidth::{BandwidthHistoryEntry, BandwidthSample, two_decimals};
pub use ping::{PingLogEntry, PingRequest, PingResponse, PingResult};
pub use uptime::{UptimeLogEntry, UptimeRequest, UptimeResult, UptimeStatus};
