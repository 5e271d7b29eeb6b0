// Bandwidth poller: a fixed-interval recurring task that refreshes dl-speed / ul-speed.
// Each tick's request runs as its own task, so overlapping requests are possible and
// the last response to land wins. A failed tick is logged and the next tick still runs.

use crate::client::MetricsClient;
use crate::error::ClientError;
use crate::models::BandwidthSample;
use crate::page::SharedPage;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval_at};
use tracing::Instrument;

/// Where poll ticks get their numbers from.
pub trait BandwidthSource: Send + Sync + 'static {
    fn sample(&self) -> impl Future<Output = Result<BandwidthSample, ClientError>> + Send;
}

impl BandwidthSource for MetricsClient {
    async fn sample(&self) -> Result<BandwidthSample, ClientError> {
        self.simulate_bandwidth().await
    }
}

pub struct PollerConfig {
    pub interval_ms: u64,
}

/// Owned handle to the running poller. Dropping it also stops the poller.
pub struct PollerHandle {
    shutdown_tx: oneshot::Sender<()>,
    join: tokio::task::JoinHandle<()>,
}

impl PollerHandle {
    /// Stop scheduling ticks. Requests already in flight are left to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, operation = "stop_poller", "poller task failed");
        }
    }
}

/// Start polling. The first tick fires one full interval after start.
pub fn spawn<S: BandwidthSource>(
    source: Arc<S>,
    page: SharedPage,
    config: PollerConfig,
) -> PollerHandle {
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
    let period = Duration::from_millis(config.interval_ms);
    let poller_span =
        tracing::span!(tracing::Level::DEBUG, "poller", interval_ms = config.interval_ms);

    let join = tokio::spawn(async move {
        let mut tick = interval_at(Instant::now() + period, period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    ticks += 1;
                    tokio::spawn(run_tick(source.clone(), page.clone(), ticks));
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!(ticks, "Poller shutting down");
                    break;
                }
            }
        }
    }
    .instrument(poller_span));

    PollerHandle { shutdown_tx, join }
}

/// One poll tick. Returns whether the page was updated.
pub async fn run_tick<S: BandwidthSource>(source: Arc<S>, page: SharedPage, tick: u64) -> bool {
    match source.sample().await {
        Ok(sample) => {
            page.write().await.set_bandwidth(&sample);
            tracing::trace!(
                tick,
                download = sample.download,
                upload = sample.upload,
                "bandwidth updated"
            );
            true
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                operation = "simulate_bandwidth",
                tick,
                "Bandwidth simulation failed"
            );
            false
        }
    }
}
