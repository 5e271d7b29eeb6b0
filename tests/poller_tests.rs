// Poller on tokio's paused clock with a fake bandwidth source

use netdash::error::ClientError;
use netdash::models::BandwidthSample;
use netdash::page::{Page, SharedPage};
use netdash::poller::{self, BandwidthSource, PollerConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::Duration;

/// Fails the first `fail_first` calls, then returns `50.456 + n` / `10.0 + n`.
/// Each call takes `delay` on the (paused) clock.
struct FakeSource {
    started: AtomicUsize,
    completed: AtomicUsize,
    fail_first: usize,
    delay: Duration,
}

impl FakeSource {
    fn new(fail_first: usize, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            fail_first,
            delay,
        })
    }

    fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl BandwidthSource for FakeSource {
    async fn sample(&self) -> Result<BandwidthSample, ClientError> {
        let n = self.started.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        if n <= self.fail_first {
            let err = serde_json::from_str::<BandwidthSample>("connection reset").unwrap_err();
            return Err(ClientError::Parse(err));
        }
        Ok(BandwidthSample {
            download: 50.456 + n as f64,
            upload: 10.0 + n as f64,
        })
    }
}

fn page() -> SharedPage {
    Page::new(&["ping", "uptime"]).into_shared()
}

/// Let spawned tick tasks run to completion on the current-thread runtime.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_waits_one_interval() {
    let source = FakeSource::new(0, Duration::ZERO);
    let page = page();
    let handle = poller::spawn(source.clone(), page.clone(), PollerConfig { interval_ms: 2000 });

    tokio::time::sleep(Duration::from_millis(1999)).await;
    settle().await;
    assert_eq!(source.started(), 0);
    assert_eq!(page.read().await.dl_speed(), "");

    tokio::time::sleep(Duration::from_millis(2)).await;
    settle().await;
    assert_eq!(source.started(), 1);
    assert_eq!(page.read().await.dl_speed(), "51.46");
    assert_eq!(page.read().await.ul_speed(), "11.00");

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_polling_continues_after_failed_tick() {
    let source = FakeSource::new(1, Duration::ZERO);
    let page = page();
    let handle = poller::spawn(source.clone(), page.clone(), PollerConfig { interval_ms: 2000 });

    tokio::time::sleep(Duration::from_millis(2001)).await;
    settle().await;
    assert_eq!(source.started(), 1);
    assert_eq!(page.read().await.dl_speed(), "", "failed tick leaves page as is");

    tokio::time::sleep(Duration::from_millis(4000)).await;
    settle().await;
    assert_eq!(source.started(), 3);
    assert_eq!(page.read().await.dl_speed(), "53.46");

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_tick_keeps_last_good_values() {
    struct AlternatingSource(AtomicUsize);
    impl BandwidthSource for AlternatingSource {
        async fn sample(&self) -> Result<BandwidthSample, ClientError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            if n % 2 == 1 {
                let err = serde_json::from_str::<BandwidthSample>("{").unwrap_err();
                return Err(ClientError::Parse(err));
            }
            Ok(BandwidthSample {
                download: 75.0 + n as f64,
                upload: 20.0,
            })
        }
    }

    let source = Arc::new(AlternatingSource(AtomicUsize::new(0)));
    let page = page();
    let handle = poller::spawn(source.clone(), page.clone(), PollerConfig { interval_ms: 2000 });

    tokio::time::sleep(Duration::from_millis(4001)).await;
    settle().await;
    assert_eq!(source.0.load(Ordering::SeqCst), 2);
    assert_eq!(page.read().await.dl_speed(), "75.00");

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_slow_response_does_not_delay_next_tick() {
    let source = FakeSource::new(0, Duration::from_millis(5000));
    let page = page();
    let handle = poller::spawn(source.clone(), page.clone(), PollerConfig { interval_ms: 2000 });

    tokio::time::sleep(Duration::from_millis(6001)).await;
    settle().await;
    assert_eq!(source.started(), 3, "ticks keep firing while requests are in flight");
    assert_eq!(source.completed(), 0);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    settle().await;
    assert_eq!(source.completed(), 1);
    assert_eq!(page.read().await.dl_speed(), "51.46");

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_ends_ticking() {
    let source = FakeSource::new(0, Duration::ZERO);
    let handle = poller::spawn(source.clone(), page(), PollerConfig { interval_ms: 2000 });

    tokio::time::sleep(Duration::from_millis(2001)).await;
    settle().await;
    assert_eq!(source.started(), 1);

    handle.stop().await;
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    settle().await;
    assert_eq!(source.started(), 1);
}

#[tokio::test]
async fn test_run_tick_reports_outcome() {
    let page = page();
    assert!(!poller::run_tick(FakeSource::new(1, Duration::ZERO), page.clone(), 1).await);
    assert!(poller::run_tick(FakeSource::new(0, Duration::ZERO), page.clone(), 2).await);
    assert_eq!(page.read().await.dl_speed(), "51.46");
}
