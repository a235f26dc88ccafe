// src/scheduler.rs
use tokio::time::{self, Duration};

use crate::news::NewsFetcher;
use crate::notify::ChatTransport;
use crate::pipeline::NotificationPipeline;
use crate::state::LastSentStore;

/// Drives the pipeline: one cycle immediately at startup, then one per
/// interval. Cycles are awaited serially, so two can never overlap.
pub async fn run<F, T, S>(pipeline: &NotificationPipeline<F, T, S>, interval_secs: u64)
where
    F: NewsFetcher,
    T: ChatTransport,
    S: LastSentStore,
{
    let mut ticker = time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        // The first tick completes immediately.
        ticker.tick().await;
        pipeline.run_cycle().await;
    }
}
