//! Background service that snapshots the counters at a fixed interval.

use async_trait::async_trait;
use pingora_core::server::ShutdownWatch;
use pingora_core::services::background::BackgroundService;
use std::sync::Arc;
use std::time::Duration;

use super::StatsCounter;
use crate::constants::STAT_TICK_INTERVAL_MS;

pub struct StatsTicker {
    stats: Arc<StatsCounter>,
    interval: Duration,
}

impl StatsTicker {
    pub fn new(stats: Arc<StatsCounter>) -> Self {
        Self::with_interval(stats, Duration::from_millis(STAT_TICK_INTERVAL_MS))
    }

    pub fn with_interval(stats: Arc<StatsCounter>, interval: Duration) -> Self {
        Self { stats, interval }
    }

    /// Tick until `shutdown` flips to true or its sender is dropped.
    pub async fn run(&self, mut shutdown: ShutdownWatch) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::debug!(
            interval_ms = self.interval.as_millis() as u64,
            period = self.stats.period(),
            "Stats ticker started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Stats ticker stopped");
                        return;
                    }
                }
                _ = ticker.tick() => {
                    self.stats.tick();
                }
            }
        }
    }
}

#[async_trait]
impl BackgroundService for StatsTicker {
    async fn start(&self, shutdown: ShutdownWatch) {
        self.run(shutdown).await;
    }
}
