//! One poll cycle, and the fixed-interval loop around it.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::listing::Listing;
use crate::notify::Notifier;
use crate::page;
use crate::source::PageSource;
use crate::tracker::{NotificationTracker, Phase};

/// What happened during one cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub parsed: usize,
    pub rejected: usize,
    pub valid: usize,
    pub notified: usize,
    pub failed: usize,
}

/// Fetches, classifies, deduplicates and announces listings.
pub struct Watcher<S, N> {
    source: S,
    notifier: N,
    data_centre: String,
    tracker: NotificationTracker,
}

impl<S: PageSource, N: Notifier> Watcher<S, N> {
    pub fn new(source: S, notifier: N, data_centre: &str) -> Self {
        Self {
            source,
            notifier,
            data_centre: data_centre.to_string(),
            tracker: NotificationTracker::new(),
        }
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &NotificationTracker {
        &self.tracker
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run one fetch → parse → classify → dedup → notify pass.
    ///
    /// A fetch error aborts the cycle before the tracker sees anything, so a
    /// failed first poll leaves the tracker in [`Phase::FirstPoll`]. Delivery
    /// errors are counted and logged; the listing stays recorded.
    pub fn run_cycle(&mut self, now: DateTime<Utc>) -> anyhow::Result<CycleReport> {
        let markup = self.source.fetch()?;
        let parsed = page::parse_page(&markup, &self.data_centre)?;

        let mut report = CycleReport {
            parsed: parsed.listings.len(),
            rejected: parsed.rejected.len(),
            ..CycleReport::default()
        };

        let valid: Vec<Listing> = parsed
            .listings
            .into_iter()
            .filter(Listing::is_valid)
            .collect();
        report.valid = valid.len();

        for listing in self.tracker.evaluate(valid) {
            match self.notifier.send(&listing.render(now)) {
                Ok(()) => {
                    tracing::info!(duty = %listing.duty, creator = %listing.creator, "notified");
                    report.notified += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        duty = %listing.duty,
                        creator = %listing.creator,
                        "notification failed: {e:#}"
                    );
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Poll forever, or for `max_cycles` cycles when given.
    ///
    /// Cycles start `interval` apart; a cycle that overruns is followed
    /// immediately by the next one.
    pub fn run(&mut self, interval: Duration, max_cycles: Option<u64>) {
        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            let started = Instant::now();
            let _span = tracing::info_span!("cycle", n = cycle).entered();
            let first_poll = self.tracker.phase() == Phase::FirstPoll;

            match self.run_cycle(Utc::now()) {
                Ok(report) => tracing::info!(
                    parsed = report.parsed,
                    rejected = report.rejected,
                    valid = report.valid,
                    notified = report.notified,
                    failed = report.failed,
                    first_poll,
                    "cycle complete"
                ),
                Err(e) => tracing::warn!(first_poll, "cycle skipped: {e:#}"),
            }

            if max_cycles.is_some_and(|max| cycle >= max) {
                break;
            }

            std::thread::sleep(next_delay(interval, started.elapsed()));
        }
    }
}

/// Time left before the next cycle should start.
pub fn next_delay(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}
