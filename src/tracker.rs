//! Remembers which listings were already announced.

use crate::listing::Listing;

/// Tracker phase. The first poll only seeds history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FirstPoll,
    SteadyState,
}

/// In-memory notification history for one process lifetime.
///
/// `seen` only grows. Listings recorded during the first poll are never
/// announced, so a restart doesn't replay everything already posted.
#[derive(Debug)]
pub struct NotificationTracker {
    seen: Vec<Listing>,
    phase: Phase,
}

impl Default for NotificationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationTracker {
    pub fn new() -> Self {
        Self {
            seen: Vec::new(),
            phase: Phase::FirstPoll,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Listings recorded so far, in the order they were first seen.
    #[cfg(test)]
    pub fn seen(&self) -> &[Listing] {
        &self.seen
    }

    /// Record unseen listings and return the ones to announce.
    ///
    /// Input order is kept. A listing repeated within `fresh` counts once.
    /// After the call the tracker is in [`Phase::SteadyState`].
    pub fn evaluate<I>(&mut self, fresh: I) -> Vec<Listing>
    where
        I: IntoIterator<Item = Listing>,
    {
        let mut notify = Vec::new();

        for listing in fresh {
            if self.seen.contains(&listing) {
                continue;
            }

            match self.phase {
                Phase::FirstPoll => {
                    tracing::info!(listing = %listing, "first poll, not announcing");
                }
                Phase::SteadyState => notify.push(listing.clone()),
            }
            self.seen.push(listing);
        }

        self.phase = Phase::SteadyState;
        notify
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::capture::logs_of;

    fn listing(description: &str) -> Listing {
        Listing {
            duty: "Recollection (Extreme)".into(),
            description: description.into(),
            creator: "Alpha".into(),
            updated: "now".into(),
            slots: vec![],
        }
    }

    #[test]
    fn first_poll_records_without_notifying() {
        let mut tracker = NotificationTracker::new();
        assert_eq!(tracker.phase(), Phase::FirstPoll);

        let notify = tracker.evaluate(vec![listing("6m a"), listing("6m b")]);
        assert!(notify.is_empty());
        assert_eq!(tracker.seen().len(), 2);
        assert_eq!(tracker.phase(), Phase::SteadyState);
    }

    #[test]
    fn first_poll_logs_each_suppressed_listing() {
        let mut tracker = NotificationTracker::new();
        let batch = vec![listing("6m a"), listing("6m b")];
        let (notify, logs) = logs_of(|| tracker.evaluate(batch));

        assert!(notify.is_empty());
        assert_eq!(logs.matches("first poll, not announcing").count(), 2);
        assert!(logs.contains("**Recollection (Extreme)** | Alpha | Updated <t:"));
        assert!(logs.contains("6m a"));
        assert!(logs.contains("6m b"));

        let (_, later) = logs_of(|| tracker.evaluate(vec![listing("6m c")]));
        assert!(!later.contains("first poll"));
    }

    #[test]
    fn empty_first_poll_still_transitions() {
        let mut tracker = NotificationTracker::new();
        assert!(tracker.evaluate(Vec::new()).is_empty());
        assert_eq!(tracker.phase(), Phase::SteadyState);

        assert_eq!(tracker.evaluate(vec![listing("6m a")]), vec![listing("6m a")]);
    }

    #[test]
    fn unchanged_listings_are_not_repeated() {
        let mut tracker = NotificationTracker::new();
        let batch = vec![listing("6m a"), listing("6m b")];
        tracker.evaluate(batch.clone());

        assert!(tracker.evaluate(batch.clone()).is_empty());

        let mut third = batch;
        third.push(listing("6m c"));
        let notify = tracker.evaluate(third);
        assert_eq!(notify, vec![listing("6m c")]);
        assert_eq!(tracker.seen().len(), 3);
    }

    #[test]
    fn refreshed_listing_is_still_seen() {
        let mut tracker = NotificationTracker::new();
        tracker.evaluate(vec![listing("6m a")]);

        let mut refreshed = listing("6m a");
        refreshed.updated = "2 minutes ago".into();
        assert!(tracker.evaluate(vec![refreshed]).is_empty());
    }

    #[test]
    fn duplicates_within_one_batch_notify_once() {
        let mut tracker = NotificationTracker::new();
        tracker.evaluate(Vec::new());

        let notify = tracker.evaluate(vec![listing("6m a"), listing("6m a"), listing("6m b")]);
        assert_eq!(notify, vec![listing("6m a"), listing("6m b")]);
        assert_eq!(tracker.seen().len(), 2);
    }

    #[test]
    fn repeated_evaluation_is_idempotent() {
        let mut tracker = NotificationTracker::new();
        tracker.evaluate(Vec::new());

        let batch = vec![listing("6m a"), listing("6m b")];
        assert_eq!(tracker.evaluate(batch.clone()).len(), 2);
        for _ in 0..3 {
            assert!(tracker.evaluate(batch.clone()).is_empty());
        }
        assert_eq!(tracker.seen(), batch.as_slice());
    }
}
