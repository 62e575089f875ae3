use crate::progress::{Timestamp, UserProgress};

const MINUTE_MS: i64 = 60_000;

/// Adds `minutes` to the adventure time and marks the learner active.
pub fn update_adventure_time(progress: &mut UserProgress, minutes: u32, now: Timestamp) {
    progress.time_spent = progress.time_spent.saturating_add(minutes);
    progress.last_active = Some(now);
}

/// One stay on a page, measured from mount to unmount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageVisit {
    started_at: Timestamp,
}

impl PageVisit {
    pub fn begin(now: Timestamp) -> Self {
        Self { started_at: now }
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Whole minutes to credit for the visit. Stays under a minute count as
    /// zero and the remainder is not carried over to the next visit.
    pub fn minutes_until(&self, now: Timestamp) -> u32 {
        let elapsed = (now - self.started_at).num_milliseconds();
        if elapsed < MINUTE_MS {
            return 0;
        }
        let minutes = (elapsed + MINUTE_MS / 2) / MINUTE_MS;
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}
