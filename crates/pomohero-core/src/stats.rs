//! Cumulative counters and the daily streak.
//!
//! Counters are derived purely from session-completion events. Completed
//! count and total focus time are monotonically non-decreasing; focus time
//! only ever grows by whole completed focus durations, never by breaks.
//!
//! Each value is persisted under its own key (`completedPomodoros`,
//! `totalFocusTime`, `dailyStreak`, `lastActiveDate`) so a store written
//! by the original app rehydrates directly.

use chrono::NaiveDate;

use crate::storage::{keys, Store};

/// Stored date format. The original app wrote locale-dependent strings;
/// we write ISO dates and treat anything unparseable as a fresh start.
const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counters {
    completed_sessions: u64,
    total_focus_secs: u64,
    daily_streak: u32,
    last_active_date: String,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            completed_sessions: 0,
            total_focus_secs: 0,
            daily_streak: 0,
            last_active_date: String::new(),
        }
    }
}

impl Counters {
    /// Rehydrate from the store; every missing or malformed entry falls
    /// back to its zero value independently.
    pub fn load(store: &Store) -> Self {
        Self {
            completed_sessions: store.get_or(keys::COMPLETED_POMODOROS, 0),
            total_focus_secs: store.get_or(keys::TOTAL_FOCUS_TIME, 0),
            daily_streak: store.get_or(keys::DAILY_STREAK, 0),
            last_active_date: store.get_or(keys::LAST_ACTIVE_DATE, String::new()),
        }
    }

    /// Persist all four entries.
    pub fn save(&self, store: &Store) {
        store.set(keys::COMPLETED_POMODOROS, &self.completed_sessions);
        store.set(keys::TOTAL_FOCUS_TIME, &self.total_focus_secs);
        store.set(keys::DAILY_STREAK, &self.daily_streak);
        store.set(keys::LAST_ACTIVE_DATE, &self.last_active_date);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn completed_sessions(&self) -> u64 {
        self.completed_sessions
    }

    pub fn total_focus_secs(&self) -> u64 {
        self.total_focus_secs
    }

    pub fn daily_streak(&self) -> u32 {
        self.daily_streak
    }

    pub fn last_active_date(&self) -> &str {
        &self.last_active_date
    }

    // ── Updates ──────────────────────────────────────────────────────

    /// Record one completed focus session of `duration_secs`. Returns the
    /// updated completed-session count (the next-mode policy needs it).
    pub fn record_focus_completion(&mut self, duration_secs: u32) -> u64 {
        self.completed_sessions += 1;
        self.total_focus_secs += u64::from(duration_secs);
        self.completed_sessions
    }

    /// Streak update for activity on `today`.
    ///
    /// Policy for the day difference `d` against the stored date:
    /// `d == 0` no-op (already counted today), `d == 1` extends the
    /// streak, anything else -- a gap, a clock that moved backwards, or a
    /// stored date that does not parse -- defensively restarts at 1.
    pub fn touch_activity(&mut self, today: NaiveDate) {
        if self.completed_sessions == 0 {
            return;
        }

        if self.last_active_date.is_empty() {
            self.daily_streak = 1;
            self.last_active_date = today.format(DATE_FMT).to_string();
            return;
        }

        match NaiveDate::parse_from_str(&self.last_active_date, DATE_FMT) {
            Ok(last) => {
                let day_diff = (today - last).num_days();
                if day_diff == 0 {
                    return;
                }
                self.daily_streak = if day_diff == 1 {
                    self.daily_streak + 1
                } else {
                    1
                };
            }
            Err(e) => {
                tracing::warn!(
                    "stored lastActiveDate '{}' does not parse, restarting streak: {e}",
                    self.last_active_date
                );
                self.daily_streak = 1;
            }
        }
        self.last_active_date = today.format(DATE_FMT).to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FMT).unwrap()
    }

    fn active_counters(last: &str, streak: u32) -> Counters {
        Counters {
            completed_sessions: 10,
            total_focus_secs: 15000,
            daily_streak: streak,
            last_active_date: last.to_string(),
        }
    }

    #[test]
    fn focus_completion_grows_both_counters() {
        let mut c = Counters::default();
        assert_eq!(c.record_focus_completion(1500), 1);
        assert_eq!(c.record_focus_completion(1500), 2);
        assert_eq!(c.completed_sessions(), 2);
        assert_eq!(c.total_focus_secs(), 3000);
    }

    #[test]
    fn first_ever_activity_starts_streak_at_one() {
        let mut c = Counters::default();
        c.completed_sessions = 1;
        c.touch_activity(date("2023-01-01"));
        assert_eq!(c.daily_streak(), 1);
        assert_eq!(c.last_active_date(), "2023-01-01");
    }

    #[test]
    fn no_activity_means_no_streak() {
        let mut c = Counters::default();
        c.touch_activity(date("2023-01-01"));
        assert_eq!(c.daily_streak(), 0);
        assert_eq!(c.last_active_date(), "");
    }

    #[test]
    fn consecutive_day_extends_streak() {
        let mut c = active_counters("2023-01-01", 4);
        c.touch_activity(date("2023-01-02"));
        assert_eq!(c.daily_streak(), 5);
        assert_eq!(c.last_active_date(), "2023-01-02");
    }

    #[test]
    fn same_day_is_a_noop() {
        let mut c = active_counters("2023-01-01", 4);
        c.touch_activity(date("2023-01-01"));
        assert_eq!(c.daily_streak(), 4);
    }

    #[test]
    fn gap_resets_streak() {
        let mut c = active_counters("2023-01-01", 4);
        c.touch_activity(date("2023-01-05"));
        assert_eq!(c.daily_streak(), 1);
        assert_eq!(c.last_active_date(), "2023-01-05");
    }

    #[test]
    fn backwards_clock_resets_streak_defensively() {
        let mut c = active_counters("2023-01-10", 4);
        c.touch_activity(date("2023-01-08"));
        assert_eq!(c.daily_streak(), 1);
        assert_eq!(c.last_active_date(), "2023-01-08");
    }

    #[test]
    fn unparseable_stored_date_restarts_instead_of_panicking() {
        let mut c = active_counters("1/2/2023, whatever", 9);
        c.touch_activity(date("2023-01-03"));
        assert_eq!(c.daily_streak(), 1);
        assert_eq!(c.last_active_date(), "2023-01-03");
    }

    #[test]
    fn load_and_save_round_trip_per_key() {
        let store = Store::in_memory();
        let mut c = Counters::load(&store);
        assert_eq!(c, Counters::default());

        c.record_focus_completion(1500);
        c.touch_activity(date("2023-06-01"));
        c.save(&store);

        let reloaded = Counters::load(&store);
        assert_eq!(reloaded, c);
        assert_eq!(store.get::<u64>(keys::COMPLETED_POMODOROS), Some(1));
    }
}
