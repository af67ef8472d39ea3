//! Achievement catalog and evaluation.
//!
//! The catalog is seed data: a fixed set of milestone definitions whose
//! live `progress`/`unlocked` state is persisted under the `achievements`
//! key. Evaluation is a pure function of the current counters and the
//! existing catalog -- no hidden state, directly callable from tests.

mod catalog;

pub use catalog::default_catalog;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::Counters;
use crate::storage::{keys, Store};

/// Cosmetic rarity tier. No gameplay effect; high tiers earn a bigger
/// celebration on unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Badge artwork identifier. The original app dispatched on a raw icon
/// string per render; here the variant is fixed at catalog-definition
/// time and the UI maps it to artwork once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Trophy,
    Clock,
    Calendar,
    Fire,
    Star,
    Target,
    Zap,
}

/// Which counter an achievement tracks. Fixed per entry at definition
/// time; `progress` always mirrors the backing counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CompletedSessions,
    FocusTime,
    DailyStreak,
}

impl Metric {
    fn value(self, counters: &Counters) -> u64 {
        match self {
            Metric::CompletedSessions => counters.completed_sessions(),
            Metric::FocusTime => counters.total_focus_secs(),
            Metric::DailyStreak => u64::from(counters.daily_streak()),
        }
    }

    /// Fallback for catalogs stored before `metric` existed: the original
    /// web app resolved the counter from the entry id.
    fn for_id(id: &str) -> Metric {
        match id {
            "one-hour" | "five-hours" | "twenty-hours" => Metric::FocusTime,
            _ if id.starts_with("streak-") => Metric::DailyStreak,
            _ => Metric::CompletedSessions,
        }
    }
}

/// One catalog entry. `unlocked` is a one-way latch: once set it never
/// reverts, whatever the backing counter does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredAchievement")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "icon")]
    pub badge: Badge,
    pub metric: Metric,
    pub target: u64,
    pub progress: u64,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    pub rarity: Rarity,
}

impl Achievement {
    /// Whether an unlock of this entry warrants the celebratory effect.
    pub fn celebration_worthy(&self) -> bool {
        matches!(self.rarity, Rarity::Rare | Rarity::Legendary)
    }
}

/// Wire shape for reading a stored catalog. Tolerates entries written by
/// the original web app: `metric` may be absent (derived from the id) and
/// `unlockedAt` may be epoch milliseconds instead of a timestamp string.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAchievement {
    id: String,
    title: String,
    description: String,
    #[serde(rename = "icon")]
    badge: Badge,
    #[serde(default)]
    metric: Option<Metric>,
    target: u64,
    #[serde(default)]
    progress: u64,
    #[serde(default)]
    unlocked: bool,
    #[serde(default)]
    unlocked_at: Option<UnlockStamp>,
    rarity: Rarity,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UnlockStamp {
    EpochMillis(i64),
    Timestamp(DateTime<Utc>),
}

impl From<StoredAchievement> for Achievement {
    fn from(stored: StoredAchievement) -> Self {
        let metric = stored.metric.unwrap_or_else(|| Metric::for_id(&stored.id));
        let unlocked_at = stored.unlocked_at.and_then(|stamp| match stamp {
            UnlockStamp::EpochMillis(ms) => Utc.timestamp_millis_opt(ms).single(),
            UnlockStamp::Timestamp(at) => Some(at),
        });
        Achievement {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            badge: stored.badge,
            metric,
            target: stored.target,
            progress: stored.progress,
            unlocked: stored.unlocked,
            unlocked_at,
            rarity: stored.rarity,
        }
    }
}

/// Result of one evaluation pass.
#[derive(Debug, Clone)]
pub struct Reevaluation {
    /// The full catalog with refreshed progress and unlock state.
    pub catalog: Vec<Achievement>,
    /// Entries that crossed their threshold during this pass.
    pub newly_unlocked: Vec<Achievement>,
}

impl Reevaluation {
    /// True when the pass changed nothing; the caller skips the write and
    /// any downstream notifications.
    pub fn is_unchanged(&self, previous: &[Achievement]) -> bool {
        self.catalog == previous
    }
}

/// Re-derive the whole catalog from `counters`.
///
/// Pure: identical inputs always produce identical output (modulo the
/// `unlocked_at` stamp taken from `now`). `progress` mirrors the backing
/// counter for every entry, unlocked ones included; only the unlock latch
/// and its stamp are one-way.
pub fn reevaluate(counters: &Counters, catalog: &[Achievement], now: DateTime<Utc>) -> Reevaluation {
    let mut newly_unlocked = Vec::new();
    let catalog = catalog
        .iter()
        .map(|entry| {
            let mut updated = entry.clone();
            updated.progress = entry.metric.value(counters);
            if !entry.unlocked && updated.progress >= entry.target {
                updated.unlocked = true;
                updated.unlocked_at = Some(now);
                newly_unlocked.push(updated.clone());
            }
            updated
        })
        .collect();
    Reevaluation {
        catalog,
        newly_unlocked,
    }
}

/// Load the catalog, reseeding from the defaults when the stored value is
/// absent, corrupt, or empty.
pub fn load_catalog(store: &Store) -> Vec<Achievement> {
    match store.get::<Vec<Achievement>>(keys::ACHIEVEMENTS) {
        Some(catalog) if !catalog.is_empty() => catalog,
        _ => default_catalog(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_mirrors_backing_counter() {
        let mut c = Counters::default();
        c.record_focus_completion(1500);
        c.record_focus_completion(1500);

        let result = reevaluate(&c, &default_catalog(), Utc::now());
        let five = result
            .catalog
            .iter()
            .find(|a| a.id == "five-pomodoros")
            .unwrap();
        assert_eq!(five.progress, 2);
        assert!(!five.unlocked);
    }

    #[test]
    fn crossing_the_threshold_unlocks_once() {
        let mut c = Counters::default();
        c.record_focus_completion(1500);

        let now = Utc::now();
        let first = reevaluate(&c, &default_catalog(), now);
        assert_eq!(first.newly_unlocked.len(), 1);
        assert_eq!(first.newly_unlocked[0].id, "first-pomodoro");
        assert_eq!(first.newly_unlocked[0].unlocked_at, Some(now));

        // A second pass over the same counters unlocks nothing new.
        let second = reevaluate(&c, &first.catalog, Utc::now());
        assert!(second.newly_unlocked.is_empty());
        assert!(second.is_unchanged(&first.catalog));
    }

    #[test]
    fn unlocked_is_a_one_way_latch() {
        let mut c = Counters::default();
        c.record_focus_completion(1500);
        let unlocked = reevaluate(&c, &default_catalog(), Utc::now()).catalog;

        // Evaluate the unlocked catalog against zeroed counters: progress
        // follows the counter down, but the latch must hold and
        // unlocked_at must not be restamped.
        let stamp = unlocked
            .iter()
            .find(|a| a.id == "first-pomodoro")
            .unwrap()
            .unlocked_at;
        let result = reevaluate(&Counters::default(), &unlocked, Utc::now());
        let entry = result
            .catalog
            .iter()
            .find(|a| a.id == "first-pomodoro")
            .unwrap();
        assert!(entry.unlocked);
        assert_eq!(entry.unlocked_at, stamp);
        assert_eq!(entry.progress, 0);
        assert!(result.newly_unlocked.is_empty());
    }

    #[test]
    fn unlocked_entries_keep_mirroring_the_counter() {
        let mut c = Counters::default();
        c.record_focus_completion(1500);
        let unlocked = reevaluate(&c, &default_catalog(), Utc::now());
        let stamp = unlocked
            .catalog
            .iter()
            .find(|a| a.id == "first-pomodoro")
            .unwrap()
            .unlocked_at;

        for _ in 0..4 {
            c.record_focus_completion(1500);
        }
        let result = reevaluate(&c, &unlocked.catalog, Utc::now());
        let first = result
            .catalog
            .iter()
            .find(|a| a.id == "first-pomodoro")
            .unwrap();
        assert!(first.unlocked);
        assert_eq!(first.progress, 5);
        assert_eq!(first.unlocked_at, stamp);
        // Only entries crossing their own threshold report as new.
        let new_ids: Vec<_> = result
            .newly_unlocked
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert!(new_ids.contains(&"five-pomodoros"));
        assert!(!new_ids.contains(&"first-pomodoro"));
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let mut c = Counters::default();
        c.record_focus_completion(1500);
        let catalog = reevaluate(&c, &default_catalog(), Utc::now()).catalog;

        let now = Utc::now();
        let a = reevaluate(&c, &catalog, now);
        let b = reevaluate(&c, &catalog, now);
        assert_eq!(a.catalog, b.catalog);
        assert!(a.is_unchanged(&catalog));
    }

    #[test]
    fn corrupt_stored_catalog_reseeds_defaults() {
        let store = Store::in_memory();
        store.set(keys::ACHIEVEMENTS, &"garbage");
        assert_eq!(load_catalog(&store), default_catalog());

        store.set(keys::ACHIEVEMENTS, &Vec::<Achievement>::new());
        assert_eq!(load_catalog(&store), default_catalog());
    }

    #[test]
    fn stored_catalog_round_trips_with_original_field_names() {
        let store = Store::in_memory();
        let catalog = default_catalog();
        store.set(keys::ACHIEVEMENTS, &catalog);
        assert_eq!(load_catalog(&store), catalog);

        let raw: serde_json::Value = store.get(keys::ACHIEVEMENTS).unwrap();
        let first = &raw.as_array().unwrap()[0];
        assert_eq!(first["icon"], "trophy");
        assert!(first.get("unlockedAt").is_none());
    }

    #[test]
    fn catalog_written_by_the_web_app_rehydrates() {
        let store = Store::in_memory();
        // Entries as the original app serialized them: no `metric`, icon
        // strings, and `unlockedAt` as epoch milliseconds.
        let legacy = serde_json::json!([
            {
                "id": "first-pomodoro",
                "title": "First Steps",
                "description": "Complete your first Pomodoro session",
                "icon": "trophy",
                "unlocked": true,
                "progress": 3,
                "target": 1,
                "unlockedAt": 1_672_575_600_000_i64,
                "rarity": "common"
            },
            {
                "id": "streak-3",
                "title": "Consistency",
                "description": "Maintain a 3-day streak",
                "icon": "calendar",
                "unlocked": false,
                "progress": 2,
                "target": 3,
                "rarity": "common"
            }
        ]);
        store.set(keys::ACHIEVEMENTS, &legacy);

        let catalog = load_catalog(&store);
        assert_eq!(catalog.len(), 2);
        assert!(catalog[0].unlocked);
        assert_eq!(catalog[0].metric, Metric::CompletedSessions);
        assert_eq!(
            catalog[0].unlocked_at.unwrap().timestamp_millis(),
            1_672_575_600_000
        );
        assert_eq!(catalog[1].metric, Metric::DailyStreak);
        assert!(catalog[1].unlocked_at.is_none());
    }

    #[test]
    fn streak_achievements_track_the_daily_streak() {
        use chrono::NaiveDate;

        let mut c = Counters::default();
        c.record_focus_completion(1500);
        for day in ["2023-03-01", "2023-03-02", "2023-03-03"] {
            c.touch_activity(NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap());
        }
        assert_eq!(c.daily_streak(), 3);

        let result = reevaluate(&c, &default_catalog(), Utc::now());
        let three = result.catalog.iter().find(|a| a.id == "streak-3").unwrap();
        assert!(three.unlocked);
        let seven = result.catalog.iter().find(|a| a.id == "streak-7").unwrap();
        assert_eq!(seven.progress, 3);
        assert!(!seven.unlocked);
    }
}
