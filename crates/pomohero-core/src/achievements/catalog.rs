//! The fixed default catalog: ten milestones across three families
//! (session count, accumulated focus time, daily streak).

use super::{Achievement, Badge, Metric, Rarity};

fn entry(
    id: &str,
    title: &str,
    description: &str,
    badge: Badge,
    metric: Metric,
    target: u64,
    rarity: Rarity,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        badge,
        metric,
        target,
        progress: 0,
        unlocked: false,
        unlocked_at: None,
        rarity,
    }
}

/// Seed data for a fresh (or corrupt) `achievements` entry.
pub fn default_catalog() -> Vec<Achievement> {
    use Badge::*;
    use Metric::*;
    use Rarity::*;

    vec![
        entry(
            "first-pomodoro",
            "First Focus",
            "Complete your first Pomodoro session",
            Trophy,
            CompletedSessions,
            1,
            Common,
        ),
        entry(
            "five-pomodoros",
            "Focus Apprentice",
            "Complete 5 Pomodoro sessions",
            Trophy,
            CompletedSessions,
            5,
            Common,
        ),
        entry(
            "twenty-five-pomodoros",
            "Focus Master",
            "Complete 25 Pomodoro sessions",
            Trophy,
            CompletedSessions,
            25,
            Uncommon,
        ),
        entry(
            "one-hundred-pomodoros",
            "Pomodoro Champion",
            "Complete 100 Pomodoro sessions",
            Star,
            CompletedSessions,
            100,
            Rare,
        ),
        entry(
            "one-hour",
            "Hour of Power",
            "Accumulate 1 hour of focus time",
            Clock,
            FocusTime,
            3600,
            Common,
        ),
        entry(
            "five-hours",
            "Deep Worker",
            "Accumulate 5 hours of focus time",
            Clock,
            FocusTime,
            18000,
            Uncommon,
        ),
        entry(
            "twenty-hours",
            "Focus Virtuoso",
            "Accumulate 20 hours of focus time",
            Zap,
            FocusTime,
            72000,
            Rare,
        ),
        entry(
            "streak-3",
            "Consistency is Key",
            "Complete at least one Pomodoro for 3 days in a row",
            Calendar,
            DailyStreak,
            3,
            Common,
        ),
        entry(
            "streak-7",
            "Weekly Warrior",
            "Complete at least one Pomodoro for 7 days in a row",
            Fire,
            DailyStreak,
            7,
            Uncommon,
        ),
        entry(
            "streak-30",
            "Unstoppable",
            "Complete at least one Pomodoro for 30 days in a row",
            Target,
            DailyStreak,
            30,
            Legendary,
        ),
    ]
}
