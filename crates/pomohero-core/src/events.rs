use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::Rarity;
use crate::timer::{TimerMode, TimerState};

/// Every state change in the system produces an Event.
/// The UI consumes these to update the display; collaborators
/// (notifications, audio cues, celebrations) are driven from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        /// Seconds on the countdown as it starts: the full duration on a
        /// fresh start, what was left on a resume from pause.
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    /// The machine moved to a new mode, either by user action or by the
    /// next-mode selection policy after a completion.
    ModeChanged {
        mode: TimerMode,
        auto_started: bool,
        at: DateTime<Utc>,
    },
    /// A running session reached zero remaining time. Emitted exactly
    /// once per completion; manual resets never produce this.
    SessionCompleted {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        id: String,
        title: String,
        rarity: Rarity,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        mode: TimerMode,
        remaining_secs: u32,
        total_secs: u32,
        at: DateTime<Utc>,
    },
}
