//! Timer configuration.
//!
//! Stored under the `pomodoroSettings` key as a single JSON object, using
//! the field names the original web app wrote so an existing store loads
//! unchanged. Mutations go through [`TimerSettings::save`] and persist
//! immediately.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::storage::{keys, Store};
use crate::timer::TimerMode;

/// User-facing timer settings. All durations are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    /// Focus session duration.
    #[serde(rename = "pomodoro", default = "default_focus")]
    pub focus: u32,
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    #[serde(default = "default_long_break")]
    pub long_break: u32,
    /// Start break countdowns immediately after a focus completion.
    #[serde(default)]
    pub auto_start_breaks: bool,
    /// Start the next focus countdown immediately after a break completion.
    #[serde(default)]
    pub auto_start_pomodoros: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default)]
    pub ambient_sound_enabled: bool,
    #[serde(default)]
    pub notifications_enabled: bool,
}

fn default_focus() -> u32 {
    25 * 60
}
fn default_short_break() -> u32 {
    5 * 60
}
fn default_long_break() -> u32 {
    15 * 60
}
fn default_true() -> bool {
    true
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus: default_focus(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            sound_enabled: true,
            ambient_sound_enabled: false,
            notifications_enabled: false,
        }
    }
}

impl TimerSettings {
    /// Load from the store, falling back to defaults for an absent,
    /// malformed, or invalid entry. A hand-edited store can hold a zero
    /// duration that deserializes fine; rehydrating it would make every
    /// tick a completion, so it is rejected here too.
    pub fn load(store: &Store) -> Self {
        let settings = store.get_or(keys::SETTINGS, Self::default());
        match settings.validate() {
            Ok(()) => settings,
            Err(err) => {
                tracing::warn!("stored settings rejected, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Persist immediately.
    pub fn save(&self, store: &Store) {
        store.set(keys::SETTINGS, self);
    }

    /// All durations must be strictly positive.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidSettings` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("pomodoro", self.focus),
            ("shortBreak", self.short_break),
            ("longBreak", self.long_break),
        ] {
            if value == 0 {
                return Err(CoreError::InvalidSettings {
                    field,
                    message: "duration must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Configured duration for `mode`, in seconds.
    pub fn duration_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }
}
