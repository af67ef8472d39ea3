//! Session state machine.
//!
//! The engine is a caller-ticked state machine: it owns no thread and no
//! clock. Something outside (normally a [`Ticker`](super::Ticker)) calls
//! `tick()` once per second while the countdown runs; every transition
//! happens synchronously inside these methods.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Idle (completion/reset)
//! ```
//!
//! Remaining time is whole seconds and only ever decreases while running;
//! a mode switch reloads it from the configured duration.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::settings::TimerSettings;

/// The three session modes.
///
/// Serialized with the original app's tags (`pomodoro`, `shortBreak`,
/// `longBreak`) so persisted state stays compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    #[serde(rename = "pomodoro")]
    Focus,
    #[serde(rename = "shortBreak")]
    ShortBreak,
    #[serde(rename = "longBreak")]
    LongBreak,
}

impl TimerMode {
    pub fn is_focus(&self) -> bool {
        matches!(self, TimerMode::Focus)
    }

    /// Display label, as shown by the UI tabs.
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not counting down: freshly loaded, just completed, or just reset.
    Idle,
    Running,
    Paused,
}

/// Core session engine.
///
/// Holds its own copy of [`TimerSettings`]; changing settings mid-session
/// never alters an in-progress countdown (the new durations apply on the
/// next reset or mode switch).
#[derive(Debug, Clone)]
pub struct SessionEngine {
    settings: TimerSettings,
    mode: TimerMode,
    state: TimerState,
    remaining_secs: u32,
}

impl SessionEngine {
    /// Create an engine in Focus mode, idle at the full duration.
    pub fn new(settings: TimerSettings) -> Self {
        let remaining_secs = settings.duration_for(TimerMode::Focus);
        Self {
            settings,
            mode: TimerMode::Focus,
            state: TimerState::Idle,
            remaining_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.settings.duration_for(self.mode)
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Whether a reset would change anything. The UI disables the reset
    /// control when this is false; the engine itself accepts the call
    /// regardless (it is idempotent).
    pub fn can_reset(&self) -> bool {
        self.state != TimerState::Idle || self.remaining_secs != self.total_secs()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin (or resume) the countdown. No-op while already running --
    /// there is never more than one live countdown.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    mode: self.mode,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None,
        }
    }

    /// Stop the countdown, preserving remaining time exactly.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Stop the countdown and restore the current mode's full configured
    /// duration. Resets never count as completions.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs();
        Some(Event::TimerReset {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    /// Move to `mode` (user-initiated): cancels the countdown and loads
    /// the new mode's full duration, paused.
    pub fn switch_mode(&mut self, mode: TimerMode) -> Option<Event> {
        self.mode = mode;
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs();
        Some(Event::ModeChanged {
            mode,
            auto_started: false,
            at: Utc::now(),
        })
    }

    /// Replace the engine's settings. Deliberately leaves the in-progress
    /// countdown untouched; the new durations take effect on the next
    /// reset or mode switch.
    pub fn set_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
    }

    /// One whole-second tick. Only has an effect while running.
    ///
    /// Returns the completed mode exactly once, at the tick where the
    /// remaining time reaches zero; the countdown stops at that instant
    /// and the caller applies the next-mode selection policy.
    pub fn tick(&mut self) -> Option<TimerMode> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = TimerState::Idle;
            return Some(self.mode);
        }
        None
    }

    // ── Next-mode selection policy ───────────────────────────────────

    /// Apply the policy after a Focus completion. `completed_count` is the
    /// updated completed-session counter: every fourth completion earns a
    /// long break.
    pub fn advance_after_focus(&mut self, completed_count: u64) -> Event {
        let mode = if completed_count % 4 == 0 {
            TimerMode::LongBreak
        } else {
            TimerMode::ShortBreak
        };
        self.enter(mode, self.settings.auto_start_breaks)
    }

    /// Apply the policy after a break completion: back to Focus, running
    /// immediately only when auto-start-pomodoros is on.
    pub fn advance_after_break(&mut self) -> Event {
        self.enter(TimerMode::Focus, self.settings.auto_start_pomodoros)
    }

    fn enter(&mut self, mode: TimerMode, auto_start: bool) -> Event {
        self.mode = mode;
        self.remaining_secs = self.total_secs();
        self.state = if auto_start {
            TimerState::Running
        } else {
            TimerState::Idle
        };
        Event::ModeChanged {
            mode,
            auto_started: auto_start,
            at: Utc::now(),
        }
    }
}
