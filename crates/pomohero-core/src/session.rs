//! The session coordinator: wires the engine, counters, catalog, and
//! collaborators together.
//!
//! Data flow per completion tick, synchronously and in order: stop the
//! countdown, play the cue, send the notification, accrue stats (focus
//! only), touch the streak, re-evaluate achievements, then apply the
//! next-mode selection policy. Storage and collaborator failures are
//! absorbed along the way; the state machine always advances.

use chrono::{Local, NaiveDate, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::achievements::{self, Achievement, Rarity};
use crate::effects::{Celebrator, CelebrationIntensity, CueKind, CuePlayer, Notifier, Silent};
use crate::error::Result;
use crate::events::Event;
use crate::settings::TimerSettings;
use crate::stats::Counters;
use crate::storage::{keys, Store};
use crate::timer::{SessionEngine, Ticker, TimerMode};

pub struct PomodoroSession {
    store: Store,
    engine: SessionEngine,
    counters: Counters,
    catalog: Vec<Achievement>,
    notifier: Box<dyn Notifier>,
    cue_player: Box<dyn CuePlayer>,
    celebrator: Box<dyn Celebrator>,
    // The session owns the tick task: every command below reconciles the
    // ticker against the engine state, so a live handle exists exactly
    // while a countdown runs and dies with the session.
    ticker: Ticker,
    tick_tx: Option<UnboundedSender<()>>,
}

impl PomodoroSession {
    /// Rehydrate a session from the store, with silent collaborators.
    pub fn new(store: Store) -> Self {
        Self::with_collaborators(store, Box::new(Silent), Box::new(Silent), Box::new(Silent))
    }

    pub fn with_collaborators(
        store: Store,
        notifier: Box<dyn Notifier>,
        cue_player: Box<dyn CuePlayer>,
        celebrator: Box<dyn Celebrator>,
    ) -> Self {
        let settings = TimerSettings::load(&store);
        let counters = Counters::load(&store);
        let catalog = achievements::load_catalog(&store);
        Self {
            engine: SessionEngine::new(settings),
            store,
            counters,
            catalog,
            notifier,
            cue_player,
            celebrator,
            ticker: Ticker::new(),
            tick_tx: None,
        }
    }

    /// Opt in to session-driven ticking. The returned receiver yields one
    /// unit message per countdown second; the caller feeds each back into
    /// [`tick`](Self::tick). The session starts and cancels the underlying
    /// task as the countdown runs, pauses, resets, or completes without
    /// auto-start. Must be called within a tokio runtime. Without a
    /// subscriber the session never spawns anything and the caller ticks
    /// it directly.
    pub fn subscribe_ticks(&mut self) -> UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.tick_tx = Some(tx);
        self.sync_ticker();
        rx
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn catalog(&self) -> &[Achievement] {
        &self.catalog
    }

    pub fn settings(&self) -> &TimerSettings {
        self.engine.settings()
    }

    // ── Commands (delegated to the engine) ───────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start();
        self.sync_ticker();
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.engine.pause();
        self.sync_ticker();
        event
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.engine.reset();
        self.sync_ticker();
        event
    }

    pub fn switch_mode(&mut self, mode: TimerMode) -> Option<Event> {
        let event = self.engine.switch_mode(mode);
        self.sync_ticker();
        event
    }

    /// Validate, persist, and apply new settings. An in-progress
    /// countdown keeps its remaining time.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidSettings` when a duration is zero; the
    /// previous settings stay in effect.
    pub fn update_settings(&mut self, settings: TimerSettings) -> Result<()> {
        settings.validate()?;
        settings.save(&self.store);
        self.engine.set_settings(settings);
        Ok(())
    }

    /// One whole-second tick. Returns every event the tick produced, in
    /// order; empty while not running.
    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_on(Local::now().date_naive())
    }

    /// `tick` with an explicit calendar date, so streak behavior is
    /// testable without a clock.
    pub fn tick_on(&mut self, today: NaiveDate) -> Vec<Event> {
        let mut events = Vec::new();
        let Some(completed) = self.engine.tick() else {
            self.sync_ticker();
            return events;
        };
        events.push(Event::SessionCompleted {
            mode: completed,
            at: Utc::now(),
        });

        self.play_completion_cue(completed);
        self.send_completion_notification(completed);

        if completed.is_focus() {
            let count = self
                .counters
                .record_focus_completion(self.engine.settings().focus);
            self.counters.touch_activity(today);
            self.counters.save(&self.store);
            events.extend(self.refresh_achievements());
            events.push(self.engine.advance_after_focus(count));
        } else {
            events.push(self.engine.advance_after_break());
        }
        self.sync_ticker();
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Reconcile the tick task with the engine: running with a subscriber
    /// means a live task, anything else means none.
    fn sync_ticker(&mut self) {
        let Some(tx) = &self.tick_tx else {
            return;
        };
        if self.engine.is_running() {
            if !self.ticker.is_active() {
                self.ticker.start(tx.clone());
            }
        } else {
            self.ticker.stop();
        }
    }

    fn play_completion_cue(&self, completed: TimerMode) {
        if !self.engine.settings().sound_enabled {
            return;
        }
        let kind = if completed.is_focus() {
            CueKind::FocusComplete
        } else {
            CueKind::BreakComplete
        };
        self.cue_player.play_cue(kind);
    }

    fn send_completion_notification(&self, completed: TimerMode) {
        if !self.engine.settings().notifications_enabled {
            return;
        }
        if completed.is_focus() {
            self.notifier
                .notify("Pomodoro Completed!", "Great job! Time for a break.");
        } else {
            self.notifier
                .notify("Break Completed!", "Ready to focus again?");
        }
    }

    /// Re-derive the catalog from the counters. Skips the write (and all
    /// downstream notifications) when nothing changed structurally.
    fn refresh_achievements(&mut self) -> Vec<Event> {
        let result = achievements::reevaluate(&self.counters, &self.catalog, Utc::now());
        if result.is_unchanged(&self.catalog) {
            return Vec::new();
        }
        self.store.set(keys::ACHIEVEMENTS, &result.catalog);

        let mut events = Vec::new();
        for unlocked in &result.newly_unlocked {
            self.notifier.notify(
                "Achievement Unlocked!",
                &format!("{} - {}", unlocked.title, unlocked.description),
            );
            if unlocked.celebration_worthy() {
                let intensity = if unlocked.rarity == Rarity::Legendary {
                    CelebrationIntensity::Shower
                } else {
                    CelebrationIntensity::Burst
                };
                self.celebrator.celebrate(intensity);
            }
            events.push(Event::AchievementUnlocked {
                id: unlocked.id.clone(),
                title: unlocked.title.clone(),
                rarity: unlocked.rarity,
                at: Utc::now(),
            });
        }
        self.catalog = result.catalog;
        events
    }
}
