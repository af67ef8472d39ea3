//! # Pomohero Core Library
//!
//! Core logic for the Pomohero focus timer: the session state machine,
//! cumulative stats and daily streak, and the achievement catalog, all
//! persisted through a small key-value store. The UI is a thin layer over
//! this crate -- it renders state snapshots and implements the
//! collaborator traits (notifications, audio cues, celebrations).
//!
//! ## Architecture
//!
//! - **Session engine**: a caller-ticked state machine; the session owns
//!   a [`Ticker`] that drives it once per second while a countdown runs
//! - **Storage**: one JSON document of independently keyed entries,
//!   written synchronously on every mutation
//! - **Stats**: completion-derived counters and the consecutive-day streak
//! - **Achievements**: pure re-evaluation of a fixed milestone catalog
//!
//! ## Key Components
//!
//! - [`PomodoroSession`]: the coordinator wiring everything together
//! - [`SessionEngine`]: the timer state machine
//! - [`Store`]: typed persistent key-value access

pub mod achievements;
pub mod effects;
pub mod error;
pub mod events;
pub mod session;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use achievements::{Achievement, Badge, Metric, Rarity};
pub use effects::{Celebrator, CueKind, CuePlayer, Notifier};
pub use error::{CoreError, StorageError};
pub use events::Event;
pub use session::PomodoroSession;
pub use settings::TimerSettings;
pub use stats::Counters;
pub use storage::Store;
pub use tasks::{Task, TaskList};
pub use timer::{SessionEngine, Ticker, TimerMode, TimerState};
