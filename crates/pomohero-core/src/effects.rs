//! Collaborator interfaces consumed by the core.
//!
//! The actual notification toast, audio element, and confetti burst live
//! in the UI layer; the core only triggers them. Every call is
//! fire-and-forget and infallible from the core's point of view --
//! implementations handle (and log) their own failures, which must never
//! interrupt a timer transition.

use serde::{Deserialize, Serialize};

/// Which cue to play on a session completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    FocusComplete,
    BreakComplete,
}

/// How big a celebration to render for a high-rarity unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationIntensity {
    /// Rare unlocks.
    Burst,
    /// Legendary unlocks.
    Shower,
}

/// Best-effort user notification, permission-gated in the UI layer.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// Plays the completion sound cue.
pub trait CuePlayer {
    fn play_cue(&self, kind: CueKind);
}

/// Cosmetic celebratory effect for rare/legendary unlocks.
pub trait Celebrator {
    fn celebrate(&self, intensity: CelebrationIntensity);
}

/// No-op implementation of all three collaborator traits; the default
/// until the UI wires in real ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _title: &str, _body: &str) {}
}

impl CuePlayer for Silent {
    fn play_cue(&self, _kind: CueKind) {}
}

impl Celebrator for Silent {
    fn celebrate(&self, _intensity: CelebrationIntensity) {}
}
