mod engine;
mod ticker;

pub use engine::{SessionEngine, TimerMode, TimerState};
pub use ticker::Ticker;
