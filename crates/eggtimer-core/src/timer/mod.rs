mod controller;
mod format;
mod ticker;

pub use controller::{CountdownController, TimerPhase};
pub use format::format_clock;
pub use ticker::{IntervalTickSource, ManualTickSource, Tick, TickHandle, TickSource};
