//! # Eggtimer Core Library
//!
//! Countdown logic for boiling eggs: a fixed catalog of doneness presets
//! and a controller that counts one of them down, firing best-effort
//! alerts when it reaches zero. Rendering lives in the CLI crate.
//!
//! ## Architecture
//!
//! - **Preset catalog**: five constant presets, 2 to 10 minutes
//! - **Countdown controller**: a state machine driven by an injected
//!   one-second tick source; the armed timer is an owned handle that is
//!   cancelled whenever the countdown stops
//! - **Host services**: optional audio, vibration, notification and
//!   keep-awake capabilities, each allowed to be missing or to fail
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CountdownController`]: Core timer state machine
//! - [`HostServices`]: Capability set used for completion alerts
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod host;
pub mod preset;
pub mod storage;
pub mod timer;

pub use error::{CapabilityError, ConfigError, CoreError};
pub use events::Event;
pub use host::{
    HostServices, Notification, Notifier, Permission, Tone, ToneSink, Vibrator, WakeLock,
};
pub use preset::Preset;
pub use storage::Config;
pub use timer::{
    format_clock, CountdownController, IntervalTickSource, ManualTickSource, Tick, TickSource,
    TimerPhase,
};
