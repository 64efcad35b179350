use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerPhase;

/// Every state change of the controller produces an Event.
/// `eggtimer run --json` prints each one as a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PresetSelected {
        preset_id: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        preset_id: String,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        preset_id: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero; the completion alerts have been fired.
    TimerCompleted {
        preset_id: String,
        preset_name: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: TimerPhase,
        preset_id: String,
        preset_name: String,
        remaining_secs: u32,
        total_secs: u32,
        remaining_display: String,
        progress: f64,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_variant_name() {
        let event = Event::TimerPaused {
            remaining_secs: 42,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TimerPaused");
        assert_eq!(json["remaining_secs"], 42);
    }

    #[test]
    fn snapshot_phase_is_lowercase() {
        let event = Event::StateSnapshot {
            phase: TimerPhase::Finished,
            preset_id: "soft-2".into(),
            preset_name: "Soft boiled".into(),
            remaining_secs: 0,
            total_secs: 120,
            remaining_display: "0:00".into(),
            progress: 1.0,
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"phase\":\"finished\""));
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
