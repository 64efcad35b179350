//! Terminal implementations of the core's host capabilities.

mod bell;
mod desktop;
mod inhibit;

pub use bell::TerminalBell;
pub use desktop::DesktopNotifier;
pub use inhibit::InhibitLock;

use eggtimer_core::storage::AlertsConfig;
use eggtimer_core::HostServices;

/// Build the capability set enabled in `alerts`.
pub fn from_config(alerts: &AlertsConfig) -> HostServices {
    let mut host = HostServices::headless();
    if alerts.sound {
        host = host.with_tones(TerminalBell::new());
    }
    // A terminal has no haptics, so the vibration capability stays absent.
    if alerts.notifications {
        host = host.with_notifier(DesktopNotifier::new());
    }
    if alerts.keep_awake {
        host = host.with_wake_lock(InhibitLock::new());
    }
    host
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_alerts_leave_capabilities_absent() {
        let alerts = AlertsConfig {
            sound: false,
            notifications: false,
            keep_awake: false,
        };
        let host = from_config(&alerts);
        assert!(host.tones.is_none());
        assert!(host.vibrator.is_none());
        assert!(host.notifier.is_none());
        assert!(host.wake_lock.is_none());
    }

    #[test]
    fn default_alerts_enable_terminal_capabilities() {
        let host = from_config(&AlertsConfig::default());
        assert!(host.vibrator.is_none());
        assert!(host.tones.is_some());
        assert!(host.notifier.is_some());
        assert!(host.wake_lock.is_some());
    }
}
