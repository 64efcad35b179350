//! Optional host services used for alerting.
//!
//! Each capability is a trait object the embedding application may or may
//! not provide. A missing capability is skipped. A failing one is logged
//! at `debug` and dropped; neither case reaches the controller's state.

use std::time::Duration;

use tracing::debug;

use crate::error::CapabilityError;
use crate::preset::Preset;

/// One note of an alert chime, relative to the start of the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub offset: Duration,
    pub duration: Duration,
}

const E5: f32 = 660.0;
const C5: f32 = 523.25;

/// "Ding-dong", played twice.
pub const COMPLETION_CHIME: [Tone; 4] = [
    Tone {
        frequency_hz: E5,
        offset: Duration::ZERO,
        duration: Duration::from_millis(1000),
    },
    Tone {
        frequency_hz: C5,
        offset: Duration::from_millis(400),
        duration: Duration::from_millis(1500),
    },
    Tone {
        frequency_hz: E5,
        offset: Duration::from_millis(2000),
        duration: Duration::from_millis(1000),
    },
    Tone {
        frequency_hz: C5,
        offset: Duration::from_millis(2400),
        duration: Duration::from_millis(1500),
    },
];

/// Alternating on/off segments, starting with "on".
pub const COMPLETION_VIBRATION: [Duration; 5] = [
    Duration::from_millis(500),
    Duration::from_millis(200),
    Duration::from_millis(500),
    Duration::from_millis(200),
    Duration::from_millis(1000),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not asked yet.
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn eggs_ready(preset: &Preset) -> Self {
        Self {
            title: "Eggs are ready!".to_string(),
            body: format!(
                "{} eggs are done. Move them to an ice bath right away.",
                preset.name
            ),
        }
    }
}

pub trait ToneSink {
    /// Start playing the sequence. Must not block for its duration.
    fn play(&mut self, tones: &[Tone]) -> Result<(), CapabilityError>;
}

pub trait Vibrator {
    fn vibrate(&mut self, pattern: &[Duration]) -> Result<(), CapabilityError>;
}

pub trait Notifier {
    fn permission(&self) -> Permission;
    fn request_permission(&mut self) -> Result<Permission, CapabilityError>;
    fn notify(&mut self, notification: &Notification) -> Result<(), CapabilityError>;
}

/// Keeps the display (or the machine) from going idle.
pub trait WakeLock {
    fn acquire(&mut self) -> Result<(), CapabilityError>;
    fn release(&mut self) -> Result<(), CapabilityError>;
}

/// The capability set handed to a controller.
#[derive(Default)]
pub struct HostServices {
    pub tones: Option<Box<dyn ToneSink>>,
    pub vibrator: Option<Box<dyn Vibrator>>,
    pub notifier: Option<Box<dyn Notifier>>,
    pub wake_lock: Option<Box<dyn WakeLock>>,
    awake: bool,
}

impl HostServices {
    /// No capabilities at all.
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn with_tones(mut self, tones: impl ToneSink + 'static) -> Self {
        self.tones = Some(Box::new(tones));
        self
    }

    pub fn with_vibrator(mut self, vibrator: impl Vibrator + 'static) -> Self {
        self.vibrator = Some(Box::new(vibrator));
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn with_wake_lock(mut self, wake_lock: impl WakeLock + 'static) -> Self {
        self.wake_lock = Some(Box::new(wake_lock));
        self
    }

    /// Whether a wake lock is currently held.
    pub fn is_awake(&self) -> bool {
        self.awake
    }

    /// Called when the countdown starts running.
    pub(crate) fn on_start(&mut self) {
        if let Some(notifier) = self.notifier.as_mut() {
            if notifier.permission() == Permission::Default {
                match notifier.request_permission() {
                    Ok(permission) => debug!(?permission, "notification permission"),
                    Err(e) => discard("notifier", e),
                }
            }
        }

        if !self.awake {
            if let Some(lock) = self.wake_lock.as_mut() {
                match lock.acquire() {
                    Ok(()) => self.awake = true,
                    Err(e) => discard("wake lock", e),
                }
            }
        }
    }

    /// Called on every transition that stops the countdown.
    pub(crate) fn on_stop(&mut self) {
        if !self.awake {
            return;
        }
        self.awake = false;
        if let Some(lock) = self.wake_lock.as_mut() {
            if let Err(e) = lock.release() {
                discard("wake lock", e);
            }
        }
    }

    /// Fire the completion alerts. Each one is attempted regardless of
    /// how the others fared.
    pub(crate) fn fire_completion(&mut self, preset: &Preset) {
        if let Some(tones) = self.tones.as_mut() {
            if let Err(e) = tones.play(&COMPLETION_CHIME) {
                discard("tones", e);
            }
        }

        if let Some(vibrator) = self.vibrator.as_mut() {
            if let Err(e) = vibrator.vibrate(&COMPLETION_VIBRATION) {
                discard("vibrator", e);
            }
        }

        if let Some(notifier) = self.notifier.as_mut() {
            if notifier.permission() == Permission::Granted {
                if let Err(e) = notifier.notify(&Notification::eggs_ready(preset)) {
                    discard("notifier", e);
                }
            } else {
                debug!("notification skipped: permission not granted");
            }
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("tones", &self.tones.is_some())
            .field("vibrator", &self.vibrator.is_some())
            .field("notifier", &self.notifier.is_some())
            .field("wake_lock", &self.wake_lock.is_some())
            .field("awake", &self.awake)
            .finish()
    }
}

fn discard(capability: &'static str, err: CapabilityError) {
    debug!(capability, error = %err, "host capability failed; ignoring");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct BrokenTones(Log);

    impl ToneSink for BrokenTones {
        fn play(&mut self, _tones: &[Tone]) -> Result<(), CapabilityError> {
            self.0.borrow_mut().push("tones".into());
            Err(CapabilityError::Unavailable("audio"))
        }
    }

    struct Buzz(Log);

    impl Vibrator for Buzz {
        fn vibrate(&mut self, pattern: &[Duration]) -> Result<(), CapabilityError> {
            self.0.borrow_mut().push(format!("vibrate:{}", pattern.len()));
            Ok(())
        }
    }

    struct Desk {
        log: Log,
        permission: Permission,
        grant: bool,
    }

    impl Notifier for Desk {
        fn permission(&self) -> Permission {
            self.permission
        }

        fn request_permission(&mut self) -> Result<Permission, CapabilityError> {
            self.log.borrow_mut().push("request".into());
            self.permission = if self.grant {
                Permission::Granted
            } else {
                Permission::Denied
            };
            Ok(self.permission)
        }

        fn notify(&mut self, notification: &Notification) -> Result<(), CapabilityError> {
            self.log.borrow_mut().push(notification.body.clone());
            Ok(())
        }
    }

    struct Lock(Log);

    impl WakeLock for Lock {
        fn acquire(&mut self) -> Result<(), CapabilityError> {
            self.0.borrow_mut().push("acquire".into());
            Ok(())
        }

        fn release(&mut self) -> Result<(), CapabilityError> {
            self.0.borrow_mut().push("release".into());
            Ok(())
        }
    }

    #[test]
    fn chime_is_two_pairs_of_descending_tones() {
        assert!(COMPLETION_CHIME[0].frequency_hz > COMPLETION_CHIME[1].frequency_hz);
        assert_eq!(COMPLETION_CHIME[0], Tone { offset: Duration::ZERO, ..COMPLETION_CHIME[2] });
        let end = COMPLETION_CHIME
            .iter()
            .map(|t| t.offset + t.duration)
            .max()
            .unwrap();
        assert_eq!(end, Duration::from_millis(3900));
    }

    #[test]
    fn vibration_pattern_matches_alert() {
        let ms: Vec<u128> = COMPLETION_VIBRATION.iter().map(|d| d.as_millis()).collect();
        assert_eq!(ms, vec![500, 200, 500, 200, 1000]);
    }

    #[test]
    fn headless_completion_does_nothing() {
        let mut host = HostServices::headless();
        host.on_start();
        host.fire_completion(preset::default_preset());
        host.on_stop();
        assert!(!host.is_awake());
    }

    #[test]
    fn failing_tone_sink_does_not_block_other_alerts() {
        let log: Log = Rc::default();
        let mut host = HostServices::headless()
            .with_tones(BrokenTones(log.clone()))
            .with_vibrator(Buzz(log.clone()))
            .with_notifier(Desk {
                log: log.clone(),
                permission: Permission::Granted,
                grant: true,
            });

        host.fire_completion(preset::default_preset());

        let log = log.borrow();
        assert_eq!(log[0], "tones");
        assert_eq!(log[1], "vibrate:5");
        assert!(log[2].starts_with("Jammy eggs are done"));
    }

    #[test]
    fn permission_is_requested_once_and_respected() {
        let log: Log = Rc::default();
        let mut host = HostServices::headless().with_notifier(Desk {
            log: log.clone(),
            permission: Permission::Default,
            grant: false,
        });

        host.on_start();
        host.on_start();
        host.fire_completion(preset::default_preset());

        assert_eq!(*log.borrow(), vec!["request".to_string()]);
    }

    #[test]
    fn wake_lock_is_released_only_when_held() {
        let log: Log = Rc::default();
        let mut host = HostServices::headless().with_wake_lock(Lock(log.clone()));

        host.on_stop();
        host.on_start();
        assert!(host.is_awake());
        host.on_start();
        host.on_stop();
        host.on_stop();

        assert_eq!(*log.borrow(), vec!["acquire", "release"]);
    }
}
