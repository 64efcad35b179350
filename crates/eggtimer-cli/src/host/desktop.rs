use eggtimer_core::error::CapabilityError;
use eggtimer_core::{Notification, Notifier, Permission};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    NotifyRust,
    LogOnly,
}

/// Desktop notifications through notify-rust.
///
/// Desktop notification daemons have no permission prompt, so asking for
/// permission simply grants it. If showing a notification fails once, the
/// notifier downgrades to logging.
#[derive(Debug)]
pub struct DesktopNotifier {
    backend: Backend,
    permission: Permission,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopNotifier {
    pub fn new() -> Self {
        debug!("DesktopNotifier created: using notify-rust backend initially");
        Self {
            backend: Backend::NotifyRust,
            permission: Permission::Default,
        }
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Result<Permission, CapabilityError> {
        self.permission = Permission::Granted;
        Ok(self.permission)
    }

    fn notify(&mut self, notification: &Notification) -> Result<(), CapabilityError> {
        match self.backend {
            Backend::NotifyRust => {
                let shown = notify_rust::Notification::new()
                    .appname("eggtimer")
                    .summary(&notification.title)
                    .body(&notification.body)
                    .timeout(notify_rust::Timeout::Never)
                    .show();
                match shown {
                    Ok(_) => Ok(()),
                    Err(e) => {
                        warn!(error = %e, "notify-rust failed; downgrading to LogOnly notifier");
                        self.backend = Backend::LogOnly;
                        info!("[NOTIFY] {}: {}", notification.title, notification.body);
                        Err(CapabilityError::failed("notifier", e))
                    }
                }
            }
            Backend::LogOnly => {
                info!("[NOTIFY] {}: {}", notification.title, notification.body);
                Ok(())
            }
        }
    }
}
