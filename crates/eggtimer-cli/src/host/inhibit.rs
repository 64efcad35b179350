use std::process::Stdio;

use eggtimer_core::error::CapabilityError;
use eggtimer_core::WakeLock;
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Keeps the machine awake by holding a helper process open:
/// `systemd-inhibit` on Linux, `caffeinate` on macOS.
#[derive(Debug, Default)]
pub struct InhibitLock {
    child: Option<Child>,
}

impl InhibitLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn command() -> Option<Command> {
        if cfg!(target_os = "linux") {
            let mut cmd = Command::new("systemd-inhibit");
            cmd.args([
                "--what=idle:sleep",
                "--who=eggtimer",
                "--why=Eggs are boiling",
                "--mode=block",
                "sleep",
                "infinity",
            ]);
            Some(cmd)
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("caffeinate");
            cmd.arg("-di");
            Some(cmd)
        } else {
            None
        }
    }
}

impl WakeLock for InhibitLock {
    fn acquire(&mut self) -> Result<(), CapabilityError> {
        if self.child.is_some() {
            return Ok(());
        }
        let mut cmd = Self::command().ok_or(CapabilityError::Unavailable("wake lock"))?;
        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CapabilityError::failed("wake lock", e))?;
        info!(pid = ?child.id(), "wake lock acquired");
        self.child = Some(child);
        Ok(())
    }

    fn release(&mut self) -> Result<(), CapabilityError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        debug!(pid = ?child.id(), "releasing wake lock");
        child
            .start_kill()
            .map_err(|e| CapabilityError::failed("wake lock", e))
    }
}
