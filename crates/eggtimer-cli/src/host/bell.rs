use std::io::Write;

use eggtimer_core::error::CapabilityError;
use eggtimer_core::{Tone, ToneSink};
use tokio::runtime::Handle;
use tokio::time::{sleep_until, Instant};

/// Rings the terminal bell (`\x07`) once per tone, at the tone's offset.
/// Pitch and length are beyond what a bell can express.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    pub fn new() -> Self {
        Self
    }
}

impl ToneSink for TerminalBell {
    fn play(&mut self, tones: &[Tone]) -> Result<(), CapabilityError> {
        let runtime = Handle::try_current().map_err(|_| CapabilityError::Unavailable("audio"))?;
        let mut offsets: Vec<_> = tones.iter().map(|t| t.offset).collect();
        offsets.sort();

        runtime.spawn(async move {
            let origin = Instant::now();
            for offset in offsets {
                sleep_until(origin + offset).await;
                let mut out = std::io::stdout().lock();
                let _ = out.write_all(b"\x07");
                let _ = out.flush();
            }
        });
        Ok(())
    }
}
