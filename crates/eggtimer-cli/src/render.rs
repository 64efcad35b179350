//! Terminal rendering: one rewritable status line plus a completion banner.

use std::io::Write;

use eggtimer_core::host::Notification;
use eggtimer_core::preset;
use eggtimer_core::{CountdownController, TimerPhase};
use serde::Serialize;
use tracing::warn;

const BAR_WIDTH: usize = 24;

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

fn phase_label(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::Idle => "ready",
        TimerPhase::Running => "boiling",
        TimerPhase::Paused => "paused",
        TimerPhase::Finished => "done",
    }
}

pub fn status_line(timer: &CountdownController) -> String {
    let progress = timer.progress_fraction();
    format!(
        "{:<12} {:>5}  [{}] {:>3}%  {}",
        timer.preset().name,
        timer.remaining_display(),
        progress_bar(progress, BAR_WIDTH),
        (progress * 100.0).round() as u32,
        phase_label(timer.phase()),
    )
}

/// Overwrite the current terminal line with the timer status.
pub fn status(timer: &CountdownController) {
    let mut out = std::io::stdout().lock();
    let _ = write!(out, "\r\x1b[2K{}", status_line(timer));
    let _ = out.flush();
}

pub fn completed(timer: &CountdownController) {
    let note = Notification::eggs_ready(timer.preset());
    println!();
    println!("*** {} ***", note.title);
    println!("{}", note.body);
    println!("(r to boil again, 1-5 to pick another preset, q to quit)");
    status(timer);
}

pub fn presets(timer: &CountdownController) {
    println!();
    for (i, p) in preset::list().iter().enumerate() {
        let marker = if p.id == timer.preset().id { '>' } else { ' ' };
        println!(
            "{marker} {}. {:<12} {:>2} min  {}",
            i + 1,
            p.name,
            p.duration_min,
            p.description
        );
    }
    status(timer);
}

pub fn message(timer: &CountdownController, text: &str) {
    println!();
    println!("{text}");
    status(timer);
}

/// Compact single-line JSON, or `None` when the value cannot be encoded.
pub fn json_text<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "failed to encode output as JSON");
            None
        }
    }
}

pub fn json_line<T: Serialize + ?Sized>(value: &T) {
    if let Some(text) = json_text(value) {
        println!("{text}");
    }
}
