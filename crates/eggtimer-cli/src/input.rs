//! Line commands accepted on stdin while a countdown is running.

use eggtimer_core::preset::{self, Preset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Bare Enter: start when stopped, pause when running.
    Toggle,
    Start,
    Pause,
    Reset,
    Select(&'static Preset),
    List,
    Help,
    Quit,
}

impl Input {
    /// Parse one line. `None` means the line was not understood.
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim().to_ascii_lowercase();
        let input = match word.as_str() {
            "" => Input::Toggle,
            "s" | "start" => Input::Start,
            "p" | "pause" => Input::Pause,
            "r" | "reset" => Input::Reset,
            "l" | "list" => Input::List,
            "h" | "?" | "help" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            other => {
                let by_number = other
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| preset::list().get(i));
                Input::Select(by_number.or_else(|| preset::find(other))?)
            }
        };
        Some(input)
    }
}

pub const HELP: &str = "\
commands: <enter> start/pause  s start  p pause  r reset
          1-5 or a preset id to select  l list  h help  q quit";
