use std::future::Future;
use std::io::BufRead;

use eggtimer_core::preset;
use eggtimer_core::{Config, CountdownController, Event, IntervalTickSource, Tick};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::host;
use crate::input::{Input, HELP};
use crate::render;

type Lines = mpsc::UnboundedReceiver<std::io::Result<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Rewritable status line and banners.
    Terminal,
    /// One JSON event per line.
    Json,
}

/// Why the event loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    InputClosed,
    Interrupted,
}

pub fn run(
    preset_id: Option<String>,
    autostart: bool,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let preset = match preset_id {
        Some(id) => preset::resolve(&id)?,
        None => config.default_preset(),
    };

    let lines = spawn_stdin_reader()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let exit = runtime.block_on(async {
        let (ticks, tick_rx) = IntervalTickSource::new();
        let timer =
            CountdownController::with_preset(preset, host::from_config(&config.alerts), ticks);
        event_loop(timer, tick_rx, lines, tokio::signal::ctrl_c(), output, autostart).await
    })?;
    debug!(?exit, "event loop finished");
    Ok(())
}

/// Read stdin on its own thread. A blocking read there never holds up
/// runtime shutdown; the thread dies with the process.
fn spawn_stdin_reader() -> std::io::Result<Lines> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

async fn event_loop(
    mut timer: CountdownController,
    mut tick_rx: mpsc::UnboundedReceiver<Tick>,
    mut lines: Lines,
    shutdown: impl Future<Output = std::io::Result<()>>,
    output: Output,
    autostart: bool,
) -> Result<Exit, Box<dyn std::error::Error>> {
    tokio::pin!(shutdown);

    match output {
        Output::Terminal => println!("{HELP}"),
        Output::Json => render::json_line(&timer.snapshot()),
    }
    if autostart {
        let event = timer.start();
        report(output, &timer, event.as_ref());
    } else if output == Output::Terminal {
        render::status(&timer);
    }

    let exit = loop {
        tokio::select! {
            Some(tick) = tick_rx.recv() => {
                if let Some(event) = timer.on_tick(tick) {
                    report(output, &timer, Some(&event));
                } else if output == Output::Terminal {
                    render::status(&timer);
                }
            }
            line = lines.recv() => {
                let Some(line) = line else {
                    break Exit::InputClosed;
                };
                let line = line?;
                match Input::parse(&line) {
                    Some(Input::Quit) => break Exit::Quit,
                    Some(Input::List) => match output {
                        Output::Terminal => render::presets(&timer),
                        Output::Json => render::json_line(preset::list()),
                    },
                    Some(Input::Help) => notice(output, &timer, HELP),
                    Some(input) => {
                        let event = apply(&mut timer, input);
                        if event.is_none() && timer.is_finished() {
                            notice(output, &timer, "Eggs are done. Press r to reset or pick a preset.");
                        }
                        report(output, &timer, event.as_ref());
                    }
                    None => notice(output, &timer, &format!("unknown command: {}", line.trim())),
                }
            }
            _ = &mut shutdown => break Exit::Interrupted,
        }
    };

    if output == Output::Terminal {
        println!();
    }
    info!(
        ?exit,
        phase = ?timer.phase(),
        remaining = timer.remaining_secs(),
        "exiting"
    );
    // Dropping the controller cancels the tick timer and releases the wake lock.
    drop(timer);
    Ok(exit)
}

fn apply(timer: &mut CountdownController, input: Input) -> Option<Event> {
    match input {
        Input::Toggle if timer.is_running() => timer.pause(),
        Input::Toggle | Input::Start => timer.start(),
        Input::Pause => timer.pause(),
        Input::Reset => timer.reset(),
        Input::Select(preset) => timer.select(preset),
        Input::List | Input::Help | Input::Quit => None,
    }
}

fn report(output: Output, timer: &CountdownController, event: Option<&Event>) {
    match (output, event) {
        (Output::Json, Some(event)) => render::json_line(event),
        (Output::Json, None) => {}
        (Output::Terminal, Some(Event::TimerCompleted { .. })) => render::completed(timer),
        (Output::Terminal, _) => render::status(timer),
    }
}

fn notice(output: Output, timer: &CountdownController, text: &str) {
    match output {
        Output::Terminal => render::message(timer, text),
        Output::Json => eprintln!("{text}"),
    }
}
