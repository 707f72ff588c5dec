//! Liveness indicator shown while a blocking child process runs
//!
//! The indicator lives on its own thread. It receives the stop signal through
//! a one-shot channel handed over at spawn time, so nothing is shared between
//! the foreground and the indicator besides that channel.

use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

use crate::config::ProgressStyle as IndicatorStyle;

/// Interval between dots in [`IndicatorStyle::Dots`] mode
pub const DOT_INTERVAL: Duration = Duration::from_secs(1);

/// Interval between spinner frames
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"];

/// How the indicator renders
enum Renderer {
    Dots,
    Spinner(ProgressBar),
    Hidden,
}

impl Renderer {
    fn tick(&mut self) {
        match self {
            Renderer::Dots => {
                let mut out = std::io::stdout().lock();
                let _ = write!(out, ".");
                let _ = out.flush();
            }
            Renderer::Spinner(pb) => pb.tick(),
            Renderer::Hidden => {}
        }
    }

    fn finish(self) {
        match self {
            Renderer::Dots => println!("Done."),
            Renderer::Spinner(pb) => pb.finish_and_clear(),
            Renderer::Hidden => {}
        }
    }
}

/// Options for [`Liveness::spawn`]
#[derive(Debug, Clone)]
pub struct LivenessOptions {
    pub style: IndicatorStyle,
    pub message: String,
    pub interval: Duration,
    /// Render nothing (tests, non-interactive output)
    pub hidden: bool,
}

impl LivenessOptions {
    pub fn new(style: IndicatorStyle, message: impl Into<String>) -> Self {
        let interval = match style {
            IndicatorStyle::Dots => DOT_INTERVAL,
            IndicatorStyle::Spinner => SPINNER_INTERVAL,
        };
        Self {
            style,
            message: message.into(),
            interval,
            hidden: false,
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Handle to a running indicator thread.
///
/// Dropping the handle stops the indicator as well, so every exit path of
/// the monitored call terminates the thread.
pub struct Liveness {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<u64>>,
}

impl Liveness {
    /// Start rendering on a background thread
    pub fn spawn(options: LivenessOptions) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let mut renderer = if options.hidden {
            Renderer::Hidden
        } else {
            match options.style {
                IndicatorStyle::Dots => Renderer::Dots,
                IndicatorStyle::Spinner => {
                    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
                    pb.set_style(
                        ProgressStyle::default_spinner()
                            .template("{spinner} {msg} ({elapsed})")
                            .unwrap_or_else(|_| ProgressStyle::default_spinner())
                            .tick_strings(TICK_STRINGS),
                    );
                    pb.set_message(options.message.clone());
                    Renderer::Spinner(pb)
                }
            }
        };

        let interval = options.interval;
        let thread = std::thread::spawn(move || {
            let mut ticks = 0u64;
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        renderer.tick();
                        ticks += 1;
                    }
                    // Explicit stop or the handle went away
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            renderer.finish();
            ticks
        });

        Self {
            stop: Some(stop_tx),
            thread: Some(thread),
        }
    }

    /// Stop the indicator and wait for its thread. Returns the number of ticks rendered.
    pub fn finish(mut self) -> u64 {
        self.stop_and_join()
    }

    fn stop_and_join(&mut self) -> u64 {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        match self.thread.take() {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                debug!("Liveness thread panicked");
                0
            }),
            None => 0,
        }
    }
}

impl Drop for Liveness {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}
