//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting for loading and batch installs
//! - Interactive progress bars using indicatif
//! - Silent progress when stderr is not a terminal
//!
//! All progress reporting goes through the ProgressReporter trait so the
//! session controller never depends on a concrete terminal.

pub mod display;
pub mod prompt;

pub use prompt::{Confirmer, InquireConfirmer};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// The loading spinner stops animating after this long; work continues.
pub const LOADING_ANIMATION_CAP: Duration = Duration::from_secs(30);

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Progress reporter trait for long-running session phases
pub trait ProgressReporter {
    /// Show or update the loading message
    fn loading(&mut self, message: &str);

    /// Clear the loading indicator
    fn finish_loading(&mut self);

    /// Start a batch of `total` installs
    fn start_batch(&mut self, total: usize);

    /// Show the component currently being installed
    fn batch_item(&mut self, name: &str, current: usize, total: usize);

    /// Mark one batch item as done
    fn inc_batch(&mut self);

    /// Finish the batch bar
    fn finish_batch(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Loading spinner plus the flag its watcher sets when animation stops
struct Spinner {
    bar: ProgressBar,
    #[cfg_attr(not(test), allow(dead_code))]
    stopped: Arc<AtomicBool>,
}

impl Spinner {
    fn start(cap: Duration) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.enable_steady_tick(TICK_INTERVAL);

        let stopped = Arc::new(AtomicBool::new(false));
        let watched = bar.clone();
        let flag = Arc::clone(&stopped);
        thread::spawn(move || {
            thread::sleep(cap);
            if !watched.is_finished() {
                watched.disable_steady_tick();
                flag.store(true, Ordering::SeqCst);
            }
        });

        Self { bar, stopped }
    }
}

/// Interactive progress reporter with a spinner and a batch bar
pub struct InteractiveProgressReporter {
    animation_cap: Duration,
    spinner: Option<Spinner>,
    batch_pb: Option<ProgressBar>,
}

impl Default for InteractiveProgressReporter {
    fn default() -> Self {
        Self::with_animation_cap(LOADING_ANIMATION_CAP)
    }
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the spinner animation `cap` after loading starts, even without new messages
    pub fn with_animation_cap(cap: Duration) -> Self {
        Self {
            animation_cap: cap,
            spinner: None,
            batch_pb: None,
        }
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn loading(&mut self, message: &str) {
        let cap = self.animation_cap;
        let spinner = self.spinner.get_or_insert_with(|| Spinner::start(cap));
        spinner.bar.set_message(message.to_string());
    }

    fn finish_loading(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.bar.finish_and_clear();
        }
    }

    fn start_batch(&mut self, total: usize) {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(total as u64);
        pb.set_style(style);
        self.batch_pb = Some(pb);
    }

    fn batch_item(&mut self, name: &str, current: usize, total: usize) {
        if let Some(ref pb) = self.batch_pb {
            pb.set_message(format!("({current}/{total}) {name}"));
        }
    }

    fn inc_batch(&mut self) {
        if let Some(ref pb) = self.batch_pb {
            pb.inc(1);
        }
    }

    fn finish_batch(&mut self) {
        if let Some(pb) = self.batch_pb.take() {
            pb.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.bar.abandon();
        }
        if let Some(pb) = self.batch_pb.take() {
            pb.abandon();
        }
    }
}

/// Silent progress reporter for non-terminal output
///
/// No-op implementation that does not display anything.
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn loading(&mut self, _message: &str) {}

    fn finish_loading(&mut self) {}

    fn start_batch(&mut self, _total: usize) {}

    fn batch_item(&mut self, _name: &str, _current: usize, _total: usize) {}

    fn inc_batch(&mut self) {}

    fn finish_batch(&mut self) {}

    fn abandon(&mut self) {}
}

/// Pick a reporter for the current stderr
pub fn progress_for_terminal() -> Box<dyn ProgressReporter> {
    if console::Term::stderr().is_term() {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    }
}
