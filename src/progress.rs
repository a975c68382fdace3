//! Stderr progress feedback for the audit phases
//!
//! Wraps indicatif so call sites stay oblivious to whether display is
//! active. Everything draws to stderr; stdout carries only the report.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Progress reporter, inert when disabled
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Indeterminate phase: spinner plus message
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        self.bar = Some(bar);
    }

    /// Counted phase: one tick per completed registry fetch
    pub fn start(&mut self, total: u64, message: &str) {
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        bar.set_style(bar_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        self.bar = Some(bar);
    }

    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// End the current phase, erasing its line from the terminal
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
        .expect("Invalid template")
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:28.cyan/blue}] {pos}/{len}")
        .expect("Invalid template")
        .progress_chars("=> ")
}
