//! CLI presenter for output formatting

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::session::SessionPhase;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Announce a phase change
    pub fn phase(&self, phase: SessionPhase) {
        match phase {
            SessionPhase::Idle => eprintln!("{} {}", "■".dimmed(), phase.label()),
            SessionPhase::Complete => eprintln!("{} {}", "✓".green(), phase.label().bold()),
            _ => eprintln!("{} {}", "●".cyan(), phase.label().bold()),
        }
    }

    /// Format audio position as a bar with `mm:ss / mm:ss`
    pub fn format_progress(&self, current_secs: f64, total_secs: f64) -> String {
        let ratio = if total_secs > 0.0 {
            (current_secs / total_secs).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = (ratio * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {} / {}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            format_clock(current_secs),
            format_clock(total_secs)
        )
    }

    /// Format remaining meditation time
    pub fn format_remaining(&self, remaining_secs: u64) -> String {
        format!("{} remaining", format_clock(remaining_secs as f64))
    }

    /// Show which keys do what
    pub fn controls_hint(&self, session_running: bool) {
        let hint = if session_running {
            "s: skip phase | q: stop session"
        } else {
            "n: new session | q: quit"
        };
        eprintln!("{}", hint.dimmed());
    }

    /// Print a key-value pair (for config and catalog listings)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole seconds as `mm:ss`
fn format_clock(secs: f64) -> String {
    let whole = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", whole / 60, whole % 60)
}
