//! Progress and result reporting.
//!
//! [`Output`] renders messages in one of three modes:
//! - Human: colored, symbol-prefixed lines for a terminal
//! - Json: one JSON object per line for scripts and editor integrations
//! - Quiet: only errors
//!
//! Colors are applied only when writing to a TTY. A custom writer can be
//! injected for test capture.

use colored::{Color, Colorize};
use serde_json::json;
use std::cell::RefCell;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Receives human-readable status lines as the workflow advances.
pub trait ProgressSink {
    fn progress(&self, message: &str);
}

/// Output mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Quiet,
}

/// Mode-aware writer shared by the CLI and the workflow.
#[derive(Clone)]
pub struct Output {
    mode: OutputMode,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    is_tty: bool,
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output")
            .field("mode", &self.mode)
            .field("is_tty", &self.is_tty)
            .finish()
    }
}

impl Output {
    /// Create a new Output writing to stdout
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            writer: Arc::new(Mutex::new(Box::new(io::stdout()))),
            is_tty: atty::is(atty::Stream::Stdout),
        }
    }

    /// Create an Output with a custom writer (for testing)
    pub fn with_writer(mode: OutputMode, writer: Box<dyn Write + Send>) -> Self {
        Self {
            mode,
            writer: Arc::new(Mutex::new(writer)),
            is_tty: false,
        }
    }

    /// "→ {msg}" in cyan
    pub fn step(&self, msg: &str) {
        self.prefixed("step", "→", Color::Cyan, msg);
    }

    /// "✓ {msg}" in green
    pub fn success(&self, msg: &str) {
        self.prefixed("success", "✓", Color::Green, msg);
    }

    /// "⚠ {msg}" in yellow
    pub fn warn(&self, msg: &str) {
        self.prefixed("warning", "⚠", Color::Yellow, msg);
    }

    /// "✗ {msg}" in red. Errors are written even in quiet mode.
    pub fn error(&self, msg: &str) {
        if self.mode == OutputMode::Quiet {
            self.write_line(&format!("✗ {}", msg));
        } else {
            self.prefixed("error", "✗", Color::Red, msg);
        }
    }

    /// Indented subordinate text
    pub fn detail(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                for line in msg.lines() {
                    self.write_line(&format!("  {}", line));
                }
            }
            OutputMode::Json => self.write_json("detail", msg),
            OutputMode::Quiet => {}
        }
    }

    /// Emit a structured event verbatim (JSON mode only).
    pub fn event(&self, value: &serde_json::Value) {
        if self.mode == OutputMode::Json {
            self.write_line(&value.to_string());
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn prefixed(&self, level: &str, symbol: &str, color: Color, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                let symbol = if self.is_tty {
                    symbol.color(color).to_string()
                } else {
                    symbol.to_string()
                };
                self.write_line(&format!("{} {}", symbol, msg));
            }
            OutputMode::Json => self.write_json(level, msg),
            OutputMode::Quiet => {}
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn write_json(&self, level: &str, msg: &str) {
        let obj = json!({
            "level": level,
            "msg": msg,
            "ts": crate::utc_now_iso(),
        });
        self.write_line(&obj.to_string());
    }
}

impl ProgressSink for Output {
    fn progress(&self, message: &str) {
        self.step(message);
    }
}

/// Records progress messages in memory (for tests and embedding).
#[derive(Debug, Default)]
pub struct ProgressLog {
    messages: RefCell<Vec<String>>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl ProgressSink for ProgressLog {
    fn progress(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
