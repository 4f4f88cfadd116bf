//! Advisory notifications.
//!
//! # Responsibilities
//! - Surface non-fatal notices raised during validation
//! - Keep delivery best-effort: a failed notice never affects the outcome
//!
//! # Design Decisions
//! - Validation depends on the `Notifier` trait only
//! - `TracingNotifier` is the default and routes notices into the log stream
//! - `ConsoleNotifier` renders a framed block for interactive CLI use

use std::io::{self, Write};
use std::sync::Mutex;

/// Receiver for advisory (non-fatal) notices.
pub trait Notifier: Send + Sync {
    fn warn(&self, title: &str, details: &str);
}

/// Emits notices as `tracing` warning events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warn(&self, title: &str, details: &str) {
        tracing::warn!(details = %details, "{}", title);
    }
}

/// Writes notices as a framed warning block.
///
/// ```text
/// |
/// | Warning: Terraform provider versions
/// |
/// | You are using custom Terraform provider versions.
/// |
/// ```
#[derive(Debug)]
pub struct ConsoleNotifier<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleNotifier<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn render(out: &mut W, title: &str, details: &str) -> io::Result<()> {
        writeln!(out, "|")?;
        writeln!(out, "| Warning: {title}")?;

        let details = details.trim();
        if !details.is_empty() {
            writeln!(out, "|")?;
            for line in details.lines().map(str::trim) {
                writeln!(out, "| {line}")?;
            }
        }

        writeln!(out, "|")?;
        out.flush()
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn warn(&self, title: &str, details: &str) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(e) = Self::render(&mut out, title, details) {
            tracing::debug!(error = %e, "Failed to write advisory notice");
        }
    }
}
