//! Terminal rendering of progress events.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use authcheck_application::ports::{ProgressEvent, Reporter};
use authcheck_domain::RunSummary;
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use tracing::warn;
use uuid::Uuid;

const RULE_WIDTH: usize = 60;
const BOX_INNER: usize = 59;
const TITLE_WIDTH: usize = 40;

/// Reporter writing colored, human-readable progress to a writer.
pub struct ConsoleReporter<W: Write + Send> {
    out: Mutex<W>,
    color: bool,
}

impl ConsoleReporter<Stdout> {
    /// Reporter on standard output.
    #[must_use]
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    /// Reporter on an arbitrary writer; `color` toggles ANSI styling.
    #[must_use]
    pub const fn new(out: W, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = text.color(color);
        let styled = if bold { styled.bold() } else { styled };
        styled.to_string()
    }

    fn strong(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn render(&self, w: &mut dyn Write, event: &ProgressEvent) -> io::Result<()> {
        match event {
            ProgressEvent::Banner {
                run_id,
                base_url,
                started_at,
            } => self.render_banner(w, *run_id, base_url, *started_at),
            ProgressEvent::Section { number, heading } => {
                self.render_header(w, &format!("TEST {number}: {heading}"))
            }
            ProgressEvent::Info(text) => {
                writeln!(w, "{}", self.paint(&format!("ℹ {text}"), Color::Cyan, false))
            }
            ProgressEvent::Success(text) => {
                writeln!(w, "{}", self.paint(&format!("✓ {text}"), Color::Green, false))
            }
            ProgressEvent::Failure(text) => {
                writeln!(w, "{}", self.paint(&format!("✗ {text}"), Color::Red, false))
            }
            ProgressEvent::Warning(text) => {
                writeln!(w, "{}", self.paint(&format!("⚠ {text}"), Color::Yellow, false))
            }
            ProgressEvent::Summary(summary) => self.render_summary(w, summary),
        }
    }

    fn render_header(&self, w: &mut dyn Write, text: &str) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(w)?;
        writeln!(w, "{}", self.paint(&rule, Color::Magenta, true))?;
        writeln!(w, "{}", self.paint(text, Color::Magenta, true))?;
        writeln!(w, "{}", self.paint(&rule, Color::Magenta, true))?;
        writeln!(w)
    }

    fn render_banner(
        &self,
        w: &mut dyn Write,
        run_id: Uuid,
        base_url: &str,
        started_at: DateTime<Utc>,
    ) -> io::Result<()> {
        let border = "═".repeat(BOX_INNER);
        let lines = [
            "Signup/Login API Check".to_string(),
            format!("Target: {base_url}"),
            started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            format!("Run: {run_id}"),
        ];

        writeln!(w)?;
        writeln!(w, "{}", self.paint(&format!("╔{border}╗"), Color::Magenta, true))?;
        for line in &lines {
            let row = format!("║   {line:<width$}║", width = BOX_INNER - 3);
            writeln!(w, "{}", self.paint(&row, Color::Magenta, true))?;
        }
        writeln!(w, "{}", self.paint(&format!("╚{border}╝"), Color::Magenta, true))?;
        writeln!(w)
    }

    fn render_summary(&self, w: &mut dyn Write, summary: &RunSummary) -> io::Result<()> {
        self.render_header(w, "TEST SUMMARY")?;

        for entry in &summary.entries {
            let status = if entry.passed {
                self.paint("PASS", Color::Green, false)
            } else {
                self.paint("FAIL", Color::Red, false)
            };
            writeln!(w, "  {:<TITLE_WIDTH$} {status}", entry.title)?;
        }

        writeln!(w)?;
        let total = format!("Total: {}/{} tests passed", summary.passed, summary.total);
        writeln!(w, "{}", self.strong(&total))?;
        writeln!(w)?;

        if summary.all_passed() {
            let line = "✓ ALL TESTS PASSED! System is working correctly!";
            writeln!(w, "{}", self.paint(line, Color::Green, true))?;
        } else {
            let line = "⚠ Some tests failed. Please check the errors above.";
            writeln!(w, "{}", self.paint(line, Color::Yellow, true))?;
        }
        writeln!(w)
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn emit(&self, event: ProgressEvent) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let result = self
            .render(&mut *out, &event)
            .and_then(|()| out.flush());
        if let Err(e) = result {
            warn!(error = %e, "failed to write progress");
        }
    }
}
