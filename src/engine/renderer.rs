//! Progress rendering
//!
//! The full-viewport status view and the single overwritten tail line.
//! Rendering is stateless: identical inputs produce identical bytes, so the
//! renderer can be called repeatedly without accumulating state. Glyphs and
//! colors come from an explicit theme record passed to the renderer rather
//! than process-wide constants.

use std::io::Write;

use console::{strip_ansi_codes, Style};
use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};

use crate::workflow::{StepCursor, StepStatus, WorkflowDefinition};

/// Fallback width for the tail line when the terminal size is unknown
const FALLBACK_WIDTH: usize = 80;

/// Glyph and style for one status kind
#[derive(Debug, Clone)]
pub struct StatusGlyph {
    pub glyph: char,
    pub style: Style,
}

/// Mapping from step status to its visual treatment
#[derive(Debug, Clone)]
pub struct StatusTheme {
    pub completed: StatusGlyph,
    pub current: StatusGlyph,
    pub pending: StatusGlyph,
    pub failed: StatusGlyph,
    pub header: Style,
}

impl StatusTheme {
    fn for_status(&self, status: StepStatus) -> &StatusGlyph {
        match status {
            StepStatus::Completed => &self.completed,
            StepStatus::Current => &self.current,
            StepStatus::Pending => &self.pending,
            StepStatus::Failed => &self.failed,
        }
    }
}

impl Default for StatusTheme {
    fn default() -> Self {
        Self {
            completed: StatusGlyph {
                glyph: '✓',
                style: Style::new().green(),
            },
            current: StatusGlyph {
                glyph: '➜',
                style: Style::new().cyan().bold(),
            },
            pending: StatusGlyph {
                glyph: '·',
                style: Style::new().dim(),
            },
            failed: StatusGlyph {
                glyph: '✗',
                style: Style::new().red().bold(),
            },
            header: Style::new().bold().underlined(),
        }
    }
}

/// Draws the full status view
#[derive(Debug, Clone, Default)]
pub struct ProgressRenderer {
    theme: StatusTheme,
}

impl ProgressRenderer {
    pub fn new(theme: StatusTheme) -> Self {
        Self { theme }
    }

    /// Clear the viewport and repaint: header, one line per step, separator.
    pub fn draw<W: Write>(
        &self,
        out: &mut W,
        definition: &WorkflowDefinition,
        cursor: StepCursor,
    ) -> std::io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        writeln!(out, "{}", self.theme.header.apply_to(definition.name()))?;
        for step in definition.steps() {
            let visual = self.theme.for_status(cursor.status_of(step.index));
            writeln!(
                out,
                "  {} {}",
                visual.style.apply_to(visual.glyph),
                step.description
            )?;
        }
        writeln!(out)?;
        out.flush()
    }
}

/// The live-updating output line below the progress view
///
/// Holds only the last displayed text, to skip redundant redraws.
#[derive(Debug, Default)]
pub struct TailLine {
    last: Option<String>,
}

impl TailLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the tail line with `raw`, if its sanitized form changed.
    ///
    /// Control sequences are stripped for display only; the capture keeps
    /// them. The text is truncated to the terminal width so a long line
    /// cannot wrap and push the progress view off screen.
    pub fn show<W: Write>(&mut self, out: &mut W, raw: &str) -> std::io::Result<()> {
        let clean = strip_ansi_codes(raw).trim_end().to_string();
        if self.last.as_deref() == Some(clean.as_str()) {
            return Ok(());
        }

        let width = terminal::size()
            .map(|(w, _)| w as usize)
            .unwrap_or(FALLBACK_WIDTH);
        let display: String = clean.chars().take(width).collect();

        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        write!(out, "{display}")?;
        out.flush()?;

        self.last = Some(clean);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::WorkflowDefinition;

    fn definition() -> WorkflowDefinition {
        WorkflowDefinition::new(
            "Nightly",
            None,
            vec![("build", "true"), ("test", "true"), ("publish", "true")],
        )
        .unwrap()
    }

    #[test]
    fn test_draw_is_idempotent() {
        let renderer = ProgressRenderer::default();
        let def = definition();

        let mut first = Vec::new();
        let mut second = Vec::new();
        renderer
            .draw(&mut first, &def, StepCursor::running(2))
            .unwrap();
        renderer
            .draw(&mut second, &def, StepCursor::running(2))
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_draw_shows_header_and_every_step() {
        let renderer = ProgressRenderer::default();
        let def = definition();

        let mut out = Vec::new();
        renderer
            .draw(&mut out, &def, StepCursor::running(1))
            .unwrap();
        let text = String::from_utf8_lossy(&out);

        assert!(text.contains("Nightly"));
        for step in def.steps() {
            assert!(text.contains(&step.description));
        }
    }

    #[test]
    fn test_distinct_cursors_draw_distinct_views() {
        let renderer = ProgressRenderer::default();
        let def = definition();

        let mut running = Vec::new();
        let mut done = Vec::new();
        renderer
            .draw(&mut running, &def, StepCursor::running(1))
            .unwrap();
        renderer
            .draw(&mut done, &def, StepCursor::done(def.step_count()))
            .unwrap();

        assert_ne!(running, done);
    }

    #[test]
    fn test_tail_strips_control_sequences_for_display() {
        let mut tail = TailLine::new();
        let mut out = Vec::new();
        tail.show(&mut out, "\x1b[32mcompiling\x1b[0m crate").unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("compiling crate"));
        assert!(!text.contains("\x1b[32m"));
    }

    #[test]
    fn test_tail_skips_unchanged_lines() {
        let mut tail = TailLine::new();
        let mut out = Vec::new();
        tail.show(&mut out, "same line").unwrap();
        let after_first = out.len();

        tail.show(&mut out, "same line").unwrap();
        assert_eq!(out.len(), after_first);

        // A recolored but textually identical line is still unchanged
        tail.show(&mut out, "\x1b[31msame line\x1b[0m").unwrap();
        assert_eq!(out.len(), after_first);
    }
}
