//! Terminal backend for the inline modal input box.
//!
//! The box is drawn in place below the shell prompt (no alternate screen).
//! Each `draw` moves back to the first row of the previous frame, clears to
//! the end of the screen and writes the new rows. The zero-width cursor
//! marker emitted by the renderer is stripped from the output and the
//! hardware cursor is parked where it was.

use anyhow::Result;
use core_render::CURSOR_MARKER;
use core_text::visible_width;
use crossterm::{
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    event::{
        DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
    },
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use std::io::{Write, stdout};

pub mod capabilities;
pub use capabilities::TerminalCapabilities;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    /// Replace the previously drawn frame with `rows`.
    fn draw(&mut self, rows: &[String]) -> Result<()>;
}

/// Frame rows with the cursor marker removed, plus the marker's
/// (row, column) in cells when one was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedFrame {
    pub rows: Vec<String>,
    pub cursor: Option<(usize, usize)>,
}

pub fn prepare_frame(rows: &[String]) -> PreparedFrame {
    let mut cursor = None;
    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| match row.find(CURSOR_MARKER) {
            Some(at) => {
                if cursor.is_none() {
                    cursor = Some((i, visible_width(&row[..at])));
                }
                row.replace(CURSOR_MARKER, "")
            }
            None => row.clone(),
        })
        .collect();
    PreparedFrame { rows, cursor }
}

pub struct CrosstermBackend {
    caps: TerminalCapabilities,
    entered: bool,
    /// Row of the previous frame the terminal cursor was left on.
    cursor_row: usize,
    /// Rows drawn by the previous frame.
    drawn_rows: usize,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new(TerminalCapabilities::detect())
    }
}

impl CrosstermBackend {
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self {
            caps,
            entered: false,
            cursor_row: 0,
            drawn_rows: 0,
        }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalGuard<'_> {
    pub fn backend(&mut self) -> &mut CrosstermBackend {
        self.backend
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            let mut out = stdout();
            if self.caps.bracketed_paste {
                execute!(out, EnableBracketedPaste)?;
            }
            if self.caps.focus_events {
                execute!(out, EnableFocusChange)?;
            }
            self.entered = true;
            tracing::debug!(target: "runtime", caps = ?self.caps, "terminal_enter");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            let mut out = stdout();
            // Park below the frame so later output does not overwrite it.
            let below = self.drawn_rows.saturating_sub(self.cursor_row);
            for _ in 0..below {
                queue!(out, Print("\r\n"))?;
            }
            queue!(out, MoveToColumn(0), Show)?;
            if self.caps.focus_events {
                queue!(out, DisableFocusChange)?;
            }
            if self.caps.bracketed_paste {
                queue!(out, DisableBracketedPaste)?;
            }
            out.flush()?;
            disable_raw_mode()?;
            self.entered = false;
            self.drawn_rows = 0;
            self.cursor_row = 0;
        }
        Ok(())
    }

    fn draw(&mut self, rows: &[String]) -> Result<()> {
        let frame = prepare_frame(rows);
        let mut out = stdout();
        queue!(out, Hide, MoveToColumn(0))?;
        if self.cursor_row > 0 {
            queue!(out, MoveUp(to_u16(self.cursor_row)))?;
        }
        queue!(out, Clear(ClearType::FromCursorDown))?;
        for (i, row) in frame.rows.iter().enumerate() {
            if i > 0 {
                queue!(out, Print("\r\n"))?;
            }
            queue!(out, Print(row))?;
        }
        let last = frame.rows.len().saturating_sub(1);
        self.drawn_rows = frame.rows.len();
        self.cursor_row = last;
        if let Some((row, col)) = frame.cursor {
            if last > row {
                queue!(out, MoveUp(to_u16(last - row)))?;
            }
            queue!(out, MoveToColumn(to_u16(col)), Show)?;
            self.cursor_row = row;
        }
        out.flush()?;
        Ok(())
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        let _ = self.backend.leave();
    }
}
