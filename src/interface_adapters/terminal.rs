// Terminal surface on crossterm: raw mode, alternate screen, full-frame redraws.

use crate::domain::{Frame, Intent, Surface};
use crate::interface_adapters::canvas::{Canvas, compose};
use crate::interface_adapters::keys;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

/// Holds the terminal in raw mode on the alternate screen until dropped.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub struct TerminalSurface {
    out: BufWriter<Stdout>,
    // Size of the last drawn canvas; a change forces a full clear.
    last_size: Option<(usize, usize)>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self {
            out: BufWriter::new(io::stdout()),
            last_size: None,
        }
    }

    fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let size = (canvas.width(), canvas.height());
        if self.last_size != Some(size) {
            queue!(self.out, Clear(ClearType::All))?;
            self.last_size = Some(size);
        }

        let last_row = canvas.height().saturating_sub(1);
        for (y, row) in canvas.rows().enumerate() {
            queue!(self.out, MoveTo(0, y as u16))?;
            // The bottom-right cell is left alone so the screen never scrolls.
            let row = if y == last_row {
                &row[..row.len().saturating_sub(1)]
            } else {
                row
            };
            let mut color = None;
            for cell in row {
                if color != Some(cell.color) {
                    queue!(self.out, SetForegroundColor(cell.color))?;
                    color = Some(cell.color);
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn size(&mut self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let canvas = compose(frame);
        self.present(&canvas)
    }

    fn poll_intent(&mut self) -> io::Result<Option<Intent>> {
        // Drain pending non-key events (resize, focus, mouse) until a bound key shows up.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(intent) = keys::decode(&key) {
                    return Ok(Some(intent));
                }
            }
        }
        Ok(None)
    }
}
