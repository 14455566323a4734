use std::io::{self, Stdout, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Size;

use crate::error::AppResult;

/// What the loop needs from a screen: its size for menu hit-testing, and a frame to draw.
pub(crate) trait TerminalSurface {
    fn size(&self) -> io::Result<Size>;

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>);
}

type ScreenTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen with mouse reporting, undone on drop.
pub(crate) struct TerminalSession {
    terminal: ScreenTerminal,
    active: bool,
}

impl TerminalSession {
    pub(crate) fn enter() -> AppResult<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            abandon_screen(&mut stdout);
            return Err(err.into());
        }

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
            .inspect_err(|_| abandon_screen(&mut io::stdout()))?;
        terminal
            .clear()
            .inspect_err(|_| abandon_screen(terminal.backend_mut()))?;

        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Idempotent; the first failing step is reported.
    pub(crate) fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        disable_raw_mode()?;
        leave_screen(self.terminal.backend_mut())?;
        self.terminal.show_cursor()
    }
}

impl TerminalSurface for TerminalSession {
    fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal.draw(render).map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)
}

/// Best-effort teardown when entering the session failed halfway.
fn abandon_screen(out: &mut impl Write) {
    let _ = leave_screen(out);
    let _ = disable_raw_mode();
}
