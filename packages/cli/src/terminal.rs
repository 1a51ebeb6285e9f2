use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{execute, terminal};
use parley_tui::App;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::warn;

/// Raw mode plus alternate screen for as long as the guard lives.
///
/// Dropping the guard restores the terminal, including while unwinding.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, terminal::EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(e.into());
        }
        let backend = CrosstermBackend::new(stdout);
        Ok(Self {
            terminal: Terminal::new(backend)?,
            restored: false,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Terminal cleanup failed");
        }
    }
}

/// Run the app on the real terminal, restoring it afterwards
pub async fn start_tui(app: &mut App) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;

    let result = app.run(guard.terminal_mut()).await;

    // Always restore terminal, even if there was an error
    if let Err(cleanup_error) = guard.restore() {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    result
}
