//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::error::Result;
use crate::tui::app::App;

/// Initialise the terminal, run `app` until the user quits, then restore the
/// terminal even if setup or the app failed.
pub fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    with_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            app.run(&mut terminal)
        },
        restore_terminal,
    )
}

/// Undo everything `run_tui` may have set up. Safe to call when only raw mode
/// was enabled.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    Ok(())
}

/// Run `body`, then `restore` whatever `body` returned. The first error wins.
fn with_restore<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::Error;

    fn io_error(msg: &str) -> Error {
        io::Error::new(io::ErrorKind::Other, msg.to_string()).into()
    }

    #[test]
    fn test_restores_after_failed_setup() {
        let restored = Cell::new(false);
        let result: Result<()> = with_restore(
            || Err(io_error("no terminal")),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert!(restored.get());
        assert!(result.unwrap_err().to_string().contains("no terminal"));
    }

    #[test]
    fn test_setup_error_wins_over_restore_error() {
        let result: Result<()> = with_restore(
            || Err(io_error("setup")),
            || Err(io_error("restore")),
        );
        assert!(result.unwrap_err().to_string().contains("setup"));
    }

    #[test]
    fn test_restore_error_is_reported_after_success() {
        let result = with_restore(|| Ok(7), || Err(io_error("restore")));
        assert!(result.unwrap_err().to_string().contains("restore"));
        assert_eq!(with_restore(|| Ok(7), || Ok(())).unwrap(), 7);
    }
}
