//! Terminal setup and teardown.
//!
//! Handles entering/exiting raw mode, alternate screen and mouse capture.
//! Each feature is tracked so teardown only undoes what setup did, and
//! `Drop` restores the terminal even when the event loop bails out early.

use std::io::{self, stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::style::{Attribute, ResetColor, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use tracing::{debug, warn};

use crate::state::{disable_mouse, enable_mouse};

/// Fallback when the terminal cannot report its size.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Terminal setup/teardown handle.
#[derive(Debug, Default)]
pub struct TerminalSetup {
    is_raw: bool,
    is_fullscreen: bool,
    mouse_enabled: bool,
}

impl TerminalSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw mode, alternate screen, hidden cursor, mouse capture.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        self.is_raw = true;

        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.is_fullscreen = true;

        enable_mouse()?;
        self.mouse_enabled = true;

        debug!("terminal entered fullscreen");
        Ok(())
    }

    /// Undo everything `enter_fullscreen` did, in reverse order.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        if self.mouse_enabled {
            disable_mouse()?;
            self.mouse_enabled = false;
        }

        if self.is_fullscreen {
            execute!(
                stdout(),
                SetAttribute(Attribute::Reset),
                ResetColor,
                Show,
                LeaveAlternateScreen
            )?;
            self.is_fullscreen = false;
        }

        if self.is_raw {
            disable_raw_mode()?;
            self.is_raw = false;
        }

        debug!("terminal restored");
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_raw || self.is_fullscreen || self.mouse_enabled
    }
}

impl Drop for TerminalSetup {
    fn drop(&mut self) {
        if self.is_active() {
            if let Err(err) = self.exit_fullscreen() {
                warn!(%err, "terminal restore failed");
            }
        }
    }
}

/// Detect the terminal size, falling back to 80x24.
pub fn detect_terminal_size() -> (u16, u16) {
    match terminal::size() {
        Ok((width, height)) if width > 0 && height > 0 => (width, height),
        _ => FALLBACK_SIZE,
    }
}
