// pick_next_rs: terminal input loops
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

//! Command loops for keystroke (raw mode) and line-buffered input.
//!
//! Raw mode is only held while waiting for a key. It is dropped before any
//! output so that newlines behave normally, and dropped on every exit path
//! because the terminal is restored in [`RawModeGuard`]'s `Drop`.

use std::io::{self, BufRead, Write};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use tracing::{debug, warn};

use crate::{
    command::{Action, DispatchError, Flow, InputMode, Session},
    error::PickerError,
};

/// Holds the terminal in raw mode until dropped.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn acquire() -> Result<RawModeGuard, PickerError> {
        terminal::enable_raw_mode().map_err(PickerError::Terminal)?;
        Ok(RawModeGuard { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            warn!(error = %err, "failed to restore terminal mode");
        }
    }
}

/// A single key press as the command loop sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),
    Interrupt,
    EndOfInput,
    Ignored,
}

impl Keystroke {
    pub fn from_event(key: KeyEvent) -> Keystroke {
        if key.kind == KeyEventKind::Release {
            return Keystroke::Ignored;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Keystroke::Interrupt,
            KeyCode::Char('d') if ctrl => Keystroke::EndOfInput,
            // only printable ASCII counts as a command key
            KeyCode::Char(ch) if !ctrl && (' '..='~').contains(&ch) => Keystroke::Char(ch),
            _ => Keystroke::Ignored,
        }
    }
}

// wait for one relevant key with the terminal in raw mode
fn read_keystroke() -> Result<Keystroke, PickerError> {
    let _raw = RawModeGuard::acquire()?;
    loop {
        match event::read().map_err(PickerError::Terminal)? {
            Event::Key(key) => match Keystroke::from_event(key) {
                Keystroke::Ignored => continue,
                keystroke => return Ok(keystroke),
            },
            _ => continue,
        }
    }
}

/// Interactive loop reading single keystrokes; falls back to line input on
/// stdin when raw mode is unavailable.
pub fn run_keystroke_loop<W: Write>(session: &Session, out: &mut W) -> Result<(), DispatchError> {
    // probe raw mode once so failure can fall back cleanly
    if let Err(err) = RawModeGuard::acquire() {
        debug!(error = %err, "raw mode unavailable");
        writeln!(out, "Falling back to buffered mode...")?;
        writeln!(out, "\nType commands and press Enter:")?;
        return run_line_loop(session, io::stdin().lock(), out);
    }
    writeln!(out, "\nPress any key (no Enter needed):")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let keystroke = match read_keystroke() {
            Ok(keystroke) => keystroke,
            Err(err) => {
                warn!(error = %err, "keystroke input failed");
                writeln!(out, "\nError reading keystroke ({err}), exiting...")?;
                return Ok(());
            }
        };

        let ch = match keystroke {
            Keystroke::Char(ch) => ch.to_ascii_lowercase(),
            Keystroke::Interrupt | Keystroke::EndOfInput => {
                writeln!(out)?;
                session.execute(Action::Quit, out)?;
                return Ok(());
            }
            Keystroke::Ignored => continue,
        };

        // echo the key on a clean line
        writeln!(out, "\r> {ch}")?;

        let input = ch.to_string();
        match Action::parse(&input) {
            Some(action) => {
                if session.execute(action, out)? == Flow::Quit {
                    return Ok(());
                }
            }
            None => session.unknown(&input, InputMode::Keystroke, out)?,
        }
        writeln!(out)?;
    }
}

/// Line-buffered loop over any reader; ends at quit or end of input.
pub fn run_line_loop<R: BufRead, W: Write>(
    session: &Session,
    input: R,
    out: &mut W,
) -> Result<(), DispatchError> {
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        let command = line.trim().to_lowercase();
        if command.is_empty() {
            continue;
        }

        match Action::parse(&command) {
            Some(action) => {
                if session.execute(action, out)? == Flow::Quit {
                    return Ok(());
                }
            }
            None => session.unknown(&command, InputMode::Line, out)?,
        }
    }
}
