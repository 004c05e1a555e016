// pick_next_rs: command dispatcher
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

//! Maps user commands onto round tracker operations and renders the results.

use std::io::{self, Write};

use tracing::warn;

use crate::{
    error::PickerError,
    round::RoundTracker,
    style::{Painter, Tone},
};

/// A command accepted by the interactive loop or as a one-shot subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pick,
    Reset,
    Status,
    Help,
    Quit,
}

impl Action {
    /// Parse a keystroke or typed word, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Action> {
        match input.trim().to_lowercase().as_str() {
            "p" | "pick" => Some(Action::Pick),
            "r" | "reset" => Some(Action::Reset),
            "s" | "status" => Some(Action::Status),
            "h" | "help" => Some(Action::Help),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Whether the command loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// How the user is entering commands; only changes the hint wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Keystroke,
    Line,
}

/// Fatal failure of a command: either the output stream or the state store broke.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Picker(#[from] PickerError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

pub struct Session {
    tracker: RoundTracker,
    painter: Painter,
}

impl Session {
    pub fn new(tracker: RoundTracker, painter: Painter) -> Session {
        Session { tracker, painter }
    }

    pub fn tracker(&self) -> &RoundTracker {
        &self.tracker
    }

    // print the welcome banner and command summary
    pub fn write_banner<W: Write>(&self, out: &mut W, source_name: &str) -> io::Result<()> {
        writeln!(out, "=== Daily Scrum Picker ===")?;
        writeln!(
            out,
            "Team file: {} ({} members)",
            source_name,
            self.tracker.roster().len()
        )?;
        writeln!(out, "State file: {}", self.tracker.state_path().display())?;
        writeln!(out, "\nCommands:")?;
        writeln!(out, "  p - Pick next person")?;
        writeln!(out, "  r - Reset and start over")?;
        writeln!(out, "  s - Show current status")?;
        writeln!(out, "  h - Show this help")?;
        writeln!(out, "  q - Quit")
    }

    /// Run one command.
    ///
    /// State read errors are reported and the loop goes on; write errors are
    /// returned, since the store may no longer match the round.
    pub fn execute<W: Write>(&self, action: Action, out: &mut W) -> Result<Flow, DispatchError> {
        let result = match action {
            Action::Pick => self.pick(out),
            Action::Reset => self.reset(out),
            Action::Status => self.status(out),
            Action::Help => {
                self.help(out)?;
                Ok(())
            }
            Action::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Quit);
            }
        };

        match result {
            Ok(()) => Ok(Flow::Continue),
            Err(DispatchError::Picker(err)) if err.is_recoverable() => {
                warn!(error = %err, "command failed");
                writeln!(out, "Error: {err}")?;
                Ok(Flow::Continue)
            }
            Err(err) => Err(err),
        }
    }

    pub fn unknown<W: Write>(&self, input: &str, mode: InputMode, out: &mut W) -> io::Result<()> {
        let verb = match mode {
            InputMode::Keystroke => "Press",
            InputMode::Line => "Type",
        };
        writeln!(out, "Unknown command: '{input}'. {verb} 'h' for help.")
    }

    fn pick<W: Write>(&self, out: &mut W) -> Result<(), DispatchError> {
        let pick = self.tracker.pick_next()?;
        let paint = |text: &str, tone| self.painter.paint(text, tone);

        if pick.round_restarted {
            writeln!(out, "Everyone has already had a turn. Resetting list...")?;
        }
        writeln!(out, "🎯 Next is... {}", paint(&pick.name, Tone::Highlight))?;

        if pick.remaining.is_empty() {
            writeln!(
                out,
                "{}",
                paint("(That was the last person in this round)", Tone::Success)
            )?;
        } else {
            let line = format!("({} people remaining in this round)", pick.remaining.len());
            writeln!(out, "{}", paint(&line, Tone::Count))?;
        }
        Ok(())
    }

    fn reset<W: Write>(&self, out: &mut W) -> Result<(), DispatchError> {
        let total = self.tracker.reset()?;
        let line = format!("✅ State reset! All {total} team members are available for selection.");
        writeln!(out, "{}", self.painter.paint(&line, Tone::Success))?;
        Ok(())
    }

    fn status<W: Write>(&self, out: &mut W) -> Result<(), DispatchError> {
        let status = self.tracker.status()?;
        let paint = |text: &str, tone| self.painter.paint(text, tone);

        writeln!(out, "{}", paint("📊 Status:", Tone::Highlight))?;
        writeln!(
            out,
            "  Total team members: {}",
            paint(&status.total.to_string(), Tone::Detail)
        )?;
        writeln!(
            out,
            "  Remaining this round: {}",
            paint(&status.remaining.len().to_string(), Tone::Count)
        )?;

        if status.remaining.is_empty() {
            writeln!(
                out,
                "  {}",
                paint("Everyone has been picked this round", Tone::Success)
            )?;
        } else {
            writeln!(
                out,
                "  Still to pick: {}",
                paint(&status.remaining.join(", "), Tone::Names)
            )?;
        }
        Ok(())
    }

    fn help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let key = |text: &str, tone| self.painter.paint(text, tone);

        writeln!(out, "\n{}", key("📋 Available commands:", Tone::Highlight))?;
        writeln!(out, "  {}, pick   - Pick the next person for daily scrum", key("p", Tone::Success))?;
        writeln!(out, "  {}, reset  - Reset state and start over with all team members", key("r", Tone::Count))?;
        writeln!(out, "  {}, status - Show current status and remaining team members", key("s", Tone::Highlight))?;
        writeln!(out, "  {}, help   - Show this help message", key("h", Tone::Accent))?;
        writeln!(out, "  {}, quit   - Exit the program", key("q", Tone::Danger))?;
        writeln!(out)
    }
}
