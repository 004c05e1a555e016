// pick_next_rs: colored terminal output
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

use crossterm::style::{Color, Stylize};

/// Roles a piece of output can play; each maps to a color readable on both
/// dark and light backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// picked name, headings
    Highlight,
    /// remaining counts
    Count,
    /// round finished, reset done
    Success,
    /// status labels
    Detail,
    /// list of names still waiting
    Names,
    /// quit command in help
    Danger,
    /// help command in help
    Accent,
}

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Painter {
        Painter { enabled }
    }

    pub fn plain() -> Painter {
        Painter { enabled: false }
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let styled = match tone {
            Tone::Highlight => text.with(Color::DarkBlue).bold(),
            Tone::Count => text.with(Color::Red),
            Tone::Success => text.with(Color::DarkGreen).bold(),
            Tone::Detail => text.with(Color::AnsiValue(18)),
            Tone::Names => text.with(Color::AnsiValue(22)),
            Tone::Danger => text.with(Color::DarkRed).bold(),
            Tone::Accent => text.with(Color::DarkMagenta).bold(),
        };
        styled.to_string()
    }
}
