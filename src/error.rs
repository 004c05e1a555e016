// pick_next_rs: error types
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

//! Error types shared by the roster loader, round tracker and command loop.

use std::{io, path::PathBuf};

use crate::exit_codes;

/// Errors raised while loading the roster or maintaining round state.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// The roster file (or stdin) could not be opened or read.
    #[error("cannot read roster from {source_name}: {source}")]
    SourceUnreadable {
        source_name: String,
        #[source]
        source: io::Error,
    },

    /// The roster source had no usable names.
    #[error("no team members found in '{source_name}'")]
    EmptyRoster { source_name: String },

    /// The state store exists but could not be read.
    #[error("cannot read state file {}: {source}", .path.display())]
    StateUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The state store could not be written or removed.
    #[error("error writing state file {}: {source}", .path.display())]
    StateWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Raw-mode switching or keystroke input failed.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),
}

impl PickerError {
    /// Process exit code for this error when it ends the program.
    pub fn exit_code(&self) -> i32 {
        match self {
            PickerError::SourceUnreadable { .. } | PickerError::EmptyRoster { .. } => {
                exit_codes::CONFIG
            }
            PickerError::StateUnreadable { .. } | PickerError::StateWrite { .. } => {
                exit_codes::STATE
            }
            PickerError::Terminal(_) => exit_codes::IO,
        }
    }

    /// Remediation hint printed after configuration errors.
    pub fn hint(&self) -> Option<String> {
        match self {
            PickerError::SourceUnreadable { source_name, .. } => Some(format!(
                "Please create a '{source_name}' file with one team member name per line."
            )),
            PickerError::EmptyRoster { .. } => {
                Some("Please add team member names (one per line).".to_string())
            }
            _ => None,
        }
    }

    /// Whether the command loop may keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PickerError::StateUnreadable { .. })
    }
}
