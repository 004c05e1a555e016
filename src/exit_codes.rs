// pick_next_rs: process exit codes
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

//! Stable exit codes for the pick-next command.

/// Graceful quit, end of input or interrupt.
pub const OK: i32 = 0;
/// Roster missing, unreadable or empty, or bad command-line usage.
pub const CONFIG: i32 = 1;
/// State store could not be read or written.
pub const STATE: i32 = 2;
/// Terminal input or stdout output failed.
pub const IO: i32 = 3;
