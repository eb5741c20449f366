//! State rendering.
//!
//! One-line summaries of a state for the search CLI and the interactive
//! explorer: elapsed time as `MM:SS.sssss`, the discrete counters, the
//! banked resources, and a 22-slot ballot showing each project as
//! purchased, available, or locked.

use std::fmt;

use crate::game::project::ProjectSet;
use crate::game::state::State;

/// Project-ballot group boundaries; a space follows each of these bits.
const BALLOT_BREAKS: u32 = 0x8 | 0x40 | 0x200 | 0x400 | 0x1_0000 | 0x4_0000;

/// Highest bit rendered in the ballot (the win flag).
const BALLOT_LAST: u32 = 0x20_0000;

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = (self.time() / 60.0).floor() as i64;
        let seconds = self.time() - 60.0 * minutes as f64;
        // A slot spent on hypno-harmonics is shown as spent, not held.
        let hypno = i64::from(self.projects().intersects(ProjectSet::HYPNO_HARMONICS));
        write!(
            f,
            "{:02}:{:08.5} tr={:02} (m/p={:02}/{:02}) auto={:03}/{:02} $={:08.2} \
             ops={:05} cre={:03} cp={:06} ",
            minutes,
            seconds,
            self.trust() as i64 - hypno,
            self.memory(),
            self.processors(),
            self.auto_clippers(),
            self.mlvl(),
            self.dollars(),
            self.ops() as i64,
            self.creat() as i64,
            self.clips() as i64,
        )?;
        let mut mask = 0x1u32;
        while mask <= BALLOT_LAST {
            let project = ProjectSet::from_bits(mask);
            let glyph = if self.projects().intersects(project) {
                '\u{2611}' // purchased
            } else if self.project_available(project) {
                '\u{2610}' // available
            } else {
                '\u{2612}' // locked
            };
            write!(f, "{}", glyph)?;
            if mask & BALLOT_BREAKS != 0 {
                write!(f, " ")?;
            }
            mask <<= 1;
        }
        Ok(())
    }
}

impl State {
    /// The five continuous resources in scientific notation, for debugging.
    pub fn detail(&self) -> String {
        format!(
            "{:>13.6e} {:>13.6e} {:>13.6e} {:>13.6e} {:>13.6e}",
            self.time(),
            self.ops(),
            self.creat(),
            self.clips(),
            self.dollars()
        )
    }
}
