//! The guard line check that must pass before anything is removed.

use crate::error::GuardError;
use crate::lines::LineSequence;

/// Zero-based index of the guard line (line 275).
pub const GUARD_LINE_INDEX: usize = 274;

/// Substring the guard line must contain.
pub const GUARD_MARKER: &str = "emptyTitle";

/// A fixed line index paired with a substring that line must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    pub line_index: usize,
    pub marker: &'static str,
}

impl Guard {
    pub const FIXED: Guard = Guard {
        line_index: GUARD_LINE_INDEX,
        marker: GUARD_MARKER,
    };

    /// One-based line number, as used in messages.
    pub fn line_number(&self) -> usize {
        self.line_index + 1
    }

    pub fn check(&self, lines: &LineSequence) -> Result<(), GuardError> {
        let Some(line) = lines.get(self.line_index) else {
            return Err(GuardError::TooShort {
                lines: lines.len(),
                line_number: self.line_number(),
            });
        };

        if line.raw().contains(self.marker) {
            Ok(())
        } else {
            Err(GuardError::ContentMismatch {
                line_number: self.line_number(),
                actual: line.text().to_string(),
            })
        }
    }
}
