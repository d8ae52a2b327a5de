//! Error types for linecut-edit.
//!
//! This module separates the two ways a repair can stop early:
//! - Guard failures: the file is too short, or the guard line lacks the marker.
//! - Runtime errors: I/O errors and UTF-8 decoding errors.
//!
//! Neither kind leaves the target file modified.

use thiserror::Error;

/// The top-level error type for linecut-edit operations.
#[derive(Debug, Error)]
pub enum RepairError {
    /// The guard condition did not hold; nothing was written.
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// Reading, decoding, or writing the target file failed.
    #[error(transparent)]
    Runtime(#[from] anyhow::Error),
}

/// Reasons the guard line check can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The file ends before the guard line.
    #[error("file has {lines} lines, guard line {line_number} is past the end")]
    TooShort {
        /// Number of lines actually read.
        lines: usize,
        /// One-based guard line number.
        line_number: usize,
    },

    /// The guard line exists but does not contain the marker.
    #[error("line {line_number} does not contain the expected marker")]
    ContentMismatch {
        /// One-based guard line number.
        line_number: usize,
        /// Text of the guard line, without its terminator.
        actual: String,
    },
}

impl GuardError {
    /// One-based guard line number.
    pub fn line_number(&self) -> usize {
        match self {
            GuardError::TooShort { line_number, .. }
            | GuardError::ContentMismatch { line_number, .. } => *line_number,
        }
    }

    /// The guard line's text, when the file was long enough to have one.
    pub fn actual_line(&self) -> Option<&str> {
        match self {
            GuardError::TooShort { .. } => None,
            GuardError::ContentMismatch { actual, .. } => Some(actual),
        }
    }
}

impl RepairError {
    /// Returns true if the repair stopped at the guard check.
    pub fn is_guard_failure(&self) -> bool {
        matches!(self, RepairError::Guard(_))
    }

    /// The guard failure, if that is what stopped the repair.
    pub fn as_guard(&self) -> Option<&GuardError> {
        match self {
            RepairError::Guard(g) => Some(g),
            RepairError::Runtime(_) => None,
        }
    }
}

/// Result type alias using RepairError.
pub type RepairResult<T> = Result<T, RepairError>;
