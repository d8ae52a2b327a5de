//! The fixed repair policy: which file, which guard, which lines go.

use crate::guard::Guard;
use crate::lines::LineSequence;

/// Target file, relative to the working root.
pub const TARGET_PATH: &str = "assets/app.js";

/// First removed index (zero-based, inclusive).
pub const REMOVAL_START: usize = 274;

/// End of the removed span (zero-based, exclusive).
pub const REMOVAL_END: usize = 428;

/// Half-open span of zero-based line indices to drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalRange {
    pub start: usize,
    pub end: usize,
}

impl RemovalRange {
    pub const FIXED: RemovalRange = RemovalRange {
        start: REMOVAL_START,
        end: REMOVAL_END,
    };

    /// Nominal number of lines in the span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lines `[0, start)` followed by lines `[end, len)`.
    pub fn apply(&self, lines: &LineSequence) -> LineSequence {
        lines.excise(self.start..self.end)
    }
}

/// Everything that defines the one repair this tool performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarbagePatch {
    pub target: &'static str,
    pub guard: Guard,
    pub removal: RemovalRange,
}

impl GarbagePatch {
    pub const FIXED: GarbagePatch = GarbagePatch {
        target: TARGET_PATH,
        guard: Guard::FIXED,
        removal: RemovalRange::FIXED,
    };
}
