//! Progress tracking for committed choice.
//!
//! Whether a failed parser consumed tokens decides what happens next:
//! - no tokens consumed: the caller may try an alternative
//! - tokens consumed: the caller is committed and the failure propagates

/// Whether a parser consumed any tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// One or more tokens were consumed.
    Made,
    /// Nothing was consumed.
    None,
}

impl Progress {
    /// Compare cursor positions taken before and after a parse.
    #[inline]
    pub fn between(before: usize, after: usize) -> Progress {
        if after > before {
            Progress::Made
        } else {
            Progress::None
        }
    }

    #[inline]
    pub fn made(self) -> bool {
        matches!(self, Progress::Made)
    }

    #[inline]
    pub fn none(self) -> bool {
        matches!(self, Progress::None)
    }

    /// `Made` if either made progress.
    #[must_use]
    pub fn or(self, other: Progress) -> Progress {
        if self.made() || other.made() {
            Progress::Made
        } else {
            Progress::None
        }
    }
}
