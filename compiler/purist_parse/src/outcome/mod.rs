//! Parse outcomes as values.
//!
//! Every parser returns a [`ParseOutcome`] instead of unwinding. Besides
//! success, an outcome remembers the furthest position where something was
//! expected and which parsers expected it, so the final diagnostic can say
//! "expected one of ..." no matter how many alternatives were tried.
//!
//! Progress is not part of the outcome: callers compare cursor positions
//! (see [`Progress`](crate::Progress)).

use std::cmp::Ordering;
use std::sync::Arc;

use purist_diagnostic::ErrorCode;
use smallvec::SmallVec;

use crate::Parser;

/// A message that replaces the generic "expected ..." report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureMessage {
    pub code: ErrorCode,
    pub text: Arc<str>,
}

#[derive(Clone, Debug)]
pub struct ParseOutcome {
    /// Furthest significant-token position where a failure was seen, or
    /// where parsing stopped if nothing failed further out.
    pub position: usize,
    /// Parsers that failed at `position`.
    pub expected: SmallVec<[Parser; 2]>,
    /// First custom message recorded at `position`.
    pub message: Option<FailureMessage>,
    pub success: bool,
}

impl ParseOutcome {
    #[inline]
    pub fn success(position: usize) -> Self {
        ParseOutcome {
            position,
            expected: SmallVec::new(),
            message: None,
            success: true,
        }
    }

    /// `parser` did not match at `position`.
    pub fn failure(position: usize, parser: &Parser) -> Self {
        let mut expected = SmallVec::new();
        expected.push(parser.clone());
        ParseOutcome {
            position,
            expected,
            message: None,
            success: false,
        }
    }

    /// A failure carrying its own message, such as a guard rejection.
    pub fn failure_with_message(
        position: usize,
        parser: Option<&Parser>,
        code: ErrorCode,
        text: impl Into<Arc<str>>,
    ) -> Self {
        ParseOutcome {
            position,
            expected: parser.into_iter().cloned().collect(),
            message: Some(FailureMessage {
                code,
                text: text.into(),
            }),
            success: false,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.success
    }

    #[must_use]
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Combine the bookkeeping of two outcomes, `other` being the later one.
    ///
    /// The furthest position wins; at equal positions the expectations are
    /// unioned and the first message is kept. Success comes from `other`.
    #[must_use]
    pub fn merge(self, other: ParseOutcome) -> ParseOutcome {
        let success = other.success;
        let mut merged = match self.position.cmp(&other.position) {
            Ordering::Greater => self,
            Ordering::Less => other,
            Ordering::Equal => {
                let mut merged = self;
                merged.expected.extend(other.expected);
                if merged.message.is_none() {
                    merged.message = other.message;
                }
                merged
            }
        };
        merged.success = success;
        merged
    }

    /// Human-readable descriptions of everything expected at `position`,
    /// sorted and deduplicated.
    pub fn expected_descriptions(&self) -> Vec<&str> {
        let mut descriptions: Vec<&str> = self
            .expected
            .iter()
            .flat_map(|p| p.expected_descriptions().iter().map(AsRef::as_ref))
            .collect();
        descriptions.sort_unstable();
        descriptions.dedup();
        descriptions
    }
}

#[cfg(test)]
mod tests;
