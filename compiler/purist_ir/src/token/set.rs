//! Bitset of token kinds.

use super::TokenKind;

/// A set of token kinds using bitset representation for O(1) membership testing.
///
/// Each bit in the u128 corresponds to a `TokenKind` discriminant index.
/// FIRST sets, recovery sets, and "expected" reports are all `TokenSet`s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        Self(1u128 << kind.discriminant_index())
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    /// Build a set from a slice of kinds (usable in `const` items).
    #[must_use]
    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1u128 << kinds[i].discriminant_index();
            i += 1;
        }
        Self(bits)
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn insert(&mut self, kind: TokenKind) {
        self.0 |= 1u128 << kind.discriminant_index();
    }

    #[inline]
    pub fn union_with(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Iterate over the discriminant indices in this set, lowest first.
    pub fn iter_indices(&self) -> TokenSetIterator {
        TokenSetIterator { bits: self.0 }
    }

    /// Iterate over the kinds in this set, in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> {
        self.iter_indices()
            .filter_map(TokenKind::from_discriminant_index)
    }

    /// Format this token set as a human-readable list for error messages.
    ///
    /// Returns a string like "`,`, `)`, or `}`" for multiple tokens,
    /// or "`(`" for a single token, or "nothing" for empty set.
    pub fn format_expected(&self) -> String {
        let mut names: Vec<&'static str> = self.iter().map(TokenKind::display_name).collect();
        names.dedup();
        format_name_list(&names)
    }
}

/// Join names as "`a`", "`a` or `b`", or "`a`, `b`, or `c`".
pub fn format_name_list<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => "nothing".to_string(),
        [single] => format!("`{}`", single.as_ref()),
        [first, second] => format!("`{}` or `{}`", first.as_ref(), second.as_ref()),
        [rest @ .., last] => {
            let rest_str = rest
                .iter()
                .map(|n| format!("`{}`", n.as_ref()))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{rest_str}, or `{}`", last.as_ref())
        }
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<TokenKind> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// Iterator over discriminant indices in a `TokenSet`.
pub struct TokenSetIterator {
    bits: u128,
}

impl Iterator for TokenSetIterator {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "u128::trailing_zeros() max is 127"
        )]
        let idx = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1; // Clear the lowest set bit
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for TokenSetIterator {}
