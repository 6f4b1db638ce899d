//! Text span type shared by every segmentation stage

use core::cmp::Ordering;
use core::fmt;

/// Half-open character range `[begin, end)` over a document's text.
///
/// Offsets count `char`s, not bytes. A span with `begin == end` is void and
/// is never materialized into a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TextSpan {
    /// First character of the span
    pub begin: usize,
    /// One past the last character of the span
    pub end: usize,
}

impl TextSpan {
    /// Create a new span
    pub const fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Returns the span only if it covers at least one character
    pub fn non_empty(begin: usize, end: usize) -> Option<Self> {
        (begin < end).then_some(Self { begin, end })
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// True for void spans
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    /// True if `other` lies inside `self` (bounds inclusive)
    pub fn contains(&self, other: &TextSpan) -> bool {
        self.begin <= other.begin && self.end >= other.end
    }

    /// Characters covered by this span
    pub fn slice<'a>(&self, chars: &'a [char]) -> &'a [char] {
        &chars[self.begin..self.end]
    }

    /// Covered text as an owned string
    pub fn text(&self, chars: &[char]) -> String {
        self.slice(chars).iter().collect()
    }
}

/// Annotation index order: begin ascending, then longer spans first.
///
/// Containers therefore always come before the spans they contain, which is
/// what the overlap cleaner relies on.
impl Ord for TextSpan {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| other.end.cmp(&self.end))
    }
}

impl PartialOrd for TextSpan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}
