//! Byte ranges into a single file's text

use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, start + length)` into one file's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    /// Byte offset of the first character
    pub start: usize,

    /// Number of bytes covered
    pub length: usize,
}

impl TextSpan {
    /// Create a span from a start offset and a length
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Create a span covering `[start, end)`
    ///
    /// An inverted range collapses to an empty span at `start`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether `position` falls inside the span (end exclusive)
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end()
    }
}

impl std::fmt::Display for TextSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_and_containment() {
        let span = TextSpan::from_bounds(4, 10);
        assert_eq!(span.length, 6);
        assert_eq!(span.end(), 10);
        assert!(span.contains(4));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.to_string(), "[4, 10)");
    }

    #[test]
    fn inverted_bounds_collapse() {
        let span = TextSpan::from_bounds(8, 3);
        assert!(span.is_empty());
        assert!(!span.contains(8));
    }
}
