use serde::{Deserialize, Serialize};

/// Source location of a node: byte range plus the line/column of its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Span {
            start,
            end,
            line,
            column,
        }
    }

    /// Span covering both `self` and `other`, positioned at `self`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_join() {
        let left = Span::new(0, 5, 1, 1);
        let right = Span::new(9, 12, 1, 10);
        assert_eq!(left.to(right), Span::new(0, 12, 1, 1));
    }
}
