//! Byte offset to line/column conversion

use text_size::TextSize;

/// A 1-based line and 0-based column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to line/column positions. Built once per source
/// text; used when reporting errors to the user.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        LineCol {
            line: line as u32 + 1,
            col: u32::from(offset - self.line_starts[line]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(1)), LineCol { line: 1, col: 1 });
        assert_eq!(index.line_col(TextSize::new(3)), LineCol { line: 2, col: 0 });
        assert_eq!(index.line_col(TextSize::new(4)), LineCol { line: 2, col: 1 });
    }

    #[test]
    fn test_line_col_at_end() {
        let index = LineIndex::new("x\n");
        assert_eq!(index.line_col(TextSize::new(2)), LineCol { line: 2, col: 0 });
    }
}
