//! Plain-string buffer for unit tests.

use crate::traits::TextBuffer;

pub(crate) struct StrBuffer {
    chars: Vec<char>,
    line_starts: Vec<usize>,
}

impl StrBuffer {
    pub(crate) fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];
        for (i, c) in chars.iter().enumerate() {
            if *c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { chars, line_starts }
    }
}

impl TextBuffer for StrBuffer {
    fn len_chars(&self) -> usize {
        self.chars.len()
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_len(&self, line: usize) -> usize {
        let Some(&start) = self.line_starts.get(line) else {
            return 0;
        };
        match self.line_starts.get(line + 1) {
            Some(next) => next - 1 - start,
            None => self.chars.len() - start,
        }
    }

    fn line_to_char(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.chars.len())
    }

    fn char_to_line(&self, index: usize) -> usize {
        self.line_starts.partition_point(|&s| s <= index) - 1
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }
}
