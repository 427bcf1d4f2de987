use crate::error::HostError;
use crate::types::{Position, Selection, TextEdit};

/// Read access to the host's document.
///
/// Everything is addressed in chars. Lines are separated by a single `\n`;
/// a document ending in `\n` has a final empty line.
pub trait TextBuffer {
    // Basic queries
    fn len_chars(&self) -> usize;
    fn line_count(&self) -> usize;
    fn line_len(&self, line: usize) -> usize; // without the separator

    fn line_to_char(&self, line: usize) -> usize;
    fn char_to_line(&self, index: usize) -> usize;
    fn char_at(&self, index: usize) -> Option<char>;

    // Text extraction for yanks and text objects
    fn slice(&self, start: usize, end: usize) -> String;

    fn text(&self) -> String {
        self.slice(0, self.len_chars())
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_to_char(line)
    }

    /// Index just past the last character of `line` (on its separator).
    fn line_end(&self, line: usize) -> usize {
        self.line_to_char(line) + self.line_len(line)
    }

    /// First non-blank character of `line`; the last blank when the line
    /// has nothing else, and the line start when it is empty.
    fn first_non_blank(&self, line: usize) -> usize {
        let start = self.line_start(line);
        let end = self.line_end(line);
        (start..end)
            .find(|&i| !matches!(self.char_at(i), Some(' ' | '\t')))
            .unwrap_or_else(|| end.saturating_sub(1).max(start))
    }

    fn position(&self, index: usize) -> Position {
        Position::from_index(self, index)
    }
}

/// The editor the engine drives.
///
/// Mutations are synchronous from the engine's point of view: it calls one,
/// and only updates cursor and mode once it has returned `Ok`.
pub trait Host: TextBuffer {
    /// The primary selection.
    fn selection(&self) -> Selection;
    fn set_selection(&mut self, selection: Selection) -> Result<(), HostError>;

    /// Apply a batch of edits whose ranges refer to the pre-edit document.
    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), HostError>;

    fn undo(&mut self) -> Result<(), HostError>;
}

pub trait Clipboard {
    fn get(&mut self) -> Option<String>;
    fn set(&mut self, text: String);
}
