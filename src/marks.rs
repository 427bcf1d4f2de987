//! Named position bookmarks.
//!
//! Marks follow the document loosely: a mark inside a replaced range is
//! dropped, a mark after it moves by the change's net line delta, and a
//! mark before it stays. Columns are never adjusted.

use std::collections::HashMap;

use crate::traits::TextBuffer;
use crate::types::{DocumentChange, Position};

#[derive(Debug, Default, Clone)]
pub struct MarkStore {
    marks: HashMap<char, Position>,
}

impl MarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: char, position: Position) {
        self.marks.insert(name, position);
    }

    pub fn get(&self, name: char) -> Option<Position> {
        self.marks.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Update marks for a batch of changes.
    ///
    /// `buf` is the document after the changes; change positions refer to
    /// the document before them.
    pub fn apply_changes<B: TextBuffer + ?Sized>(&mut self, buf: &B, changes: &[DocumentChange]) {
        if changes.is_empty() {
            return;
        }
        self.marks.retain(|name, mark| {
            let key = (mark.line, mark.col);
            let mut line_delta = 0isize;
            for change in changes {
                let start = (change.start.line, change.start.col);
                let end = (change.end.line, change.end.col);
                if start <= key && key < end {
                    log::debug!("mark '{name}' invalidated by edit");
                    return false;
                }
                if key >= end {
                    let inserted = change.text.matches('\n').count() as isize;
                    let spanned = (change.end.line - change.start.line) as isize;
                    line_delta += inserted - spanned;
                }
            }
            let line = (mark.line as isize + line_delta).max(0) as usize;
            *mark = Position::from_line_col(buf, line, mark.col);
            true
        });
    }
}
