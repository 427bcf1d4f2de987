use crate::traits::TextBuffer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position within a text buffer.
///
/// Positions carry both the absolute character index and the zero-based
/// line/column pair it corresponds to. Columns are counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Absolute character index.
    pub index: usize,
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position {
        index: 0,
        line: 0,
        col: 0,
    };

    /// Resolve an absolute index; indices past the end clamp to the end.
    pub fn from_index<B: TextBuffer + ?Sized>(buf: &B, index: usize) -> Position {
        let index = index.min(buf.len_chars());
        let line = buf.char_to_line(index);
        Position {
            index,
            line,
            col: index - buf.line_start(line),
        }
    }

    /// Resolve a line/column pair, clamping both to the buffer.
    pub fn from_line_col<B: TextBuffer + ?Sized>(buf: &B, line: usize, col: usize) -> Position {
        let line = line.min(buf.line_count().saturating_sub(1));
        let col = col.min(buf.line_len(line));
        Position {
            index: buf.line_start(line) + col,
            line,
            col,
        }
    }

    /// Move by a line and column delta.
    ///
    /// Without `clamp`, a target outside the buffer (line out of range, or
    /// column before 0 or past the line end) yields `None`. With `clamp` the
    /// target is pulled back to the nearest valid position.
    pub fn translate<B: TextBuffer + ?Sized>(
        &self,
        buf: &B,
        line_delta: isize,
        col_delta: isize,
        clamp: bool,
    ) -> Option<Position> {
        let last_line = buf.line_count().saturating_sub(1) as isize;
        let mut line = self.line as isize + line_delta;
        if line < 0 || line > last_line {
            if !clamp {
                return None;
            }
            line = line.clamp(0, last_line);
        }
        let line = line as usize;
        let max_col = buf.line_len(line) as isize;
        let mut col = self.col as isize + col_delta;
        if col < 0 || col > max_col {
            if !clamp {
                return None;
            }
            col = col.clamp(0, max_col);
        }
        Some(Position::from_line_col(buf, line, col as usize))
    }
}

/// The outcome of a motion or text-object calculation.
///
/// `start` is normally where the motion began and `end` where it lands; the
/// two may arrive in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionRange {
    pub start: usize,
    pub end: usize,
    /// The character at `end` belongs to the range.
    pub inclusive: bool,
    /// The range expands to whole lines before use.
    pub linewise: bool,
}

impl MotionRange {
    pub fn exclusive(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            inclusive: false,
            linewise: false,
        }
    }

    pub fn inclusive(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            inclusive: true,
            linewise: false,
        }
    }

    pub fn linewise(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            inclusive: false,
            linewise: true,
        }
    }
}

/// The current mode of the engine.
///
/// Vim is a modal editor where the same keys perform different
/// actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Normal mode - for navigation and commands.
    Normal,
    /// Insert mode - for typing text.
    Insert,
    /// Visual mode - for selecting text.
    Visual(VisualKind),
    /// An operator (`c`, `d`, `y`) is waiting for its motion or object.
    OperatorPending,
    /// Jump labels are displayed and the engine waits for a label key.
    Jump,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Visual(VisualKind::CharWise) => "VISUAL",
            Mode::Visual(VisualKind::LineWise) => "VISUAL LINE",
            Mode::OperatorPending => "PENDING",
            Mode::Jump => "JUMP",
        }
    }

    pub fn is_visual(&self) -> bool {
        matches!(self, Mode::Visual(_))
    }
}

/// The type of visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VisualKind {
    /// Character-wise selection (v).
    CharWise,
    /// Line-wise selection (V).
    LineWise,
}

/// A host selection, in the host's half-open convention.
///
/// `anchor` stays put while `active` follows the cursor. An empty selection
/// (`anchor == active`) is a plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub active: usize,
}

impl Selection {
    pub fn cursor(index: usize) -> Self {
        Self {
            anchor: index,
            active: index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.active)
    }
}

/// A replacement the engine asks the host to apply.
///
/// `start..end` are char indices into the document as it was before the
/// batch of edits is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            start: at,
            end: at,
            text: text.into(),
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            text: String::new(),
        }
    }

    pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// A change reported by the host after the document was mutated.
///
/// Positions refer to the document before the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub start: Position,
    pub end: Position,
    pub text: String,
}
