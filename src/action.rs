//! Resolved commands.
//!
//! The key parser turns a run of keys into exactly one [`Action`]; the
//! executor applies it.

/// A fully resolved command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionAction),
    ChangeMode(ModeChange),
    /// An operator key; enters operator-pending.
    Operator(OperatorAction),
    Object(ObjectAction),
    Instant(InstantAction),
    Replace(ReplaceAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionAction {
    /// Repeat count. `0` means "not given" for `G`, `gg` and `%`.
    pub count: u32,
    pub motion: Motion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// `0`
    LineStart,
    /// `^`
    FirstNonBlank,
    /// `$`
    LineEnd,
    /// `w` / `W`
    WordForward { big: bool },
    /// `e` / `E`
    WordEnd { big: bool },
    /// `b` / `B`
    WordBackward { big: bool },
    /// `f F t T` with their target character
    Find(Find),
    /// `;` (same direction) and `,` (reversed)
    RepeatFind { reverse: bool },
    /// `G`
    LastLine,
    /// `gg`
    FirstLine,
    /// `-`
    LineUp,
    /// `+` and `<cr>`
    LineDown,
    /// `_`
    LineDownLess,
    /// `%`
    Percent,
    /// `` `x `` (exact) and `'x` (linewise)
    Mark { name: char, linewise: bool },
    /// A target chosen through jump labels.
    Jump { target: usize },
    /// An operator typed twice (`dd`, `cc`, `yy`).
    Line,
}

impl Motion {
    pub(crate) fn is_vertical(&self) -> bool {
        matches!(self, Motion::Up | Motion::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Find {
    pub kind: FindKind,
    pub ch: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindKind {
    /// `f`
    Forward,
    /// `F`
    Backward,
    /// `t`
    TillForward,
    /// `T`
    TillBackward,
}

impl FindKind {
    pub fn from_key(c: char) -> Option<FindKind> {
        match c {
            'f' => Some(FindKind::Forward),
            'F' => Some(FindKind::Backward),
            't' => Some(FindKind::TillForward),
            'T' => Some(FindKind::TillBackward),
            _ => None,
        }
    }

    pub fn reversed(self) -> FindKind {
        match self {
            FindKind::Forward => FindKind::Backward,
            FindKind::Backward => FindKind::Forward,
            FindKind::TillForward => FindKind::TillBackward,
            FindKind::TillBackward => FindKind::TillForward,
        }
    }

    pub fn is_till(self) -> bool {
        matches!(self, FindKind::TillForward | FindKind::TillBackward)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// `i`
    Insert,
    /// `I`
    InsertFirstNonBlank,
    /// `gI`
    InsertLineStart,
    /// `a`
    Append,
    /// `A`
    AppendLineEnd,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
    /// `v`
    Visual,
    /// `V`
    VisualLine,
}

impl ModeChange {
    pub(crate) fn enters_insert(&self) -> bool {
        !matches!(self, ModeChange::Visual | ModeChange::VisualLine)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Change,
    Delete,
    Yank,
}

impl Operator {
    pub fn from_key(c: char) -> Option<Operator> {
        match c {
            'c' => Some(Operator::Change),
            'd' => Some(Operator::Delete),
            'y' => Some(Operator::Yank),
            _ => None,
        }
    }

    pub fn key(&self) -> char {
        match self {
            Operator::Change => 'c',
            Operator::Delete => 'd',
            Operator::Yank => 'y',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorAction {
    pub op: Operator,
    /// Count typed before the operator, if any.
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectAction {
    pub count: u32,
    pub range: ObjectRange,
    pub kind: ObjectKind,
}

/// Whether an object includes (`a`) or excludes (`i`) its delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRange {
    Inner,
    Around,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Word { big: bool },
    Quote(char),
    Bracket { open: char, close: char },
}

impl ObjectKind {
    pub fn from_key(c: char) -> Option<ObjectKind> {
        let bracket = |open, close| Some(ObjectKind::Bracket { open, close });
        match c {
            'w' => Some(ObjectKind::Word { big: false }),
            'W' => Some(ObjectKind::Word { big: true }),
            '"' | '\'' | '`' => Some(ObjectKind::Quote(c)),
            '(' | ')' | 'b' => bracket('(', ')'),
            '{' | '}' | 'B' => bracket('{', '}'),
            '[' | ']' => bracket('[', ']'),
            '<' | '>' => bracket('<', '>'),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantAction {
    pub count: u32,
    pub instant: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instant {
    /// `u`
    Undo,
    /// `p`
    PasteAfter,
    /// `P`
    PasteBefore,
    /// `x`
    DeleteChar,
    /// `X`
    DeleteCharBefore,
    /// `C`
    ChangeToLineEnd,
    /// `D`
    DeleteToLineEnd,
    /// `Y`
    YankLine,
    /// `S`
    SubstituteLine,
    /// `s`
    Substitute,
    /// `.`
    RepeatLastChange,
    /// `m` followed by the mark name
    SetMark(char),

    // Visual mode
    /// `d` / `x`
    DeleteSelection,
    /// `c` / `s`
    ChangeSelection,
    /// `C` / `R` / `S`
    ChangeSelectedLines,
    /// `y`
    YankSelection,
    /// `Y`
    YankSelectedLines,
    /// `u`
    LowercaseSelection,
    /// `U`
    UppercaseSelection,
}

impl Instant {
    pub(crate) fn normal_from_key(c: char) -> Option<Instant> {
        match c {
            'u' => Some(Instant::Undo),
            'p' => Some(Instant::PasteAfter),
            'P' => Some(Instant::PasteBefore),
            'x' => Some(Instant::DeleteChar),
            'X' => Some(Instant::DeleteCharBefore),
            'C' => Some(Instant::ChangeToLineEnd),
            'D' => Some(Instant::DeleteToLineEnd),
            'Y' => Some(Instant::YankLine),
            'S' => Some(Instant::SubstituteLine),
            's' => Some(Instant::Substitute),
            '.' => Some(Instant::RepeatLastChange),
            _ => None,
        }
    }

    pub(crate) fn visual_from_key(c: char) -> Option<Instant> {
        match c {
            'd' | 'x' => Some(Instant::DeleteSelection),
            'c' | 's' => Some(Instant::ChangeSelection),
            'C' | 'R' | 'S' => Some(Instant::ChangeSelectedLines),
            'y' => Some(Instant::YankSelection),
            'Y' => Some(Instant::YankSelectedLines),
            'u' => Some(Instant::LowercaseSelection),
            'U' => Some(Instant::UppercaseSelection),
            _ => None,
        }
    }

    /// Whether `.` can replay this instant.
    pub(crate) fn is_repeatable(&self) -> bool {
        matches!(
            self,
            Instant::PasteAfter
                | Instant::PasteBefore
                | Instant::DeleteChar
                | Instant::DeleteCharBefore
                | Instant::ChangeToLineEnd
                | Instant::DeleteToLineEnd
                | Instant::SubstituteLine
                | Instant::Substitute
        )
    }
}

/// `r` followed by the replacement character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceAction {
    pub count: u32,
    pub ch: char,
}
