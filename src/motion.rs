//! The motion calculator.
//!
//! A motion is a pure function of the buffer, the cursor and a little
//! session context. It answers with a [`MotionRange`] or `None` when the
//! motion cannot be satisfied (search target missing, buffer edge, unset
//! mark). Each motion has a fixed inclusive/linewise policy.

use crate::action::{Find, FindKind, Motion, MotionAction};
use crate::marks::MarkStore;
use crate::traits::TextBuffer;
use crate::types::{MotionRange, Position};
use crate::word::{self, repeat_step};

/// Session state a motion may read.
#[derive(Debug, Clone, Copy)]
pub struct MotionContext<'a> {
    pub marks: &'a MarkStore,
    /// The last `f F t T`, for `;` and `,`.
    pub last_find: Option<Find>,
    /// Column `j`/`k` try to keep; `usize::MAX` sticks to line end.
    pub preferred_col: Option<usize>,
}

pub fn calculate<B: TextBuffer + ?Sized>(
    buf: &B,
    action: &MotionAction,
    cursor: usize,
    ctx: &MotionContext<'_>,
) -> Option<MotionRange> {
    let pos = buf.position(cursor);
    let cursor = pos.index;
    let count = action.count.max(1);
    let steps = count as isize;

    match action.motion {
        Motion::Left => {
            let to = pos.translate(buf, 0, -steps, true)?;
            Some(MotionRange::exclusive(cursor, to.index))
        }
        Motion::Right => {
            let to = pos.translate(buf, 0, steps, true)?;
            Some(MotionRange::exclusive(cursor, to.index))
        }
        Motion::Up => vertical(buf, pos, -steps, ctx.preferred_col),
        Motion::Down => vertical(buf, pos, steps, ctx.preferred_col),
        Motion::LineStart => Some(MotionRange::exclusive(cursor, buf.line_start(pos.line))),
        Motion::FirstNonBlank => Some(MotionRange::exclusive(cursor, buf.first_non_blank(pos.line))),
        Motion::LineEnd => {
            let line = (pos.line + count as usize - 1).min(last_line(buf));
            if buf.line_len(line) == 0 {
                return Some(MotionRange::exclusive(cursor, buf.line_start(line)));
            }
            Some(MotionRange::inclusive(cursor, buf.line_end(line) - 1))
        }
        Motion::WordForward { big } => {
            let end = repeat_step(cursor, count, |i| word::next_word_start(buf, i, big))?;
            Some(MotionRange::exclusive(cursor, end))
        }
        Motion::WordEnd { big } => {
            let end = repeat_step(cursor, count, |i| word::next_word_end(buf, i, big))?;
            Some(MotionRange::inclusive(cursor, end))
        }
        Motion::WordBackward { big } => {
            let end = repeat_step(cursor, count, |i| word::prev_word_start(buf, i, big))?;
            Some(MotionRange {
                start: cursor,
                end,
                inclusive: big,
                linewise: false,
            })
        }
        Motion::Find(find) => find_in_line(buf, pos, find, count as usize),
        Motion::RepeatFind { reverse } => {
            let last = ctx.last_find?;
            let find = Find {
                kind: if reverse { last.kind.reversed() } else { last.kind },
                ch: last.ch,
            };
            let range = find_in_line(buf, pos, find, count as usize)?;
            if find.kind.is_till() && range.end == cursor {
                // a till that lands where it started would never advance
                return find_in_line(buf, pos, find, count as usize + 1);
            }
            Some(range)
        }
        Motion::LastLine => {
            let line = match action.count {
                0 => last_line(buf),
                n => n as usize - 1,
            };
            Some(to_line(buf, cursor, line))
        }
        Motion::FirstLine => {
            let line = action.count.saturating_sub(1) as usize;
            Some(to_line(buf, cursor, line))
        }
        Motion::LineUp => relative_line(buf, pos, -steps),
        Motion::LineDown => relative_line(buf, pos, steps),
        Motion::LineDownLess => relative_line(buf, pos, steps - 1),
        Motion::Percent if action.count == 0 => matching_bracket(buf, cursor),
        Motion::Percent => {
            let lines = buf.line_count() as u64;
            let line = (action.count as u64 * lines).div_ceil(100).max(1) - 1;
            Some(to_line(buf, cursor, line as usize))
        }
        Motion::Mark { name, linewise } => {
            let mark = ctx.marks.get(name)?;
            let target = Position::from_line_col(buf, mark.line, mark.col);
            if linewise {
                Some(MotionRange::linewise(cursor, buf.first_non_blank(target.line)))
            } else {
                Some(MotionRange::exclusive(cursor, target.index))
            }
        }
        Motion::Jump { target } => {
            if target >= buf.len_chars() {
                return None;
            }
            Some(MotionRange::inclusive(cursor, target))
        }
        Motion::Line => {
            let line = (pos.line + count as usize - 1).min(last_line(buf));
            Some(MotionRange::linewise(cursor, buf.line_start(line)))
        }
    }
}

/// `cw` on a non-blank: to the end of the word under the cursor, then
/// `count - 1` more word ends. Trailing whitespace is left alone.
pub(crate) fn change_word<B: TextBuffer + ?Sized>(
    buf: &B,
    cursor: usize,
    count: u32,
    big: bool,
) -> Option<MotionRange> {
    let word = word::word_at(buf, cursor, big)?;
    let mut end = word.end - 1;
    for _ in 1..count.max(1) {
        match word::next_word_end(buf, end, big) {
            Some(next) => end = next,
            None => break,
        }
    }
    Some(MotionRange::inclusive(cursor, end))
}

/// Highest column a Normal-mode cursor may rest on.
pub(crate) fn max_normal_col<B: TextBuffer + ?Sized>(buf: &B, line: usize) -> usize {
    buf.line_len(line).saturating_sub(1)
}

fn last_line<B: TextBuffer + ?Sized>(buf: &B) -> usize {
    buf.line_count().saturating_sub(1)
}

fn vertical<B: TextBuffer + ?Sized>(
    buf: &B,
    pos: Position,
    delta: isize,
    preferred_col: Option<usize>,
) -> Option<MotionRange> {
    let line = shifted_line(buf, pos.line, delta)?;
    let col = preferred_col
        .unwrap_or(pos.col)
        .min(max_normal_col(buf, line));
    Some(MotionRange::linewise(pos.index, buf.line_start(line) + col))
}

fn relative_line<B: TextBuffer + ?Sized>(
    buf: &B,
    pos: Position,
    delta: isize,
) -> Option<MotionRange> {
    let line = shifted_line(buf, pos.line, delta)?;
    Some(MotionRange::linewise(pos.index, buf.first_non_blank(line)))
}

/// Move `delta` lines, clamping to the buffer. Fails only when there is no
/// room at all in the requested direction.
fn shifted_line<B: TextBuffer + ?Sized>(buf: &B, line: usize, delta: isize) -> Option<usize> {
    if delta == 0 {
        return Some(line);
    }
    let room = if delta < 0 {
        line
    } else {
        last_line(buf) - line
    };
    if room == 0 {
        return None;
    }
    let steps = delta.unsigned_abs().min(room);
    Some(if delta < 0 { line - steps } else { line + steps })
}

fn to_line<B: TextBuffer + ?Sized>(buf: &B, cursor: usize, line: usize) -> MotionRange {
    let line = line.min(last_line(buf));
    MotionRange::linewise(cursor, buf.first_non_blank(line))
}

fn find_in_line<B: TextBuffer + ?Sized>(
    buf: &B,
    pos: Position,
    find: Find,
    count: usize,
) -> Option<MotionRange> {
    let line_start = buf.line_start(pos.line);
    let line_end = buf.line_end(pos.line);
    let is_target = |i: &usize| buf.char_at(*i) == Some(find.ch);
    match find.kind {
        FindKind::Forward | FindKind::TillForward => {
            let hit = (pos.index + 1..line_end).filter(is_target).nth(count - 1)?;
            let end = if find.kind == FindKind::Forward {
                hit
            } else {
                hit - 1
            };
            Some(MotionRange::inclusive(pos.index, end))
        }
        FindKind::Backward | FindKind::TillBackward => {
            let hit = (line_start..pos.index).rev().filter(is_target).nth(count - 1)?;
            let end = if find.kind == FindKind::Backward {
                hit
            } else {
                hit + 1
            };
            Some(MotionRange::exclusive(pos.index, end))
        }
    }
}

fn bracket_pair(c: char) -> Option<(char, char, bool)> {
    match c {
        '(' => Some(('(', ')', true)),
        '[' => Some(('[', ']', true)),
        '{' => Some(('{', '}', true)),
        ')' => Some(('(', ')', false)),
        ']' => Some(('[', ']', false)),
        '}' => Some(('{', '}', false)),
        _ => None,
    }
}

/// `%` without a count: the first bracket at or after the cursor, matched
/// against its depth-balanced partner.
fn matching_bracket<B: TextBuffer + ?Sized>(buf: &B, cursor: usize) -> Option<MotionRange> {
    let len = buf.len_chars();
    let (at, (open, close, forward)) =
        (cursor..len).find_map(|i| buf.char_at(i).and_then(bracket_pair).map(|p| (i, p)))?;

    let mut depth = 0usize;
    let mut visit = |i: usize| -> Option<usize> {
        let c = buf.char_at(i)?;
        let (nest, unnest) = if forward { (open, close) } else { (close, open) };
        if c == nest {
            depth += 1;
        } else if c == unnest {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
        None
    };
    let partner = if forward {
        (at + 1..len).find_map(&mut visit)
    } else {
        (0..at).rev().find_map(&mut visit)
    }?;
    Some(MotionRange::inclusive(cursor, partner))
}
