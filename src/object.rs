//! The text-object calculator.
//!
//! Objects ignore direction: they describe the span around the cursor
//! delimited by quotes, brackets or word boundaries. Quotes are looked up on
//! the cursor line only; brackets may span lines and nest.

use crate::action::{ObjectAction, ObjectKind, ObjectRange};
use crate::traits::TextBuffer;
use crate::types::MotionRange;
use crate::word::{CharClass, word_in_line};

pub fn calculate<B: TextBuffer + ?Sized>(
    buf: &B,
    action: &ObjectAction,
    cursor: usize,
) -> Option<MotionRange> {
    match action.kind {
        ObjectKind::Word { big } => word_object(buf, cursor, big, action.range, action.count.max(1)),
        ObjectKind::Quote(quote) => quote_object(buf, cursor, quote, action.range),
        ObjectKind::Bracket { open, close } => {
            bracket_object(buf, cursor, open, close, action.range)
        }
    }
}

/// `iw`/`aw`: `count` runs for inner; for around, each word also takes the
/// whitespace after it (or, failing that, the whitespace before the first).
fn word_object<B: TextBuffer + ?Sized>(
    buf: &B,
    cursor: usize,
    big: bool,
    range: ObjectRange,
    count: u32,
) -> Option<MotionRange> {
    let first = word_in_line(buf, cursor, big)?;
    let runs = match range {
        ObjectRange::Inner => count,
        ObjectRange::Around => count.saturating_mul(2),
    };
    let mut start = first.start;
    let mut end = first.end;
    let mut last = first;
    for _ in 1..runs {
        match word_in_line(buf, end, big) {
            Some(next) => {
                end = next.end;
                last = next;
            }
            None => break,
        }
    }
    if range == ObjectRange::Around
        && first.class != CharClass::Whitespace
        && last.class != CharClass::Whitespace
        && start > buf.line_start(buf.char_to_line(start))
        && let Some(before) = word_in_line(buf, start - 1, big)
        && before.class == CharClass::Whitespace
    {
        start = before.start;
    }
    Some(MotionRange::exclusive(start, end))
}

fn quote_object<B: TextBuffer + ?Sized>(
    buf: &B,
    cursor: usize,
    quote: char,
    range: ObjectRange,
) -> Option<MotionRange> {
    let line = buf.char_to_line(cursor);
    let line_start = buf.line_start(line);
    let line_end = buf.line_end(line);
    let is_quote = |i: &usize| {
        buf.char_at(*i) == Some(quote) && (*i == 0 || buf.char_at(*i - 1) != Some('\\'))
    };

    let (left, right) = if is_quote(&cursor) {
        // even number of quotes before the cursor: it opens a pair
        let before = (line_start..cursor).filter(is_quote).count();
        if before % 2 == 0 {
            (cursor, (cursor + 1..line_end).find(is_quote)?)
        } else {
            ((line_start..cursor).rev().find(is_quote)?, cursor)
        }
    } else {
        (
            (line_start..cursor).rev().find(is_quote)?,
            (cursor + 1..line_end).find(is_quote)?,
        )
    };
    Some(delimited(left, right, range))
}

fn bracket_object<B: TextBuffer + ?Sized>(
    buf: &B,
    cursor: usize,
    open: char,
    close: char,
    range: ObjectRange,
) -> Option<MotionRange> {
    let (left, right) = match buf.char_at(cursor) {
        Some(c) if c == open => (cursor, unmatched_close(buf, cursor + 1, open, close)?),
        Some(c) if c == close => (unmatched_open(buf, cursor, open, close)?, cursor),
        _ => {
            let left = unmatched_open(buf, cursor, open, close)?;
            (left, unmatched_close(buf, left + 1, open, close)?)
        }
    };

    if range == ObjectRange::Inner
        && let Some(lines) = inner_lines(buf, left, right)
    {
        return Some(lines);
    }
    Some(delimited(left, right, range))
}

/// A block whose opening bracket ends its line and whose closing bracket
/// starts its line (after indentation): the inside is the lines between.
fn inner_lines<B: TextBuffer + ?Sized>(buf: &B, left: usize, right: usize) -> Option<MotionRange> {
    if buf.char_at(left + 1) != Some('\n') {
        return None;
    }
    let first = buf.char_to_line(left) + 1;
    let last = buf.char_to_line(right);
    if last <= first || buf.first_non_blank(last) != right {
        return None;
    }
    Some(MotionRange::linewise(
        buf.line_start(first),
        buf.line_start(last - 1),
    ))
}

fn delimited(left: usize, right: usize, range: ObjectRange) -> MotionRange {
    match range {
        ObjectRange::Around => MotionRange::exclusive(left, right + 1),
        ObjectRange::Inner => MotionRange::exclusive(left + 1, right),
    }
}

/// Nearest `open` before `before` that is not closed in between.
fn unmatched_open<B: TextBuffer + ?Sized>(
    buf: &B,
    before: usize,
    open: char,
    close: char,
) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..before).rev() {
        match buf.char_at(i) {
            Some(c) if c == close => depth += 1,
            Some(c) if c == open => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// Nearest `close` at or after `from` that was not opened in between.
fn unmatched_close<B: TextBuffer + ?Sized>(
    buf: &B,
    from: usize,
    open: char,
    close: char,
) -> Option<usize> {
    let mut depth = 0usize;
    for i in from..buf.len_chars() {
        match buf.char_at(i) {
            Some(c) if c == open => depth += 1,
            Some(c) if c == close => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}
