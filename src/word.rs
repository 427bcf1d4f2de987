//! Word classification and word/WORD boundaries.
//!
//! A "word" is a maximal run of characters of one class. Small words know
//! three classes; big words (WORDs) fold symbols into text. Line breaks are
//! whitespace, so runs of whitespace may span lines.

use crate::traits::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Text,
    Symbol,
    Whitespace,
}

pub fn classify(c: char, big: bool) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if big || c.is_alphanumeric() || c == '_' {
        CharClass::Text
    } else {
        CharClass::Symbol
    }
}

/// A run of same-class characters, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    pub start: usize,
    pub end: usize,
    pub class: CharClass,
}

fn class_at<B: TextBuffer + ?Sized>(buf: &B, index: usize, big: bool) -> Option<CharClass> {
    buf.char_at(index).map(|c| classify(c, big))
}

/// The run containing `index`, limited to `lo..hi`.
fn run_within<B: TextBuffer + ?Sized>(
    buf: &B,
    index: usize,
    big: bool,
    lo: usize,
    hi: usize,
) -> Option<Word> {
    if index < lo || index >= hi {
        return None;
    }
    let class = class_at(buf, index, big)?;
    let mut start = index;
    while start > lo && class_at(buf, start - 1, big) == Some(class) {
        start -= 1;
    }
    let mut end = index + 1;
    while end < hi && class_at(buf, end, big) == Some(class) {
        end += 1;
    }
    Some(Word { start, end, class })
}

/// The run containing `index`, anywhere in the buffer.
pub fn word_at<B: TextBuffer + ?Sized>(buf: &B, index: usize, big: bool) -> Option<Word> {
    run_within(buf, index, big, 0, buf.len_chars())
}

/// The run containing `index`, not crossing its line.
pub fn word_in_line<B: TextBuffer + ?Sized>(buf: &B, index: usize, big: bool) -> Option<Word> {
    let line = buf.char_to_line(index);
    run_within(buf, index, big, buf.line_start(line), buf.line_end(line))
}

/// One `w` step.
///
/// Lands on the start of the next run, skipping a whitespace run in
/// between. When that would run off the buffer, the boundary reached before
/// the whitespace is kept instead, or the buffer end if there is none.
pub fn next_word_start<B: TextBuffer + ?Sized>(buf: &B, index: usize, big: bool) -> Option<usize> {
    let len = buf.len_chars();
    let word = word_at(buf, index, big)?;
    if word.end >= len {
        return Some(len);
    }
    if word.class != CharClass::Whitespace
        && let Some(gap) = word_at(buf, word.end, big)
        && gap.class == CharClass::Whitespace
    {
        if gap.end >= len {
            return Some(word.end);
        }
        return Some(gap.end);
    }
    Some(word.end)
}

/// One `e` step: the last character of the next run that ends after
/// `index`, skipping whitespace.
pub fn next_word_end<B: TextBuffer + ?Sized>(buf: &B, index: usize, big: bool) -> Option<usize> {
    let len = buf.len_chars();
    let mut i = index + 1;
    while i < len && class_at(buf, i, big) == Some(CharClass::Whitespace) {
        i += 1;
    }
    if i >= len {
        return None;
    }
    word_at(buf, i, big).map(|w| w.end - 1)
}

/// One `b` step: the start of the run before `index`, skipping whitespace.
pub fn prev_word_start<B: TextBuffer + ?Sized>(buf: &B, index: usize, big: bool) -> Option<usize> {
    if index == 0 {
        return None;
    }
    let mut i = index.min(buf.len_chars()) - 1;
    while i > 0 && class_at(buf, i, big) == Some(CharClass::Whitespace) {
        i -= 1;
    }
    word_at(buf, i, big).map(|w| w.start)
}

/// Apply `step` up to `count` times. Stops early at the last boundary found
/// when a step fails or no longer moves; `None` only if the first step fails.
pub(crate) fn repeat_step<F>(start: usize, count: u32, mut step: F) -> Option<usize>
where
    F: FnMut(usize) -> Option<usize>,
{
    let mut at = step(start)?;
    for _ in 1..count.max(1) {
        match step(at) {
            Some(next) if next != at => at = next,
            _ => break,
        }
    }
    Some(at)
}
