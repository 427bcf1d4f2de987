//! Applies resolved actions to the host.
//!
//! Every mutation goes through [`Host`] first; cursor, mode and registers
//! are only touched once the host call returned `Ok`. A motion or object
//! with no target abandons the command without a register write.

use crate::action::{
    Action, Instant, InstantAction, ModeChange, Motion, MotionAction, ObjectAction, Operator,
    OperatorAction, ReplaceAction,
};
use crate::engine::Engine;
use crate::error::Result;
use crate::motion::{self, MotionContext, max_normal_col};
use crate::object;
use crate::registers::UNNAMED;
use crate::traits::{Host, TextBuffer};
use crate::types::{Mode, MotionRange, Position, Selection, TextEdit, VisualKind};

/// Upper bound, in bytes, on the text one counted paste may insert.
const MAX_PASTE_LEN: usize = 64 << 20;

/// A normalized range: `start <= end`, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
    pub linewise: bool,
    /// Linewise and running through the buffer's final line.
    pub last_line: bool,
}

impl Span {
    pub(crate) fn normalize<B: TextBuffer + ?Sized>(buf: &B, range: MotionRange) -> Span {
        let len = buf.len_chars();
        let (start, end) = if range.start <= range.end {
            (range.start, range.end)
        } else {
            (range.end, range.start)
        };
        let (start, end) = (start.min(len), end.min(len));

        if range.linewise {
            let first = buf.char_to_line(start);
            let last = buf.char_to_line(end);
            return Span {
                start: buf.line_start(first),
                end: (buf.line_end(last) + 1).min(len),
                linewise: true,
                last_line: last + 1 >= buf.line_count(),
            };
        }

        let mut end = end;
        if range.inclusive {
            end = (end + 1).min(len);
        } else if end > start {
            // an exclusive end in column 0 of a later line stops at the previous line end
            let pos = buf.position(end);
            if pos.col == 0 && pos.line > buf.char_to_line(start) {
                end = buf.line_end(pos.line - 1).max(start);
            }
        }
        Span {
            start,
            end,
            linewise: false,
            last_line: false,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Nothing to operate on. The empty final line after a trailing break
    /// is still a line.
    fn is_void(&self) -> bool {
        self.is_empty() && !(self.linewise && self.start > 0)
    }

    /// Text as stored in a register; every linewise line ends with a break,
    /// the final one included.
    fn register_text<B: TextBuffer + ?Sized>(&self, buf: &B) -> String {
        let mut text = buf.slice(self.start, self.end);
        if self.last_line {
            text.push('\n');
        }
        text
    }

    /// The edit removing this span. Deleting lines at the end of the buffer
    /// takes the preceding line break instead of leaving an empty last line.
    fn delete_edit(&self) -> TextEdit {
        if self.last_line && self.start > 0 {
            return TextEdit::delete(self.start - 1, self.end);
        }
        TextEdit::delete(self.start, self.end)
    }
}

/// What an operator replays its range from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Motion(MotionAction),
    Object(ObjectAction),
}

/// A buffer-changing command `.` can replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Repeatable {
    Operator { op: Operator, target: Target },
    Instant(InstantAction),
    Replace(ReplaceAction),
    Insert(ModeChange),
}

impl Repeatable {
    fn with_count(self, count: u32) -> Self {
        match self {
            Repeatable::Operator {
                op,
                target: Target::Motion(m),
            } => Repeatable::Operator {
                op,
                target: Target::Motion(MotionAction { count, ..m }),
            },
            Repeatable::Operator {
                op,
                target: Target::Object(o),
            } => Repeatable::Operator {
                op,
                target: Target::Object(ObjectAction { count, ..o }),
            },
            Repeatable::Instant(i) => Repeatable::Instant(InstantAction { count, ..i }),
            Repeatable::Replace(r) => Repeatable::Replace(ReplaceAction { count, ..r }),
            Repeatable::Insert(change) => Repeatable::Insert(change),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LastChange {
    pub edit: Repeatable,
    /// Text typed in the Insert session that followed.
    pub inserted: String,
}

/// Visual selection endpoints; both are on characters (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VisualState {
    pub anchor: usize,
    pub cursor: usize,
}

/// Pull an index back onto a character a Normal-mode cursor can rest on.
pub(crate) fn clamp_normal<B: TextBuffer + ?Sized>(buf: &B, index: usize) -> usize {
    let pos = buf.position(index);
    buf.line_start(pos.line) + pos.col.min(max_normal_col(buf, pos.line))
}

/// The host selection covering a visual selection.
pub(crate) fn visual_selection<B: TextBuffer + ?Sized>(
    buf: &B,
    kind: VisualKind,
    anchor: usize,
    cursor: usize,
) -> Selection {
    let len = buf.len_chars();
    match kind {
        VisualKind::CharWise if cursor >= anchor => Selection {
            anchor,
            active: (cursor + 1).min(len),
        },
        VisualKind::CharWise => Selection {
            anchor: (anchor + 1).min(len),
            active: cursor,
        },
        VisualKind::LineWise => {
            let anchor_line = buf.char_to_line(anchor);
            let cursor_line = buf.char_to_line(cursor);
            if cursor_line >= anchor_line {
                Selection {
                    anchor: buf.line_start(anchor_line),
                    active: buf.line_end(cursor_line),
                }
            } else {
                Selection {
                    anchor: buf.line_end(anchor_line),
                    active: buf.line_start(cursor_line),
                }
            }
        }
    }
}

impl Engine {
    pub(crate) fn cursor<H: Host + ?Sized>(&self, host: &H) -> usize {
        if self.machine.mode().is_visual()
            && let Some(visual) = self.visual
        {
            return visual.cursor;
        }
        host.selection().active.min(host.len_chars())
    }

    pub(crate) fn execute<H: Host + ?Sized>(&mut self, host: &mut H, action: Action) -> Result<()> {
        let repeat = self.repeatable(action);
        let applied = match action {
            Action::Motion(m) => self.run_motion(host, m)?,
            Action::Object(o) => self.run_object(host, o)?,
            Action::Operator(op) => {
                self.machine.enter_operator_pending(op);
                false
            }
            Action::ChangeMode(change) => self.change_mode(host, change)?,
            Action::Instant(i) => self.run_instant(host, i)?,
            Action::Replace(r) => self.replace(host, r)?,
        };
        if applied
            && !self.replaying
            && let Some(edit) = repeat
        {
            self.last_change = Some(LastChange {
                edit,
                inserted: String::new(),
            });
            self.recording = self.machine.mode() == Mode::Insert;
        }
        Ok(())
    }

    fn repeatable(&self, action: Action) -> Option<Repeatable> {
        let mode = self.machine.mode();
        let operator = self
            .machine
            .pending_operator()
            .filter(|p| mode == Mode::OperatorPending && p.op != Operator::Yank);
        match action {
            Action::Motion(m) => operator.map(|p| Repeatable::Operator {
                op: p.op,
                target: Target::Motion(m),
            }),
            Action::Object(o) => operator.map(|p| Repeatable::Operator {
                op: p.op,
                target: Target::Object(o),
            }),
            Action::Instant(i) if mode == Mode::Normal && i.instant.is_repeatable() => {
                Some(Repeatable::Instant(i))
            }
            Action::Replace(r) if mode == Mode::Normal => Some(Repeatable::Replace(r)),
            Action::ChangeMode(change) if change.enters_insert() => Some(Repeatable::Insert(change)),
            _ => None,
        }
    }

    /// Drop partial input. Visual mode survives; everything else returns to
    /// Normal.
    fn drop_pending(&mut self) {
        let mode = match self.machine.mode() {
            visual @ Mode::Visual(_) => visual,
            _ => Mode::Normal,
        };
        self.machine.set_mode(mode);
    }

    /// Place the cursor and settle in `mode`, collapsing any selection.
    fn finish<H: Host + ?Sized>(&mut self, host: &mut H, mode: Mode, cursor: usize) -> Result<()> {
        let cursor = match mode {
            Mode::Normal => clamp_normal(host, cursor),
            _ => cursor.min(host.len_chars()),
        };
        host.set_selection(Selection::cursor(cursor))?;
        self.visual = None;
        self.machine.set_mode(mode);
        Ok(())
    }

    fn select_visual<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        kind: VisualKind,
        anchor: usize,
        cursor: usize,
    ) -> Result<()> {
        let selection = visual_selection(host, kind, anchor, cursor);
        host.set_selection(selection)?;
        self.visual = Some(VisualState { anchor, cursor });
        self.machine.set_mode(Mode::Visual(kind));
        Ok(())
    }

    fn motion_range<H: Host + ?Sized>(
        &self,
        host: &H,
        action: MotionAction,
        cursor: usize,
    ) -> Option<MotionRange> {
        let ctx = MotionContext {
            marks: &self.marks,
            last_find: self.last_find,
            preferred_col: self.preferred_col,
        };
        motion::calculate(host, &action, cursor, &ctx)
    }

    fn run_motion<H: Host + ?Sized>(&mut self, host: &mut H, action: MotionAction) -> Result<bool> {
        let cursor = self.cursor(host);
        let changing = self
            .machine
            .pending_operator()
            .is_some_and(|p| p.op == Operator::Change);
        let range = match action.motion {
            Motion::WordForward { big }
                if changing && host.char_at(cursor).is_some_and(|c| !c.is_whitespace()) =>
            {
                motion::change_word(host, cursor, action.count, big)
            }
            _ => self.motion_range(host, action, cursor),
        };
        if let Motion::Find(find) = action.motion {
            self.last_find = Some(find);
        }
        let Some(range) = range else {
            log::debug!("{:?} has no target from {cursor}", action.motion);
            self.drop_pending();
            return Ok(false);
        };

        match self.machine.mode() {
            Mode::OperatorPending => {
                let Some(pending) = self.machine.take_operator() else {
                    self.drop_pending();
                    return Ok(false);
                };
                self.preferred_col = None;
                self.apply_operator(host, pending.op, range)
            }
            Mode::Visual(kind) => {
                let target = clamp_normal(host, range.end);
                let anchor = self.visual.map_or(cursor, |v| v.anchor);
                self.select_visual(host, kind, anchor, target)?;
                self.update_preferred_col(host, action.motion, cursor);
                Ok(true)
            }
            _ => {
                let target = clamp_normal(host, range.end);
                host.set_selection(Selection::cursor(target))?;
                self.update_preferred_col(host, action.motion, cursor);
                self.machine.set_mode(Mode::Normal);
                Ok(true)
            }
        }
    }

    fn update_preferred_col<H: Host + ?Sized>(&mut self, host: &H, motion: Motion, from: usize) {
        self.preferred_col = match motion {
            m if m.is_vertical() => self.preferred_col.or(Some(host.position(from).col)),
            Motion::LineEnd => Some(usize::MAX),
            _ => None,
        };
    }

    fn run_object<H: Host + ?Sized>(&mut self, host: &mut H, action: ObjectAction) -> Result<bool> {
        let cursor = self.cursor(host);
        let Some(range) = object::calculate(host, &action, cursor) else {
            log::debug!("no {:?} object around {cursor}", action.kind);
            self.drop_pending();
            return Ok(false);
        };
        match self.machine.mode() {
            Mode::OperatorPending => {
                let Some(pending) = self.machine.take_operator() else {
                    self.drop_pending();
                    return Ok(false);
                };
                self.apply_operator(host, pending.op, range)
            }
            Mode::Visual(kind) => {
                let span = Span::normalize(host, range);
                if span.is_empty() {
                    self.drop_pending();
                    return Ok(false);
                }
                self.select_visual(host, kind, span.start, span.end - 1)?;
                Ok(true)
            }
            _ => {
                self.drop_pending();
                Ok(false)
            }
        }
    }

    /// Yank, delete or change `range`. Returns whether anything happened.
    pub(crate) fn apply_operator<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        op: Operator,
        range: MotionRange,
    ) -> Result<bool> {
        let span = Span::normalize(host, range);
        let register = self.machine.take_register().unwrap_or(UNNAMED);
        let cursor = self.cursor(host);

        if span.is_void() && op != Operator::Change {
            self.finish(host, Mode::Normal, cursor)?;
            return Ok(false);
        }
        let text = span.register_text(host);

        match op {
            Operator::Yank => {
                let target = if span.linewise {
                    let first = host.char_to_line(span.start);
                    let pos = host.position(cursor);
                    Position::from_line_col(host, first, pos.col).index
                } else {
                    span.start
                };
                self.registers.write(register, span.linewise, text);
                self.finish(host, Mode::Normal, target)?;
            }
            Operator::Delete => {
                let first = host.char_to_line(span.start);
                let edit = span.delete_edit();
                host.apply_edits(&[edit])?;
                self.registers.write(register, span.linewise, text);
                let target = if span.linewise {
                    host.first_non_blank(first.min(host.line_count().saturating_sub(1)))
                } else {
                    span.start
                };
                self.finish(host, Mode::Normal, target)?;
            }
            Operator::Change => {
                // changed lines collapse into one empty line
                let end = if span.linewise && !span.last_line && span.end > span.start {
                    span.end - 1
                } else {
                    span.end
                };
                if end > span.start {
                    host.apply_edits(&[TextEdit::delete(span.start, end)])?;
                }
                if !span.is_void() {
                    self.registers.write(register, span.linewise, text);
                }
                self.finish(host, Mode::Insert, span.start)?;
            }
        }
        self.preferred_col = None;
        Ok(true)
    }

    fn change_mode<H: Host + ?Sized>(&mut self, host: &mut H, change: ModeChange) -> Result<bool> {
        let cursor = self.cursor(host);
        let line = host.char_to_line(cursor);
        let target = match change {
            ModeChange::Insert => cursor,
            ModeChange::InsertFirstNonBlank => {
                // a blank line is typed after its indentation
                let first = host.first_non_blank(line);
                match host.char_at(first) {
                    Some(' ' | '\t') => host.line_end(line),
                    _ => first,
                }
            }
            ModeChange::InsertLineStart => host.line_start(line),
            ModeChange::Append => (cursor + 1).min(host.line_end(line)),
            ModeChange::AppendLineEnd => host.line_end(line),
            ModeChange::OpenBelow => {
                let at = host.line_end(line);
                host.apply_edits(&[TextEdit::insert(at, "\n")])?;
                at + 1
            }
            ModeChange::OpenAbove => {
                let at = host.line_start(line);
                host.apply_edits(&[TextEdit::insert(at, "\n")])?;
                at
            }
            ModeChange::Visual => {
                self.select_visual(host, VisualKind::CharWise, cursor, cursor)?;
                return Ok(true);
            }
            ModeChange::VisualLine => {
                self.select_visual(host, VisualKind::LineWise, cursor, cursor)?;
                return Ok(true);
            }
        };
        self.preferred_col = None;
        self.finish(host, Mode::Insert, target)?;
        Ok(true)
    }

    fn run_instant<H: Host + ?Sized>(&mut self, host: &mut H, action: InstantAction) -> Result<bool> {
        let count = action.count.max(1);
        let cursor = self.cursor(host);
        let line = host.char_to_line(cursor);
        let line_end = host.line_end(line);

        match action.instant {
            Instant::Undo => {
                for _ in 0..count {
                    host.undo()?;
                }
                let target = host.selection().active;
                self.finish(host, Mode::Normal, target)?;
                Ok(true)
            }
            Instant::PasteAfter => self.paste(host, count, true),
            Instant::PasteBefore => self.paste(host, count, false),
            Instant::DeleteChar => {
                let end = (cursor + count as usize).min(line_end);
                self.apply_operator(host, Operator::Delete, MotionRange::exclusive(cursor, end))
            }
            Instant::DeleteCharBefore => {
                let start = cursor.saturating_sub(count as usize).max(host.line_start(line));
                self.apply_operator(host, Operator::Delete, MotionRange::exclusive(start, cursor))
            }
            Instant::Substitute => {
                let end = (cursor + count as usize).min(line_end);
                self.apply_operator(host, Operator::Change, MotionRange::exclusive(cursor, end))
            }
            Instant::ChangeToLineEnd => self.operate_to(host, Operator::Change, Motion::LineEnd, count),
            Instant::DeleteToLineEnd => self.operate_to(host, Operator::Delete, Motion::LineEnd, count),
            Instant::YankLine => self.operate_to(host, Operator::Yank, Motion::Line, count),
            Instant::SubstituteLine => self.operate_to(host, Operator::Change, Motion::Line, count),
            Instant::RepeatLastChange => self.repeat_last_change(host, action.count),
            Instant::SetMark(name) => {
                self.marks.set(name, host.position(cursor));
                self.drop_pending();
                Ok(true)
            }
            Instant::DeleteSelection => self.operate_on_selection(host, Operator::Delete, false),
            Instant::ChangeSelection => self.operate_on_selection(host, Operator::Change, false),
            Instant::ChangeSelectedLines => self.operate_on_selection(host, Operator::Change, true),
            Instant::YankSelection => self.operate_on_selection(host, Operator::Yank, false),
            Instant::YankSelectedLines => self.operate_on_selection(host, Operator::Yank, true),
            Instant::LowercaseSelection => self.convert_case(host, false),
            Instant::UppercaseSelection => self.convert_case(host, true),
        }
    }

    fn operate_to<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        op: Operator,
        motion: Motion,
        count: u32,
    ) -> Result<bool> {
        let cursor = self.cursor(host);
        let Some(range) = self.motion_range(host, MotionAction { count, motion }, cursor) else {
            self.drop_pending();
            return Ok(false);
        };
        self.apply_operator(host, op, range)
    }

    fn selection_range(&self, lines: bool) -> Option<MotionRange> {
        let visual = self.visual?;
        let Mode::Visual(kind) = self.machine.mode() else {
            return None;
        };
        let start = visual.anchor.min(visual.cursor);
        let end = visual.anchor.max(visual.cursor);
        if lines || kind == VisualKind::LineWise {
            Some(MotionRange::linewise(start, end))
        } else {
            Some(MotionRange::inclusive(start, end))
        }
    }

    fn operate_on_selection<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        op: Operator,
        lines: bool,
    ) -> Result<bool> {
        let Some(range) = self.selection_range(lines) else {
            self.drop_pending();
            return Ok(false);
        };
        self.apply_operator(host, op, range)
    }

    fn convert_case<H: Host + ?Sized>(&mut self, host: &mut H, upper: bool) -> Result<bool> {
        let Some(range) = self.selection_range(false) else {
            self.drop_pending();
            return Ok(false);
        };
        let span = Span::normalize(host, range);
        let text = host.slice(span.start, span.end);
        let converted = if upper {
            text.to_uppercase()
        } else {
            text.to_lowercase()
        };
        if converted != text {
            host.apply_edits(&[TextEdit::replace(span.start, span.end, converted)])?;
        }
        self.finish(host, Mode::Normal, span.start)?;
        Ok(true)
    }

    fn paste<H: Host + ?Sized>(&mut self, host: &mut H, count: u32, after: bool) -> Result<bool> {
        let name = self.machine.take_register().unwrap_or(UNNAMED);
        let Some(register) = self.registers.read(name) else {
            log::debug!("register '{name}' is empty");
            self.drop_pending();
            return Ok(false);
        };
        let total = register.text.len().checked_mul(count as usize);
        let Some(total) = total.filter(|&n| n <= MAX_PASTE_LEN) else {
            log::warn!("refusing to paste register '{name}' {count} times");
            self.drop_pending();
            return Ok(false);
        };
        log::debug!("pasting {total} bytes from '{name}'");
        let cursor = self.cursor(host);
        let line = host.char_to_line(cursor);
        let text = register.text.repeat(count as usize);

        if register.linewise {
            let (at, text, first_line) = if !after {
                (host.line_start(line), text, line)
            } else if line + 1 < host.line_count() {
                (host.line_start(line + 1), text, line + 1)
            } else {
                // after the last line: the break goes in front
                let body = text.strip_suffix('\n').unwrap_or(&text);
                (host.line_end(line), format!("\n{body}"), line + 1)
            };
            host.apply_edits(&[TextEdit::insert(at, text)])?;
            let target = host.first_non_blank(first_line.min(host.line_count().saturating_sub(1)));
            self.finish(host, Mode::Normal, target)?;
        } else {
            let at = if after {
                (cursor + 1).min(host.line_end(line))
            } else {
                cursor
            };
            let inserted = text.chars().count();
            let target = if text.contains('\n') {
                at
            } else {
                at + inserted.saturating_sub(1)
            };
            host.apply_edits(&[TextEdit::insert(at, text)])?;
            self.finish(host, Mode::Normal, target)?;
        }
        Ok(true)
    }

    fn replace<H: Host + ?Sized>(&mut self, host: &mut H, action: ReplaceAction) -> Result<bool> {
        if self.machine.mode().is_visual() {
            return self.replace_selection(host, action.ch);
        }
        let cursor = self.cursor(host);
        let line = host.char_to_line(cursor);
        let end = cursor + action.count.max(1) as usize;
        if end > host.line_end(line) {
            log::debug!("not enough characters to replace at {cursor}");
            self.drop_pending();
            return Ok(false);
        }
        let (text, target) = if action.ch == '\n' {
            ("\n".to_string(), cursor + 1)
        } else {
            (action.ch.to_string().repeat(end - cursor), end - 1)
        };
        host.apply_edits(&[TextEdit::replace(cursor, end, text)])?;
        self.finish(host, Mode::Normal, target)?;
        Ok(true)
    }

    fn replace_selection<H: Host + ?Sized>(&mut self, host: &mut H, ch: char) -> Result<bool> {
        let Some(range) = self.selection_range(false) else {
            self.drop_pending();
            return Ok(false);
        };
        let span = Span::normalize(host, range);
        let replaced: String = host
            .slice(span.start, span.end)
            .chars()
            .map(|c| if c == '\n' { c } else { ch })
            .collect();
        host.apply_edits(&[TextEdit::replace(span.start, span.end, replaced)])?;
        self.finish(host, Mode::Normal, span.start)?;
        Ok(true)
    }

    fn repeat_last_change<H: Host + ?Sized>(&mut self, host: &mut H, count: u32) -> Result<bool> {
        let Some(change) = self.last_change.clone() else {
            self.drop_pending();
            return Ok(false);
        };
        let edit = match count {
            0 => change.edit,
            n => change.edit.with_count(n),
        };
        log::debug!("repeating {edit:?}");
        self.replaying = true;
        let result = self.replay(host, edit, &change.inserted);
        self.replaying = false;
        result
    }

    fn replay<H: Host + ?Sized>(&mut self, host: &mut H, edit: Repeatable, inserted: &str) -> Result<bool> {
        let applied = match edit {
            Repeatable::Operator { op, target } => {
                self.machine
                    .enter_operator_pending(OperatorAction { op, count: None });
                match target {
                    Target::Motion(m) => self.run_motion(host, m)?,
                    Target::Object(o) => self.run_object(host, o)?,
                }
            }
            Repeatable::Instant(i) => self.run_instant(host, i)?,
            Repeatable::Replace(r) => self.replace(host, r)?,
            Repeatable::Insert(change) => self.change_mode(host, change)?,
        };
        if self.machine.mode() == Mode::Insert {
            if !inserted.is_empty() {
                self.insert_text(host, inserted)?;
            }
            self.leave_insert(host)?;
        }
        Ok(applied)
    }

    pub(crate) fn insert_text<H: Host + ?Sized>(&mut self, host: &mut H, text: &str) -> Result<()> {
        let cursor = self.cursor(host);
        host.apply_edits(&[TextEdit::insert(cursor, text)])?;
        host.set_selection(Selection::cursor(cursor + text.chars().count()))?;
        if self.recording
            && !self.replaying
            && let Some(change) = self.last_change.as_mut()
        {
            change.inserted.push_str(text);
        }
        Ok(())
    }

    pub(crate) fn backspace<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let cursor = self.cursor(host);
        if cursor == 0 {
            return Ok(());
        }
        host.apply_edits(&[TextEdit::delete(cursor - 1, cursor)])?;
        host.set_selection(Selection::cursor(cursor - 1))?;
        if self.recording
            && let Some(change) = self.last_change.as_mut()
        {
            change.inserted.pop();
        }
        Ok(())
    }

    /// Back to Normal mode, one column left.
    pub(crate) fn leave_insert<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let cursor = self.cursor(host);
        let target = if host.position(cursor).col > 0 {
            cursor - 1
        } else {
            cursor
        };
        self.recording = false;
        self.finish(host, Mode::Normal, target)
    }
}
