use ropey::Rope;
use vim_motions::error::HostError;
use vim_motions::traits::{Host, TextBuffer};
use vim_motions::types::{DocumentChange, Position, Selection, TextEdit};
use vim_motions::{Action, Engine, parse_keys};

/// Rope-backed host. Records the changes it applies so tests can forward
/// them to the engine, and keeps whole-document snapshots for undo.
pub struct MockBuffer {
    rope: Rope,
    selection: Selection,
    history: Vec<(Rope, Selection)>,
    changes: Vec<DocumentChange>,
    reject_next: bool,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self::with_cursor(text, 0)
    }

    pub fn with_cursor(text: &str, cursor: usize) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::cursor(cursor),
            history: Vec::new(),
            changes: Vec::new(),
            reject_next: false,
        }
    }

    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    pub fn cursor(&self) -> usize {
        self.selection.active
    }

    pub fn cursor_line_col(&self) -> (usize, usize) {
        let pos = self.position(self.selection.active);
        (pos.line, pos.col)
    }

    pub fn put_cursor(&mut self, index: usize) {
        self.selection = Selection::cursor(index);
    }

    /// The next `apply_edits` call fails.
    pub fn reject_next_edit(&mut self) {
        self.reject_next = true;
    }

    pub fn take_changes(&mut self) -> Vec<DocumentChange> {
        std::mem::take(&mut self.changes)
    }

    /// Replace text without going through the engine, like another editor
    /// component would.
    pub fn external_edit(&mut self, start: usize, end: usize, text: &str) {
        self.apply_edits(&[TextEdit::replace(start, end, text)])
            .expect("mock edits never fail unless told to");
    }
}

/// Feed keys one at a time, forwarding document changes after each.
pub fn feed(engine: &mut Engine, buf: &mut MockBuffer, keys: &str) -> Vec<Action> {
    let mut actions = Vec::new();
    for input in parse_keys(keys) {
        if let Some(action) = engine.handle_event(buf, input) {
            actions.push(action);
        }
        let changes = buf.take_changes();
        if !changes.is_empty() {
            engine.notify_document_changed(&*buf, &changes);
        }
    }
    actions
}

impl TextBuffer for MockBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn line_to_char(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.rope.len_lines()))
    }

    fn char_to_line(&self, index: usize) -> usize {
        self.rope.char_to_line(index.min(self.rope.len_chars()))
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.rope.get_char(index)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let len = self.rope.len_chars();
        let end = end.min(len);
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }
}

impl Host for MockBuffer {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) -> Result<(), HostError> {
        self.selection = selection;
        Ok(())
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), HostError> {
        if std::mem::take(&mut self.reject_next) {
            return Err(HostError::EditRejected("buffer is read-only".into()));
        }
        self.history.push((self.rope.clone(), self.selection));

        let mut ordered: Vec<&TextEdit> = edits.iter().collect();
        ordered.sort_by(|a, b| b.start.cmp(&a.start));
        for edit in ordered {
            let start = Position::from_index(&*self, edit.start);
            let end = Position::from_index(&*self, edit.end);
            self.rope.remove(start.index..end.index);
            self.rope.insert(start.index, &edit.text);
            self.changes.push(DocumentChange {
                start,
                end,
                text: edit.text.clone(),
            });
        }
        Ok(())
    }

    fn undo(&mut self) -> Result<(), HostError> {
        if let Some((rope, selection)) = self.history.pop() {
            self.rope = rope;
            self.selection = selection;
        }
        Ok(())
    }
}
