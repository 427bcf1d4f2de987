use crate::action::{Action, Find, Operator};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::executor::{LastChange, VisualState, clamp_normal};
use crate::jump::JumpIndex;
use crate::key::{InputEvent, Key, parse_key, parse_keys};
use crate::marks::MarkStore;
use crate::parser::{Resolved, StateMachine};
use crate::registers::Registers;
use crate::traits::{Clipboard, Host, TextBuffer};
use crate::types::{DocumentChange, Mode, Selection, VisualKind};

/// One editing session: mode, partial input, registers, marks and the jump
/// index. Hosts feed it keys and change notifications.
#[derive(Debug)]
pub struct Engine {
    pub(crate) machine: StateMachine,
    pub(crate) registers: Registers,
    pub(crate) marks: MarkStore,
    pub(crate) jump: JumpIndex,
    pub(crate) config: EngineConfig,
    pub(crate) last_find: Option<Find>,
    pub(crate) preferred_col: Option<usize>,
    pub(crate) visual: Option<VisualState>,
    pub(crate) last_change: Option<LastChange>,
    /// Insert-mode typing extends `last_change`.
    pub(crate) recording: bool,
    pub(crate) replaying: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub preferred_col: Option<usize>,
    pub pending_count: Option<u32>,
    pub pending_operator: Option<Operator>,
    pub register: Option<char>,
}

pub struct EngineBuilder {
    mode: Mode,
    config: EngineConfig,
    clipboard: Option<Box<dyn Clipboard>>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            config: EngineConfig::default(),
            clipboard: None,
        }
    }
}

impl EngineBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Back the `*` and `+` registers with a clipboard.
    pub fn clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn build(self) -> Engine {
        let mut registers = Registers::new();
        if let Some(clipboard) = self.clipboard {
            registers.attach_clipboard(clipboard, self.config.mirror_unnamed_register);
        }
        Engine {
            machine: StateMachine::new(self.mode),
            registers,
            marks: MarkStore::new(),
            jump: JumpIndex::new(),
            config: self.config,
            last_find: None,
            preferred_col: None,
            visual: None,
            last_change: None,
            recording: false,
            replaying: false,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn marks(&self) -> &MarkStore {
        &self.marks
    }

    /// Label groups while in Jump mode.
    pub fn jump(&self) -> &JumpIndex {
        &self.jump
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.machine.mode(),
            preferred_col: self.preferred_col,
            pending_count: self.machine.pending_count(),
            pending_operator: self.machine.pending_operator().map(|p| p.op),
            register: self.machine.selected_register(),
        }
    }

    /// Feed one key. Returns the action it completed, if any.
    ///
    /// Host failures abandon the command: they are logged and the engine
    /// falls back to Normal mode.
    pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, input: InputEvent) -> Option<Action> {
        match self.dispatch(host, &input) {
            Ok(action) => action,
            Err(err) => {
                log::error!("command abandoned on {input:?}: {err}");
                self.reset(host);
                None
            }
        }
    }

    /// Feed one key in string notation (`"x"`, `"<esc>"`, `"<C-[>"`).
    pub fn process_key<H: Host + ?Sized>(&mut self, host: &mut H, key: &str) -> Option<Action> {
        match parse_key(key) {
            Some(input) => self.handle_event(host, input),
            None => {
                log::debug!("unrecognized key {key:?}");
                self.reset(host);
                None
            }
        }
    }

    /// Feed a whole key sequence, collecting the completed actions.
    pub fn process_keys<H: Host + ?Sized>(&mut self, host: &mut H, keys: &str) -> Vec<Action> {
        parse_keys(keys)
            .into_iter()
            .filter_map(|input| self.handle_event(host, input))
            .collect()
    }

    /// The host's selection changed. A non-empty selection in Normal mode
    /// enters Visual mode; an empty one in Visual mode leaves it.
    pub fn notify_selection_changed(&mut self, selections: &[Selection]) {
        let Some(primary) = selections.first() else {
            return;
        };
        match self.machine.mode() {
            Mode::Normal if !primary.is_empty() => {
                let (anchor, cursor) = if primary.active > primary.anchor {
                    (primary.anchor, primary.active - 1)
                } else {
                    (primary.anchor - 1, primary.active)
                };
                self.visual = Some(VisualState { anchor, cursor });
                self.machine.set_mode(Mode::Visual(VisualKind::CharWise));
            }
            Mode::Visual(_) if primary.is_empty() => {
                self.visual = None;
                self.machine.set_mode(Mode::Normal);
            }
            _ => {}
        }
    }

    /// The document changed; `changes` refer to the text before the change
    /// and `buf` is the text after it.
    pub fn notify_document_changed<B: TextBuffer + ?Sized>(&mut self, buf: &B, changes: &[DocumentChange]) {
        self.marks.apply_changes(buf, changes);
    }

    fn dispatch<H: Host + ?Sized>(&mut self, host: &mut H, input: &InputEvent) -> Result<Option<Action>> {
        let mode = self.machine.mode();
        let Some(key) = Key::from_input(input) else {
            if mode != Mode::Insert {
                log::debug!("unbound chord {input:?}");
                self.reset(host);
            }
            return Ok(None);
        };
        log::trace!("key {key:?} in {}", mode.as_str());

        if mode == Mode::Insert {
            match key {
                Key::Esc => self.leave_insert(host)?,
                Key::Backspace => self.backspace(host)?,
                Key::Char(c) => self.insert_text(host, c.encode_utf8(&mut [0; 4]))?,
            }
            return Ok(None);
        }

        match self.machine.resolve(key, &*host, &mut self.jump, &self.config) {
            Resolved::Incomplete => Ok(None),
            Resolved::Rejected => {
                log::debug!("{key:?} rejected in {}", self.machine.mode().as_str());
                self.reset(host);
                Ok(None)
            }
            Resolved::Action(action) => {
                log::debug!("resolved {action:?}");
                self.execute(host, action)?;
                Ok(Some(action))
            }
        }
    }

    /// Back to Normal mode with no partial input, collapsing any visual
    /// selection.
    fn reset<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.jump.clear();
        self.recording = false;
        if let Some(visual) = self.visual.take() {
            let cursor = clamp_normal(host, visual.cursor);
            if let Err(err) = host.set_selection(Selection::cursor(cursor)) {
                log::warn!("could not collapse selection: {err}");
            }
        }
        self.machine.set_mode(Mode::Normal);
    }
}
