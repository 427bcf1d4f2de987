//! Mode state machine and key parser.
//!
//! Keys arrive one at a time. The machine either keeps accumulating
//! (counts, an operator, a one-key lookahead such as `f` or `"`), emits a
//! resolved [`Action`], or rejects the key. Rejected keys are absorbed; the
//! caller resets to Normal mode.

use crate::action::{
    Action, Find, FindKind, Instant, InstantAction, ModeChange, Motion, MotionAction,
    ObjectAction, ObjectKind, ObjectRange, Operator, OperatorAction, ReplaceAction,
};
use crate::config::EngineConfig;
use crate::jump::{JumpIndex, JumpStep};
use crate::key::Key;
use crate::traits::TextBuffer;
use crate::types::Mode;

#[derive(Debug, Default, Clone)]
struct Counts {
    current: Option<u32>,
}

impl Counts {
    fn push_digit(&mut self, d: u32) {
        let next = self
            .current
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(d);
        self.current = Some(next);
    }

    fn take(&mut self) -> Option<u32> {
        self.current.take()
    }
}

/// One-key lookahead: the next key is an argument, not a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    Find(FindKind),
    G,
    Replace,
    Register,
    MarkSet,
    MarkJump { linewise: bool },
    Object(ObjectRange),
    JumpSearch,
    JumpLabel { resume: Mode },
}

/// Outcome of feeding one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// Key accepted, command not complete yet.
    Incomplete,
    Action(Action),
    /// Key has no meaning here.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOperator {
    pub op: Operator,
    /// Count typed before the operator.
    pub count: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct StateMachine {
    mode: Mode,
    pending: Pending,
    counts: Counts,
    operator: Option<PendingOperator>,
    register: Option<char>,
}

impl StateMachine {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            pending: Pending::None,
            counts: Counts::default(),
            operator: None,
            register: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pending_count(&self) -> Option<u32> {
        self.counts.current
    }

    pub fn pending_operator(&self) -> Option<PendingOperator> {
        self.operator
    }

    pub fn selected_register(&self) -> Option<char> {
        self.register
    }

    /// Switch mode. Every transition drops all partial input.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            log::debug!("mode {} -> {}", self.mode.as_str(), mode.as_str());
        }
        self.mode = mode;
        self.pending = Pending::None;
        self.counts = Counts::default();
        self.operator = None;
        self.register = None;
    }

    /// Enter operator-pending, keeping a register selected beforehand.
    pub fn enter_operator_pending(&mut self, action: OperatorAction) {
        let register = self.register;
        self.set_mode(Mode::OperatorPending);
        self.operator = Some(PendingOperator {
            op: action.op,
            count: action.count,
        });
        self.register = register;
    }

    pub fn take_operator(&mut self) -> Option<PendingOperator> {
        self.operator.take()
    }

    pub fn take_register(&mut self) -> Option<char> {
        self.register.take()
    }

    pub fn resolve<B: TextBuffer + ?Sized>(
        &mut self,
        key: Key,
        buf: &B,
        jump: &mut JumpIndex,
        config: &EngineConfig,
    ) -> Resolved {
        let Key::Char(c) = key else {
            return Resolved::Rejected;
        };

        if self.pending != Pending::None {
            return self.complete_pending(c, buf, jump, config);
        }

        if self.mode == Mode::OperatorPending
            && let Some(pending) = self.operator
            && pending.op.key() == c
        {
            return self.motion(Motion::Line, 1);
        }

        if self.mode.is_visual()
            && let Some(instant) = Instant::visual_from_key(c)
        {
            return self.instant(instant);
        }

        // Leading zero is the 0 motion, not a count digit
        if let Some(d) = c.to_digit(10)
            && (d != 0 || self.counts.current.is_some())
        {
            self.counts.push_digit(d);
            return Resolved::Incomplete;
        }

        if let Some(motion) = single_key_motion(c) {
            let default_ = match motion {
                Motion::LastLine | Motion::Percent => 0,
                _ => 1,
            };
            return self.motion(motion, default_);
        }

        if let Some(kind) = FindKind::from_key(c) {
            return self.wait_for(Pending::Find(kind));
        }

        let pending = match c {
            'g' => Some(Pending::G),
            'r' => Some(Pending::Replace),
            'm' => Some(Pending::MarkSet),
            'Q' => Some(Pending::JumpSearch),
            '"' => Some(Pending::Register),
            '\'' => Some(Pending::MarkJump { linewise: true }),
            '`' => Some(Pending::MarkJump { linewise: false }),
            _ => None,
        };
        if let Some(pending) = pending {
            return self.wait_for(pending);
        }

        match self.mode {
            Mode::Normal => {
                if let Some(change) = mode_change_from_key(c) {
                    return Resolved::Action(Action::ChangeMode(change));
                }
                if let Some(op) = Operator::from_key(c) {
                    let count = self.counts.take();
                    return Resolved::Action(Action::Operator(OperatorAction { op, count }));
                }
                if let Some(instant) = Instant::normal_from_key(c) {
                    return self.instant(instant);
                }
            }
            Mode::Visual(_) | Mode::OperatorPending => match c {
                'i' => return self.wait_for(Pending::Object(ObjectRange::Inner)),
                'a' => return self.wait_for(Pending::Object(ObjectRange::Around)),
                _ => {}
            },
            Mode::Insert | Mode::Jump => {}
        }

        Resolved::Rejected
    }

    fn wait_for(&mut self, pending: Pending) -> Resolved {
        self.pending = pending;
        Resolved::Incomplete
    }

    fn complete_pending<B: TextBuffer + ?Sized>(
        &mut self,
        c: char,
        buf: &B,
        jump: &mut JumpIndex,
        config: &EngineConfig,
    ) -> Resolved {
        let pending = std::mem::replace(&mut self.pending, Pending::None);
        let editing = matches!(self.mode, Mode::Normal | Mode::Visual(_));
        match pending {
            Pending::None => Resolved::Rejected,
            Pending::Find(kind) => self.motion(Motion::Find(Find { kind, ch: c }), 1),
            Pending::G => match c {
                'g' => self.motion(Motion::FirstLine, 0),
                'I' if self.mode == Mode::Normal => {
                    Resolved::Action(Action::ChangeMode(ModeChange::InsertLineStart))
                }
                _ => Resolved::Rejected,
            },
            Pending::Replace if editing => {
                let count = self.counts.take().unwrap_or(1);
                Resolved::Action(Action::Replace(ReplaceAction { count, ch: c }))
            }
            Pending::MarkSet if editing => self.instant(Instant::SetMark(c)),
            Pending::Replace | Pending::MarkSet => Resolved::Rejected,
            Pending::Register => {
                if c.is_alphanumeric() || matches!(c, '"' | '*' | '+' | '-') {
                    self.register = Some(c);
                    Resolved::Incomplete
                } else {
                    Resolved::Rejected
                }
            }
            Pending::MarkJump { linewise } => self.motion(Motion::Mark { name: c, linewise }, 1),
            Pending::Object(range) => match ObjectKind::from_key(c) {
                Some(kind) => {
                    let count = self.composed_count(1);
                    Resolved::Action(Action::Object(ObjectAction { count, range, kind }))
                }
                None => Resolved::Rejected,
            },
            Pending::JumpSearch => {
                let step = jump.start(buf, c, &config.jump_labels, config.jump_ignore_case);
                self.jump_step(step, self.mode)
            }
            Pending::JumpLabel { resume } => {
                let step = jump.advance(c, &config.jump_labels);
                self.jump_step(step, resume)
            }
        }
    }

    fn jump_step(&mut self, step: JumpStep, resume: Mode) -> Resolved {
        match step {
            JumpStep::Resolved(target) => {
                // back to where the jump started, pending operator intact
                self.mode = resume;
                self.motion(Motion::Jump { target }, 1)
            }
            JumpStep::Narrowed => {
                if self.mode != Mode::Jump {
                    log::debug!("mode {} -> {}", self.mode.as_str(), Mode::Jump.as_str());
                }
                self.mode = Mode::Jump;
                self.wait_for(Pending::JumpLabel { resume })
            }
            JumpStep::Aborted => Resolved::Rejected,
        }
    }

    /// `count(motion) * count(operator)`, each defaulting to 1; `default_`
    /// when neither was typed.
    fn composed_count(&mut self, default_: u32) -> u32 {
        let entered = self.counts.take();
        let operator = self.operator.and_then(|p| p.count);
        match (entered, operator) {
            (None, None) => default_,
            (entered, operator) => entered.unwrap_or(1).saturating_mul(operator.unwrap_or(1)),
        }
    }

    fn motion(&mut self, motion: Motion, default_: u32) -> Resolved {
        let count = self.composed_count(default_);
        Resolved::Action(Action::Motion(MotionAction { count, motion }))
    }

    fn instant(&mut self, instant: Instant) -> Resolved {
        // `.` without a count keeps the recorded one
        let default_ = match instant {
            Instant::RepeatLastChange => 0,
            _ => 1,
        };
        let count = self.counts.take().unwrap_or(default_);
        Resolved::Action(Action::Instant(InstantAction { count, instant }))
    }
}

fn single_key_motion(c: char) -> Option<Motion> {
    let motion = match c {
        '0' => Motion::LineStart,
        'w' => Motion::WordForward { big: false },
        'W' => Motion::WordForward { big: true },
        'e' => Motion::WordEnd { big: false },
        'E' => Motion::WordEnd { big: true },
        'b' => Motion::WordBackward { big: false },
        'B' => Motion::WordBackward { big: true },
        'h' => Motion::Left,
        'j' => Motion::Down,
        'k' => Motion::Up,
        'l' => Motion::Right,
        '$' => Motion::LineEnd,
        '^' => Motion::FirstNonBlank,
        'G' => Motion::LastLine,
        '-' => Motion::LineUp,
        '+' | '\n' => Motion::LineDown,
        '_' => Motion::LineDownLess,
        ';' => Motion::RepeatFind { reverse: false },
        ',' => Motion::RepeatFind { reverse: true },
        '%' => Motion::Percent,
        _ => return None,
    };
    Some(motion)
}

fn mode_change_from_key(c: char) -> Option<ModeChange> {
    let change = match c {
        'i' => ModeChange::Insert,
        'I' => ModeChange::InsertFirstNonBlank,
        'a' => ModeChange::Append,
        'A' => ModeChange::AppendLineEnd,
        'o' => ModeChange::OpenBelow,
        'O' => ModeChange::OpenAbove,
        'v' => ModeChange::Visual,
        'V' => ModeChange::VisualLine,
        _ => return None,
    };
    Some(change)
}
