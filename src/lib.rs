//! A modal (Vim-style) input engine for host editors.
//!
//! The host owns the text. [`Engine`] consumes keys one at a time, resolves
//! counts, operators, motions and text objects into an [`Action`], and
//! applies it through the [`Host`] trait. Registers, marks and jump labels
//! live in the engine for the lifetime of the session.
//!
//! ```ignore
//! let mut engine = Engine::new();
//! engine.process_keys(&mut buffer, "2dw");
//! ```

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
mod executor;
pub mod jump;
pub mod key;
pub mod marks;
pub mod motion;
pub mod object;
mod parser;
pub mod registers;
pub mod traits;
pub mod types;
pub mod word;

#[cfg(test)]
mod testing;

pub use crate::action::{
    Action, Find, FindKind, Instant, InstantAction, ModeChange, Motion, MotionAction,
    ObjectAction, ObjectKind, ObjectRange, Operator, OperatorAction, ReplaceAction,
};
pub use crate::config::EngineConfig;
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot};
pub use crate::error::{Error, HostError, Result};
pub use crate::jump::{JumpGroup, JumpIndex, JumpStep};
pub use crate::key::{InputEvent, KeyCode, KeyEvent, Modifiers, parse_key, parse_keys};
pub use crate::marks::MarkStore;
pub use crate::registers::{Register, Registers, UNNAMED};
#[cfg(feature = "clipboard")]
pub use crate::registers::SystemClipboard;
pub use crate::traits::{Clipboard, Host, TextBuffer};
pub use crate::types::{
    DocumentChange, Mode, MotionRange, Position, Selection, TextEdit, VisualKind,
};
