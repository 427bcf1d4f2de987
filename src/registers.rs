//! Named copy/delete buffers.
//!
//! Every write replaces the register's previous contents. `"` is the
//! unnamed register used when no name is selected. `*` and `+` go to the
//! attached clipboard, if any.

use std::collections::HashMap;
use std::fmt;

use crate::traits::Clipboard;

pub const UNNAMED: char = '"';

/// Content stored in a register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    /// Whether this is line-wise content.
    pub linewise: bool,
    /// The text content. Line-wise text always ends with a line break.
    pub text: String,
}

impl Register {
    pub fn new(linewise: bool, text: impl Into<String>) -> Self {
        Self {
            linewise,
            text: text.into(),
        }
    }
}

#[derive(Default)]
pub struct Registers {
    slots: HashMap<char, Register>,
    clipboard: Option<Box<dyn Clipboard>>,
    mirror_unnamed: bool,
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registers")
            .field("slots", &self.slots)
            .field("clipboard", &self.clipboard.is_some())
            .field("mirror_unnamed", &self.mirror_unnamed)
            .finish()
    }
}

fn is_clipboard(name: char) -> bool {
    matches!(name, '*' | '+')
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a clipboard. With `mirror_unnamed`, writes to `"` are copied
    /// to it as well.
    pub fn attach_clipboard(&mut self, clipboard: Box<dyn Clipboard>, mirror_unnamed: bool) {
        self.clipboard = Some(clipboard);
        self.mirror_unnamed = mirror_unnamed;
    }

    pub fn write(&mut self, name: char, linewise: bool, text: String) {
        log::debug!("register '{name}' <- {} chars (linewise: {linewise})", text.chars().count());
        if is_clipboard(name) || (name == UNNAMED && self.mirror_unnamed) {
            if let Some(clipboard) = self.clipboard.as_mut() {
                clipboard.set(text.clone());
            }
        }
        self.slots.insert(name, Register { linewise, text });
    }

    pub fn read(&mut self, name: char) -> Option<Register> {
        if is_clipboard(name)
            && let Some(clipboard) = self.clipboard.as_mut()
        {
            return clipboard.get().map(|text| Register {
                linewise: text.ends_with('\n'),
                text,
            });
        }
        self.slots.get(&name).cloned()
    }
}

#[cfg(feature = "clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "clipboard")]
mod system {
    use crate::error::Result;
    use crate::traits::Clipboard;

    /// The desktop clipboard, through `arboard`.
    pub struct SystemClipboard {
        inner: arboard::Clipboard,
    }

    impl SystemClipboard {
        pub fn new() -> Result<Self> {
            Ok(Self {
                inner: arboard::Clipboard::new()?,
            })
        }
    }

    impl Clipboard for SystemClipboard {
        fn get(&mut self) -> Option<String> {
            self.inner.get_text().ok()
        }

        fn set(&mut self, text: String) {
            if let Err(err) = self.inner.set_text(text) {
                log::warn!("clipboard write failed: {err}");
            }
        }
    }
}
