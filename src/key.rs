/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A character key, already shifted ('A' rather than SHIFT + 'a').
    Char(char),
    /// The Escape key, used to exit modes and cancel pending commands.
    Esc,
    /// The Enter/Return key. Behaves as `\n`.
    Enter,
    /// The Backspace key; only meaningful in Insert mode.
    Backspace,
    /// The Tab key; only meaningful in Insert mode.
    Tab,
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::empty(),
        }
    }
}

/// Input events that can be processed by the engine.
///
/// This enum distinguishes between key presses (used for commands)
/// and text input (composed characters from an IME, for instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press event, typically used for commands and navigation.
    Key(KeyEvent),
    /// A character received as text input.
    ReceivedChar(char),
}

/// What the engine actually dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Key {
    Char(char),
    Esc,
    Backspace,
}

impl Key {
    /// Decode an input event. Chords other than `Ctrl-[` have no meaning and
    /// decode to `None`.
    pub(crate) fn from_input(input: &InputEvent) -> Option<Key> {
        match input {
            InputEvent::ReceivedChar(c) => Some(Key::Char(*c)),
            InputEvent::Key(ev) => {
                let chord = ev.mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META);
                match ev.code {
                    KeyCode::Char('[') if ev.mods == Modifiers::CTRL => Some(Key::Esc),
                    _ if chord => None,
                    KeyCode::Char(c) => Some(Key::Char(c)),
                    KeyCode::Esc => Some(Key::Esc),
                    KeyCode::Enter => Some(Key::Char('\n')),
                    KeyCode::Tab => Some(Key::Char('\t')),
                    KeyCode::Backspace => Some(Key::Backspace),
                }
            }
        }
    }
}

/// Parse one key in string notation: a single character, or one of
/// `<esc>`, `<cr>`, `<enter>`, `<bs>`, `<tab>`, `<lt>`, `<space>` and
/// `<C-x>` chords. Names are case-insensitive.
pub fn parse_key(s: &str) -> Option<InputEvent> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(key_event(match c {
            '\n' | '\r' => KeyCode::Enter,
            '\t' => KeyCode::Tab,
            '\u{1b}' => KeyCode::Esc,
            c => KeyCode::Char(c),
        }));
    }
    let name = s.strip_prefix('<')?.strip_suffix('>')?;
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "esc" => KeyCode::Esc,
        "cr" | "enter" | "return" => KeyCode::Enter,
        "bs" | "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "lt" => KeyCode::Char('<'),
        "space" => KeyCode::Char(' '),
        _ => {
            let rest = lower.strip_prefix("c-")?;
            let mut rest = rest.chars();
            let (Some(c), None) = (rest.next(), rest.next()) else {
                return None;
            };
            return Some(InputEvent::Key(KeyEvent {
                code: KeyCode::Char(c),
                mods: Modifiers::CTRL,
            }));
        }
    };
    Some(key_event(code))
}

/// Split a key sequence such as `"ciwfoo<esc>"` into events.
///
/// A `<` that does not open a recognized name is taken literally.
pub fn parse_keys(s: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(close) = rest.find('>')
            && let Some(ev) = parse_key(&rest[..=close])
        {
            events.push(ev);
            rest = &rest[close + 1..];
            continue;
        }
        if let Some(ev) = parse_key(&rest[..c.len_utf8()]) {
            events.push(ev);
        }
        rest = &rest[c.len_utf8()..];
    }
    events
}

fn key_event(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::plain(code))
}
