// Keysym values follow the X11 keysym table; key codes follow the virtual
// key space the peer expects (letters and digits share their ASCII value).
use super::modifiers::{Modifiers, RawState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const UNDEFINED: KeyCode = KeyCode(0x00);
    pub const BACK_SPACE: KeyCode = KeyCode(0x08);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0A);
    pub const SHIFT: KeyCode = KeyCode(0x10);
    pub const CONTROL: KeyCode = KeyCode(0x11);
    pub const ALT: KeyCode = KeyCode(0x12);
    pub const PAUSE: KeyCode = KeyCode(0x13);
    pub const CAPS_LOCK: KeyCode = KeyCode(0x14);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);
    pub const END: KeyCode = KeyCode(0x23);
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);
    pub const COMMA: KeyCode = KeyCode(0x2C);
    pub const MINUS: KeyCode = KeyCode(0x2D);
    pub const PERIOD: KeyCode = KeyCode(0x2E);
    pub const SLASH: KeyCode = KeyCode(0x2F);
    pub const DIGIT0: KeyCode = KeyCode(0x30);
    pub const SEMICOLON: KeyCode = KeyCode(0x3B);
    pub const EQUALS: KeyCode = KeyCode(0x3D);
    pub const A: KeyCode = KeyCode(0x41);
    pub const OPEN_BRACKET: KeyCode = KeyCode(0x5B);
    pub const BACK_SLASH: KeyCode = KeyCode(0x5C);
    pub const CLOSE_BRACKET: KeyCode = KeyCode(0x5D);
    pub const NUMPAD0: KeyCode = KeyCode(0x60);
    pub const F1: KeyCode = KeyCode(0x70);
    pub const DELETE: KeyCode = KeyCode(0x7F);
    pub const INSERT: KeyCode = KeyCode(0x9B);
    pub const META: KeyCode = KeyCode(0x9D);
    pub const BACK_QUOTE: KeyCode = KeyCode(0xC0);
    pub const QUOTE: KeyCode = KeyCode(0xDE);
    pub const WINDOWS: KeyCode = KeyCode(0x020C);
    pub const CONTEXT_MENU: KeyCode = KeyCode(0x020D);

    pub fn from_keysym(keysym: u32) -> Self {
        match keysym {
            0x0020 => Self::SPACE,
            0x0027 | 0x0022 => Self::QUOTE,
            0x002C | 0x003C => Self::COMMA,
            0x002D | 0x005F => Self::MINUS,
            0x002E | 0x003E => Self::PERIOD,
            0x002F | 0x003F => Self::SLASH,
            0x0030..=0x0039 => KeyCode(keysym as u16),
            0x003B | 0x003A => Self::SEMICOLON,
            0x003D | 0x002B => Self::EQUALS,
            // upper and lower case letters share a key
            0x0041..=0x005A => KeyCode(keysym as u16),
            0x0061..=0x007A => KeyCode((keysym - 0x20) as u16),
            0x005B | 0x007B => Self::OPEN_BRACKET,
            0x005C | 0x007C => Self::BACK_SLASH,
            0x005D | 0x007D => Self::CLOSE_BRACKET,
            0x0060 | 0x007E => Self::BACK_QUOTE,
            0xFF08 => Self::BACK_SPACE,
            0xFF09 | 0xFE20 => Self::TAB,
            0xFF0D | 0xFF8D => Self::ENTER,
            0xFF13 => Self::PAUSE,
            0xFF1B => Self::ESCAPE,
            0xFF50 => Self::HOME,
            0xFF51 => Self::LEFT,
            0xFF52 => Self::UP,
            0xFF53 => Self::RIGHT,
            0xFF54 => Self::DOWN,
            0xFF55 => Self::PAGE_UP,
            0xFF56 => Self::PAGE_DOWN,
            0xFF57 => Self::END,
            0xFF63 => Self::INSERT,
            0xFF67 => Self::CONTEXT_MENU,
            0xFFB0..=0xFFB9 => KeyCode(Self::NUMPAD0.0 + (keysym - 0xFFB0) as u16),
            0xFFBE..=0xFFC9 => KeyCode(Self::F1.0 + (keysym - 0xFFBE) as u16),
            0xFFE1 | 0xFFE2 => Self::SHIFT,
            0xFFE3 | 0xFFE4 => Self::CONTROL,
            0xFFE5 => Self::CAPS_LOCK,
            0xFFE7 | 0xFFE8 => Self::META,
            0xFFE9 | 0xFFEA | 0xFE03 => Self::ALT,
            0xFFEB | 0xFFEC => Self::WINDOWS,
            0xFFFF => Self::DELETE,
            _ => Self::UNDEFINED,
        }
    }

    /// Modifier bit a key contributes while it is held.
    pub fn modifier(self) -> Modifiers {
        match self {
            Self::SHIFT => Modifiers::SHIFT,
            Self::CONTROL => Modifiers::CONTROL,
            Self::ALT => Modifiers::ALT,
            Self::META | Self::WINDOWS => Modifiers::META,
            _ => Modifiers::empty(),
        }
    }
}

/// Character produced by a keysym, if any.
pub fn keysym_to_char(keysym: u32) -> Option<char> {
    let code = match keysym {
        0x0020..=0x007E | 0x00A0..=0x00FF => keysym,
        0x0100_0000..=0x0110_FFFF => keysym - 0x0100_0000,
        0xFF08 => 0x08,
        0xFF09 => 0x09,
        0xFF0D | 0xFF8D => 0x0D,
        0xFF1B => 0x1B,
        0xFFFF => 0x7F,
        0xFF80 => 0x20,
        0xFFAA => u32::from('*'),
        0xFFAB => u32::from('+'),
        0xFFAD => u32::from('-'),
        0xFFAE => u32::from('.'),
        0xFFAF => u32::from('/'),
        0xFFB0..=0xFFB9 => u32::from('0') + (keysym - 0xFFB0),
        _ => return None,
    };
    char::from_u32(code).filter(|c| *c != '\0')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Press,
    Release,
    Typed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedKey {
    pub kind: KeyKind,
    pub key_code: KeyCode,
    pub chars: String,
    pub modifiers: Modifiers,
}

impl NormalizedKey {
    /// The follow-up `Typed` event for a press that produced a character.
    pub fn typed(&self) -> Option<NormalizedKey> {
        if self.kind != KeyKind::Press || self.chars.is_empty() {
            return None;
        }
        Some(NormalizedKey {
            kind: KeyKind::Typed,
            key_code: KeyCode::UNDEFINED,
            chars: self.chars.clone(),
            modifiers: self.modifiers,
        })
    }
}

/// Normalizes a raw key press or release.
///
/// Modifier keys update the reported modifier set to the state after the
/// event. With Control held, lower-case letters become control characters
/// (`a` is 1, `z` is 26).
pub fn normalize_key(keysym: u32, state: RawState, press: bool) -> NormalizedKey {
    let key_code = KeyCode::from_keysym(keysym);
    let mut modifiers = Modifiers::from_raw(state);
    if press {
        modifiers |= key_code.modifier();
    } else {
        modifiers -= key_code.modifier();
    }

    let mut ch = keysym_to_char(keysym);
    if let Some(c) = ch
        && c.is_ascii_lowercase()
        && state.contains(RawState::CONTROL)
    {
        ch = char::from_u32(u32::from(c) - u32::from('a') + 1);
    }

    NormalizedKey {
        kind: if press { KeyKind::Press } else { KeyKind::Release },
        key_code,
        chars: ch.map(String::from).unwrap_or_default(),
        modifiers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_letters_become_control_chars() {
        let a = normalize_key(u32::from('a'), RawState::CONTROL, true);
        assert_eq!(a.chars, "\u{1}");
        assert_eq!(a.key_code, KeyCode::A);
        let z = normalize_key(u32::from('z'), RawState::CONTROL, true);
        assert_eq!(z.chars, "\u{1a}");
        assert_eq!(z.typed().map(|t| t.chars), Some("\u{1a}".to_string()));
    }

    #[test]
    fn upper_case_is_not_transformed() {
        let k = normalize_key(u32::from('A'), RawState::CONTROL | RawState::SHIFT, true);
        assert_eq!(k.chars, "A");
    }

    #[test]
    fn function_keys_have_no_chars() {
        let f1 = normalize_key(0xFFBE, RawState::empty(), true);
        assert_eq!(f1.key_code, KeyCode::F1);
        assert!(f1.chars.is_empty());
        assert!(f1.typed().is_none());
    }

    #[test]
    fn release_never_types() {
        let k = normalize_key(u32::from('q'), RawState::empty(), false);
        assert_eq!(k.kind, KeyKind::Release);
        assert!(k.typed().is_none());
    }

    #[test]
    fn modifier_key_press_and_release_update_mask() {
        let press = normalize_key(0xFFE1, RawState::empty(), true);
        assert_eq!(press.modifiers, Modifiers::SHIFT);
        // platform still reports shift held while it is being released
        let release = normalize_key(0xFFE1, RawState::SHIFT, false);
        assert!(release.modifiers.is_empty());
    }

    #[test]
    fn keypad_and_unicode_keysyms() {
        assert_eq!(keysym_to_char(0xFFB7), Some('7'));
        assert_eq!(keysym_to_char(0x0100_20AC), Some('€'));
        assert_eq!(keysym_to_char(0xFFE1), None);
        assert_eq!(KeyCode::from_keysym(0xFFB7), KeyCode(0x67));
    }
}
