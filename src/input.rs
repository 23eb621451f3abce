use egui::{Key, Modifiers, Pos2};

use crate::block::BlockId;
use crate::tools::ResizeHandle;

/// What the pointer was pressed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// Empty container area
    Container,
    Block(BlockId),
    ResizeHandle { block: BlockId, handle: ResizeHandle },
}

/// Input events the editor reacts to, in screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        target: PointerTarget,
        position: Pos2,
        modifiers: Modifiers,
    },
    /// Pointer moved while a button is held
    PointerMove {
        position: Pos2,
        modifiers: Modifiers,
    },
    PointerUp {
        position: Pos2,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
        /// Another interactive element (text field, select, ...) has focus
        focus_elsewhere: bool,
    },
}

/// Canonical chord for a key press: `ctrl`, `shift`, `alt`, then the key
/// name, joined by `+`. The macOS command key counts as `ctrl`.
pub fn key_chord(key: Key, modifiers: Modifiers) -> String {
    let mut parts = Vec::with_capacity(4);
    if modifiers.ctrl || modifiers.mac_cmd || modifiers.command {
        parts.push("ctrl".to_owned());
    }
    if modifiers.shift {
        parts.push("shift".to_owned());
    }
    if modifiers.alt {
        parts.push("alt".to_owned());
    }
    parts.push(key_name(key));
    parts.join("+")
}

/// Lower-case name used in keyboard bindings
pub fn key_name(key: Key) -> String {
    match key {
        Key::ArrowUp => "up".to_owned(),
        Key::ArrowDown => "down".to_owned(),
        Key::ArrowLeft => "left".to_owned(),
        Key::ArrowRight => "right".to_owned(),
        Key::Backspace => "backspace".to_owned(),
        Key::Delete => "delete".to_owned(),
        Key::Enter => "enter".to_owned(),
        Key::Escape => "esc".to_owned(),
        Key::Space => "space".to_owned(),
        Key::Tab => "tab".to_owned(),
        other => other.name().to_ascii_lowercase(),
    }
}

/// Normalizes a binding written by hand (`"Ctrl+Shift+Z"`) to chord form
pub fn normalize_binding(binding: &str) -> String {
    binding
        .split('+')
        .map(|part| part.trim().to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_come_in_fixed_order() {
        let modifiers = Modifiers {
            alt: true,
            shift: true,
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(key_chord(Key::Z, modifiers), "ctrl+shift+alt+z");
        assert_eq!(key_chord(Key::Delete, Modifiers::NONE), "delete");
        assert_eq!(key_chord(Key::ArrowUp, Modifiers::CTRL), "ctrl+up");
    }

    #[test]
    fn mac_command_counts_as_ctrl() {
        assert_eq!(key_chord(Key::Y, Modifiers::MAC_CMD), "ctrl+y");
    }

    #[test]
    fn bindings_are_normalized() {
        assert_eq!(normalize_binding("Ctrl + Shift+Z"), "ctrl+shift+z");
    }
}
