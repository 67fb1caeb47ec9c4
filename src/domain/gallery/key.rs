// SPDX-License-Identifier: MPL-2.0
//! Keyboard keys understood by the viewer.

use std::fmt;

/// A key press delivered by the host, named after DOM `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    /// Any key the viewer has no shortcut for.
    Other(String),
}

impl Key {
    /// Parses a DOM key name. Unknown names map to [`Key::Other`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Escape => write!(f, "Escape"),
            Key::ArrowLeft => write!(f, "ArrowLeft"),
            Key::ArrowRight => write!(f, "ArrowRight"),
            Key::Other(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dom_names_and_legacy_aliases() {
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("Left"), Key::ArrowLeft);
        assert_eq!(Key::from_name("ArrowRight"), Key::ArrowRight);
    }

    #[test]
    fn unknown_names_are_preserved() {
        let key = Key::from_name("Enter");
        assert_eq!(key, Key::Other("Enter".to_string()));
        assert_eq!(key.to_string(), "Enter");
    }
}
