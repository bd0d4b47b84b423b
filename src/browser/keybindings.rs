//! Keyboard shortcuts for tab actions.
//!
//! Maps platform-specific key chords onto the [`Action`]s a
//! [`TabTree`](crate::TabTree) can perform.
//!
//! # Default Bindings
//!
//! | Chord (X11/Windows) | Chord (macOS) | Action |
//! |---------------------|---------------|--------|
//! | `Esc` | `Esc` | [`Action::Stop`] |
//! | `Ctrl Tab` | `Ctrl Tab` | [`Action::SelectNextTab`] |
//! | `Ctrl Shift Tab` | `Ctrl Shift Tab` | [`Action::SelectPrevTab`] |
//! | `Ctrl t` | `Cmd t` | [`Action::NewTab`] |
//! | `Ctrl r` | `Cmd r` | [`Action::Reload`] |
//! | `Alt Left` | `Cmd Left` | [`Action::GoBack`] |
//! | `Alt Right` | `Cmd Right` | [`Action::GoForward`] |
//! | `Ctrl w` | `Cmd w` | [`Action::CloseTab`] |
//! | `Ctrl Shift +`, `Ctrl =` | `Cmd Shift +`, `Cmd =` | [`Action::ZoomIn`] |
//! | `Ctrl -` | `Cmd -` | [`Action::ZoomOut`] |
//! | `Ctrl 0` | `Cmd 0` | [`Action::ResetZoom`] |
//!
//! # Example
//!
//! ```
//! use browser_tabtree::{Action, KeyChord, Keymap, Platform};
//!
//! let keymap = Keymap::for_platform(Platform::X11);
//! let chord = KeyChord::parse("Ctrl", "t").unwrap();
//! assert_eq!(keymap.lookup(&chord), Some(Action::NewTab));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::Platform;
use crate::error::{Error, Result};

// ============================================================================
// Action
// ============================================================================

/// Something a shortcut can make the tab tree do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Stop loading the selected tab.
    Stop,
    /// Select the next tab, wrapping around.
    SelectNextTab,
    /// Select the previous tab, wrapping around.
    SelectPrevTab,
    /// Open a new, selected tab.
    NewTab,
    /// Reload the selected tab.
    Reload,
    /// Go back in the selected tab.
    GoBack,
    /// Go forward in the selected tab.
    GoForward,
    /// Close the selected tab, keeping its children.
    CloseTab,
    /// Zoom the selected tab in.
    ZoomIn,
    /// Zoom the selected tab out.
    ZoomOut,
    /// Reset the selected tab's zoom.
    ResetZoom,
}

impl Action {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::SelectNextTab => "select-next-tab",
            Self::SelectPrevTab => "select-prev-tab",
            Self::NewTab => "new-tab",
            Self::Reload => "reload",
            Self::GoBack => "go-back",
            Self::GoForward => "go-forward",
            Self::CloseTab => "close-tab",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::ResetZoom => "reset-zoom",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Key
// ============================================================================

/// A key, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Arrow Left
    ArrowLeft,
    /// Arrow Right
    ArrowRight,
    /// A printable character, stored lowercase.
    Char(char),
}

impl Key {
    /// Parses a key name.
    ///
    /// Accepts `Esc`, `Tab`, `Left`, `Right` (and their DOM names), a single
    /// character, or `code:<keyCode>` for the named keys.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        if let Some(code) = name.strip_prefix("code:") {
            return code.parse().ok().and_then(Self::from_key_code);
        }

        match name {
            "Esc" | "Escape" => Some(Self::Escape),
            "Tab" => Some(Self::Tab),
            "Left" | "ArrowLeft" => Some(Self::ArrowLeft),
            "Right" | "ArrowRight" => Some(Self::ArrowRight),
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?;
                chars
                    .next()
                    .is_none()
                    .then(|| Self::Char(c.to_ascii_lowercase()))
            }
        }
    }

    /// Maps a legacy keyCode onto a named key.
    #[must_use]
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            27 => Some(Self::Escape),
            9 => Some(Self::Tab),
            37 => Some(Self::ArrowLeft),
            39 => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Escape => f.write_str("Escape"),
            Self::Tab => f.write_str("Tab"),
            Self::ArrowLeft => f.write_str("ArrowLeft"),
            Self::ArrowRight => f.write_str("ArrowRight"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Modifier keys held with a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Control
    pub ctrl: bool,
    /// Shift
    pub shift: bool,
    /// Alt / Option
    pub alt: bool,
    /// Command / Super
    pub meta: bool,
}

impl Modifiers {
    /// No modifier.
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Control only.
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Control and Shift.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        ..Self::CTRL
    };

    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Command only.
    pub const CMD: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Command and Shift.
    pub const CMD_SHIFT: Self = Self {
        shift: true,
        ..Self::CMD
    };

    /// Parses a space-separated modifier list such as `"Ctrl Shift"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unknown modifier name.
    pub fn parse(list: &str) -> Result<Self> {
        let mut modifiers = Self::NONE;
        for name in list.split_whitespace() {
            match name {
                "Ctrl" => modifiers.ctrl = true,
                "Shift" => modifiers.shift = true,
                "Alt" => modifiers.alt = true,
                "Cmd" | "Meta" => modifiers.meta = true,
                other => {
                    return Err(Error::invalid_argument(format!(
                        "unknown modifier '{other}'"
                    )));
                }
            }
        }
        Ok(modifiers)
    }
}

// ============================================================================
// KeyChord
// ============================================================================

/// A key pressed with a set of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Held modifiers.
    pub modifiers: Modifiers,
    /// Pressed key.
    pub key: Key,
}

impl KeyChord {
    /// Creates a chord.
    #[inline]
    #[must_use]
    pub const fn new(modifiers: Modifiers, key: Key) -> Self {
        Self { modifiers, key }
    }

    /// Parses a chord from a modifier list and a key name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for unknown modifiers or keys.
    pub fn parse(modifiers: &str, key: &str) -> Result<Self> {
        let modifiers = Modifiers::parse(modifiers)?;
        let key =
            Key::parse(key).ok_or_else(|| Error::invalid_argument(format!("unknown key '{key}'")))?;
        Ok(Self::new(modifiers, key))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            ctrl,
            shift,
            alt,
            meta,
        } = self.modifiers;
        for (held, name) in [(ctrl, "Ctrl"), (shift, "Shift"), (alt, "Alt"), (meta, "Cmd")] {
            if held {
                write!(f, "{name} ")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

// ============================================================================
// Default Tables
// ============================================================================

const COMMON_BINDINGS: &[(Modifiers, Key, Action)] = &[
    (Modifiers::NONE, Key::Escape, Action::Stop),
    (Modifiers::CTRL, Key::Tab, Action::SelectNextTab),
    (Modifiers::CTRL_SHIFT, Key::Tab, Action::SelectPrevTab),
];

const DESKTOP_BINDINGS: &[(Modifiers, Key, Action)] = &[
    (Modifiers::CTRL, Key::Char('t'), Action::NewTab),
    (Modifiers::CTRL, Key::Char('r'), Action::Reload),
    (Modifiers::ALT, Key::ArrowLeft, Action::GoBack),
    (Modifiers::ALT, Key::ArrowRight, Action::GoForward),
    (Modifiers::CTRL, Key::Char('w'), Action::CloseTab),
    (Modifiers::CTRL_SHIFT, Key::Char('+'), Action::ZoomIn),
    (Modifiers::CTRL, Key::Char('='), Action::ZoomIn),
    (Modifiers::CTRL, Key::Char('-'), Action::ZoomOut),
    (Modifiers::CTRL, Key::Char('0'), Action::ResetZoom),
];

const MAC_BINDINGS: &[(Modifiers, Key, Action)] = &[
    (Modifiers::CMD, Key::Char('t'), Action::NewTab),
    (Modifiers::CMD, Key::Char('r'), Action::Reload),
    (Modifiers::CMD, Key::ArrowLeft, Action::GoBack),
    (Modifiers::CMD, Key::ArrowRight, Action::GoForward),
    (Modifiers::CMD, Key::Char('w'), Action::CloseTab),
    (Modifiers::CMD_SHIFT, Key::Char('+'), Action::ZoomIn),
    (Modifiers::CMD, Key::Char('='), Action::ZoomIn),
    (Modifiers::CMD, Key::Char('-'), Action::ZoomOut),
    (Modifiers::CMD, Key::Char('0'), Action::ResetZoom),
];

// ============================================================================
// Keymap
// ============================================================================

/// Chord-to-action table.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: FxHashMap<KeyChord, Action>,
}

impl Keymap {
    /// Creates an empty keymap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the default keymap for `platform`.
    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        let platform_bindings: &[(Modifiers, Key, Action)] = match platform {
            Platform::X11 | Platform::Windows => DESKTOP_BINDINGS,
            Platform::Mac => MAC_BINDINGS,
            Platform::Other => &[],
        };

        let mut keymap = Self::new();
        for &(modifiers, key, action) in COMMON_BINDINGS.iter().chain(platform_bindings) {
            keymap.bind(KeyChord::new(modifiers, key), action);
        }
        keymap
    }

    /// Binds `chord` to `action`, returning the action it replaced.
    pub fn bind(&mut self, chord: KeyChord, action: Action) -> Option<Action> {
        self.bindings.insert(chord, action)
    }

    /// Removes the binding for `chord`.
    pub fn unbind(&mut self, chord: &KeyChord) -> Option<Action> {
        self.bindings.remove(chord)
    }

    /// Returns the action bound to `chord`.
    #[inline]
    #[must_use]
    pub fn lookup(&self, chord: &KeyChord) -> Option<Action> {
        self.bindings.get(chord).copied()
    }

    /// Returns every chord bound to `action`.
    #[must_use]
    pub fn chords_for(&self, action: Action) -> Vec<KeyChord> {
        self.bindings
            .iter()
            .filter(|&(_, &bound)| bound == action)
            .map(|(&chord, _)| chord)
            .collect()
    }

    /// Returns the number of bindings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
