//! KeyFun enum: the editor functions a key sequence can trigger
//!
//! These are the top-level functions for controlling the editor as a whole
//! (moving between panels, opening files, running commands). The two
//! sentinels `Nil` and `NeedsSecondKey` are never stored in a keymap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Legacy prefix accepted when parsing function names (`KeyFunNextPanel`)
const LEGACY_PREFIX: &str = "KeyFun";

/// Function triggered by a key sequence
///
/// Declaration order is significant: it is the ordinal used when sorting
/// keymap entries by function during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum KeyFun {
    /// No function; also what an unknown (retired) name parses to
    #[default]
    Nil,
    /// Internal signal from the resolver: the chord starts a two-key sequence
    NeedsSecondKey,

    // ========================================================================
    // Panels
    // ========================================================================
    /// Move to the next panel to the right
    NextPanel,
    /// Move to the previous panel to the left
    PrevPanel,

    // ========================================================================
    // Navigation / search
    // ========================================================================
    /// Go to a specific line number in the active text view
    GotoLine,
    /// Search / replace within the active text view
    SearchFile,
    /// Search / replace across the entire project
    SearchProject,

    // ========================================================================
    // Files and buffers
    // ========================================================================
    /// Open a file in the active text view
    FileOpen,
    /// Select an open buffer to edit in the active text view
    BufferSelect,
    /// Save the active buffer to its file
    BufferSave,

    /// Execute a command on the active buffer
    ExecuteCommand,
}

impl KeyFun {
    /// Every real command, in ordinal order (sentinels excluded)
    pub const COMMANDS: [KeyFun; 9] = [
        KeyFun::NextPanel,
        KeyFun::PrevPanel,
        KeyFun::GotoLine,
        KeyFun::SearchFile,
        KeyFun::SearchProject,
        KeyFun::FileOpen,
        KeyFun::BufferSelect,
        KeyFun::BufferSave,
        KeyFun::ExecuteCommand,
    ];

    /// Check if this is a real command (not `Nil` or `NeedsSecondKey`)
    #[inline]
    pub fn is_command(self) -> bool {
        !matches!(self, KeyFun::Nil | KeyFun::NeedsSecondKey)
    }

    /// Identifier used in persisted keymaps
    pub fn name(self) -> &'static str {
        match self {
            KeyFun::Nil => "Nil",
            KeyFun::NeedsSecondKey => "NeedsSecondKey",
            KeyFun::NextPanel => "NextPanel",
            KeyFun::PrevPanel => "PrevPanel",
            KeyFun::GotoLine => "GotoLine",
            KeyFun::SearchFile => "SearchFile",
            KeyFun::SearchProject => "SearchProject",
            KeyFun::FileOpen => "FileOpen",
            KeyFun::BufferSelect => "BufferSelect",
            KeyFun::BufferSave => "BufferSave",
            KeyFun::ExecuteCommand => "ExecuteCommand",
        }
    }

    /// Human-readable name for menus and keymap editors
    pub fn display_name(self) -> &'static str {
        match self {
            KeyFun::Nil => "None",
            KeyFun::NeedsSecondKey => "Needs Second Key",
            KeyFun::NextPanel => "Next Panel",
            KeyFun::PrevPanel => "Previous Panel",
            KeyFun::GotoLine => "Go to Line",
            KeyFun::SearchFile => "Find in File",
            KeyFun::SearchProject => "Find in Project",
            KeyFun::FileOpen => "Open File",
            KeyFun::BufferSelect => "Select Buffer",
            KeyFun::BufferSave => "Save Buffer",
            KeyFun::ExecuteCommand => "Execute Command",
        }
    }
}

impl fmt::Display for KeyFun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a function name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyFun(pub String);

impl fmt::Display for UnknownKeyFun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key function: {}", self.0)
    }
}

impl std::error::Error for UnknownKeyFun {}

impl FromStr for KeyFun {
    type Err = UnknownKeyFun;

    /// Accepts `NextPanel`, `KeyFunNextPanel` and any casing of either
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = match trimmed.get(..LEGACY_PREFIX.len()) {
            Some(prefix)
                if prefix.eq_ignore_ascii_case(LEGACY_PREFIX)
                    && trimmed.len() > LEGACY_PREFIX.len() =>
            {
                &trimmed[LEGACY_PREFIX.len()..]
            }
            _ => trimmed,
        };

        let all = std::iter::once(KeyFun::Nil)
            .chain(std::iter::once(KeyFun::NeedsSecondKey))
            .chain(KeyFun::COMMANDS);
        for fun in all {
            if fun.name().eq_ignore_ascii_case(bare) {
                return Ok(fun);
            }
        }
        Err(UnknownKeyFun(s.to_string()))
    }
}

impl Serialize for KeyFun {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// Unknown names become Nil rather than an error so an old keymap file with a
// renamed function still loads; the reconciler then drops those entries.
impl<'de> Deserialize<'de> for KeyFun {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or(KeyFun::Nil))
    }
}
