//! Standard keymaps compiled into the program
//!
//! These have the latest key functions bound to standard key chords and are
//! the reference the reconciler fills missing bindings from. Users start from
//! a copy of them and can revert to them at any time.

use super::function::KeyFun;
use super::keymap::KeySeqMap;
use super::registry::{KeyMaps, KeyMapsItem};
use super::types::KeySeq;

/// Name of the keymap used when nothing else is configured
///
/// Standard bindings on macOS and Windows, emacs-style navigation on Linux.
pub fn default_keymap_name() -> &'static str {
    if cfg!(target_os = "macos") {
        "MacStd"
    } else if cfg!(target_os = "windows") {
        "WindowsStd"
    } else {
        "LinuxEmacs"
    }
}

/// The canonical table for this platform
///
/// Falls back to an empty keymap if the default name is missing from the
/// standard set, which only a broken build could cause.
pub fn default_keymap() -> KeySeqMap {
    let std_maps = std_keymaps();
    match std_maps.map_by_name(default_keymap_name()) {
        Some((map, _)) => map.clone(),
        None => KeySeqMap::new(),
    }
}

fn seq_map(entries: &[(&str, &str, KeyFun)]) -> KeySeqMap {
    entries
        .iter()
        .map(|(k1, k2, fun)| (KeySeq::new(*k1, *k2), *fun))
        .collect()
}

/// Bindings shared by every standard map: the emacs-style `C-x` panel and
/// buffer commands
const CTRL_X_BASE: [(&str, &str, KeyFun); 7] = [
    ("Control+X", "o", KeyFun::NextPanel),
    ("Control+X", "p", KeyFun::PrevPanel),
    ("Control+X", "f", KeyFun::FileOpen),
    ("Control+X", "Control+F", KeyFun::FileOpen),
    ("Control+X", "b", KeyFun::BufferSelect),
    ("Control+X", "s", KeyFun::BufferSave),
    ("Control+C", "Control+C", KeyFun::ExecuteCommand),
];

// Each map also binds the line, search and open/save commands to the chords
// usual on its platform, so no standard map needs a placeholder.
fn with_base(extra: &[(&str, &str, KeyFun)]) -> KeySeqMap {
    let mut map = seq_map(&CTRL_X_BASE);
    for (keys, fun) in seq_map(extra).iter() {
        map.insert(keys.clone(), fun);
    }
    map
}

fn mac_std() -> KeySeqMap {
    with_base(&[
        ("Meta+L", "", KeyFun::GotoLine),
        ("Meta+F", "", KeyFun::SearchFile),
        ("Shift+Meta+F", "", KeyFun::SearchProject),
        ("Meta+O", "", KeyFun::FileOpen),
        ("Meta+S", "", KeyFun::BufferSave),
    ])
}

fn emacs() -> KeySeqMap {
    with_base(&[
        ("Alt+G", "g", KeyFun::GotoLine),
        ("Control+S", "", KeyFun::SearchFile),
        ("Alt+G", "s", KeyFun::SearchProject),
        ("Control+X", "Control+S", KeyFun::BufferSave),
    ])
}

fn pc_std() -> KeySeqMap {
    with_base(&[
        ("Control+L", "", KeyFun::GotoLine),
        ("Control+F", "", KeyFun::SearchFile),
        ("Shift+Control+F", "", KeyFun::SearchProject),
        ("Control+O", "", KeyFun::FileOpen),
        ("Control+S", "", KeyFun::BufferSave),
    ])
}

fn chrome_std() -> KeySeqMap {
    with_base(&[
        ("Control+G", "", KeyFun::GotoLine),
        ("Control+F", "", KeyFun::SearchFile),
        ("Shift+Control+F", "", KeyFun::SearchProject),
        ("Control+O", "", KeyFun::FileOpen),
        ("Control+S", "", KeyFun::BufferSave),
    ])
}

/// The compiled-in set of standard keymaps
pub fn std_keymaps() -> KeyMaps {
    KeyMaps::from_items(vec![
        KeyMapsItem::new("MacStd", "Standard Mac KeyMap", mac_std()),
        KeyMapsItem::new(
            "MacEmacs",
            "Mac with emacs-style navigation; emacs wins in conflicts",
            emacs(),
        ),
        KeyMapsItem::new("LinuxStd", "Standard Linux KeyMap", pc_std()),
        KeyMapsItem::new(
            "LinuxEmacs",
            "Linux with emacs-style navigation; emacs wins in conflicts",
            emacs(),
        ),
        KeyMapsItem::new("WindowsStd", "Standard Windows KeyMap", pc_std()),
        KeyMapsItem::new(
            "ChromeStd",
            "Standard chrome-browser and linux-under-chrome bindings",
            chrome_std(),
        ),
    ])
}
