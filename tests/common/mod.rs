//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use chordmap::keymap::{KeyChord, KeyFun, KeyMaps, KeyMapsItem, KeySeq, KeySeqMap};

/// Shorthand for a chord
pub fn chord(s: &str) -> KeyChord {
    KeyChord::from(s)
}

/// A small user keymap: one two-key binding, one single-key binding
pub fn user_map() -> KeySeqMap {
    KeySeqMap::with_entries([
        (KeySeq::new("Control+X", "o"), KeyFun::NextPanel),
        (KeySeq::single("F3"), KeyFun::SearchFile),
    ])
}

/// The standard keymaps plus a custom one named `name`
pub fn registry_with(name: &str, map: KeySeqMap) -> KeyMaps {
    let mut maps = KeyMaps::standard();
    maps.push(KeyMapsItem::new(name, "custom test keymap", map));
    maps.set_changed(false);
    maps
}
