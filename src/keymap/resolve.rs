//! Resolving observed key chords to functions
//!
//! The resolver reads an [`ActiveKeymap`]: a reconciled keymap together with
//! the set of chords that begin a two-key sequence in it.

use std::collections::HashSet;

use super::function::KeyFun;
use super::keymap::KeySeqMap;
use super::types::{KeyChord, KeySeq};

/// First chords of every two-key sequence in a keymap
///
/// Derived data: always rebuilt from the whole keymap, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeedsSecondKeys {
    prefixes: HashSet<KeyChord>,
}

impl NeedsSecondKeys {
    /// Build the prefix set for a keymap
    pub fn from_map(map: &KeySeqMap) -> Self {
        let prefixes = map
            .iter()
            .filter(|(keys, _)| keys.is_two_key())
            .map(|(keys, _)| keys.key1.clone())
            .collect();
        Self { prefixes }
    }

    /// Check if the chord must be followed by a second one
    pub fn contains(&self, key1: &KeyChord) -> bool {
        self.prefixes.contains(key1)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyChord> {
        self.prefixes.iter()
    }
}

/// The keymap currently used to resolve input, with its prefix index
#[derive(Debug, Clone, Default)]
pub struct ActiveKeymap {
    name: String,
    map: KeySeqMap,
    needs_second: NeedsSecondKeys,
}

impl ActiveKeymap {
    /// Wrap an already reconciled keymap, building its prefix index
    pub fn new(name: impl Into<String>, map: KeySeqMap) -> Self {
        let needs_second = NeedsSecondKeys::from_map(&map);
        Self {
            name: name.into(),
            map,
            needs_second,
        }
    }

    /// Name of the keymap in its registry
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn map(&self) -> &KeySeqMap {
        &self.map
    }

    pub fn needs_second(&self) -> &NeedsSecondKeys {
        &self.needs_second
    }

    /// Translate one or two observed chords into a function
    ///
    /// Returns [`KeyFun::NeedsSecondKey`] when only `key1` is given and it
    /// starts a two-key sequence; the caller should hold on to `key1` and
    /// call again once the next chord arrives. When both chords are given the
    /// pair is looked up directly, whether or not `key1` is a known prefix.
    pub fn resolve(&self, key1: &KeyChord, key2: &KeyChord) -> KeyFun {
        if key1.is_empty() {
            return KeyFun::Nil;
        }

        if key2.is_empty() && self.needs_second.contains(key1) {
            return KeyFun::NeedsSecondKey;
        }

        let keys = KeySeq {
            key1: key1.clone(),
            key2: key2.clone(),
        };
        self.map.lookup(&keys).unwrap_or(KeyFun::Nil)
    }
}
