//! KeySeqMap: the table mapping key sequences to functions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::KeymapEntry;
use super::function::KeyFun;
use super::types::KeySeq;

/// Mapping from key sequence to function
///
/// Each sequence has exactly one function, but several sequences may trigger
/// the same function. Entries are kept ordered by sequence so iteration (and
/// therefore [`KeySeqMap::chord_for_fun`]) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySeqMap {
    map: BTreeMap<KeySeq, KeyFun>,
}

impl KeySeqMap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap from (sequence, function) pairs; later pairs win
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (KeySeq, KeyFun)>,
    {
        Self {
            map: entries.into_iter().collect(),
        }
    }

    /// Bind a sequence, returning the function it was previously bound to
    pub fn insert(&mut self, keys: KeySeq, fun: KeyFun) -> Option<KeyFun> {
        self.map.insert(keys, fun)
    }

    pub fn remove(&mut self, keys: &KeySeq) -> Option<KeyFun> {
        self.map.remove(keys)
    }

    /// Look up the function bound to a sequence
    pub fn lookup(&self, keys: &KeySeq) -> Option<KeyFun> {
        self.map.get(keys).copied()
    }

    pub fn contains(&self, keys: &KeySeq) -> bool {
        self.map.contains_key(keys)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate entries in sequence order
    pub fn iter(&self) -> impl Iterator<Item = (&KeySeq, KeyFun)> {
        self.map.iter().map(|(k, f)| (k, *f))
    }

    /// Keep only the entries for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&KeySeq, KeyFun) -> bool) {
        self.map.retain(|k, f| keep(k, *f));
    }

    /// Get the first sequence bound to a function (empty sequence if none)
    ///
    /// With several sequences bound to the same function this is the
    /// smallest one in sequence order.
    pub fn chord_for_fun(&self, fun: KeyFun) -> KeySeq {
        self.map
            .iter()
            .find(|(_, f)| **f == fun)
            .map(|(k, _)| k.clone())
            .unwrap_or_default()
    }

    /// Check if any sequence is bound to the function
    pub fn has_fun(&self, fun: KeyFun) -> bool {
        self.map.values().any(|f| *f == fun)
    }

    /// Copy the keymap out as a list of entries
    pub fn to_entries(&self) -> Vec<KeymapEntry> {
        self.map
            .iter()
            .map(|(k, f)| KeymapEntry::new(k.clone(), *f))
            .collect()
    }

    /// Get display string for a function's binding
    pub fn display_for(&self, fun: KeyFun) -> Option<String> {
        let keys = self.chord_for_fun(fun);
        if keys.is_empty() {
            None
        } else {
            Some(keys.display_string())
        }
    }
}

impl FromIterator<(KeySeq, KeyFun)> for KeySeqMap {
    fn from_iter<I: IntoIterator<Item = (KeySeq, KeyFun)>>(iter: I) -> Self {
        Self::with_entries(iter)
    }
}

impl FromIterator<KeymapEntry> for KeySeqMap {
    fn from_iter<I: IntoIterator<Item = KeymapEntry>>(iter: I) -> Self {
        Self::with_entries(iter.into_iter().map(|e| (e.keys, e.fun)))
    }
}
