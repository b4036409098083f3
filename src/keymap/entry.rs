//! KeymapEntry: one (sequence, function) pair taken out of a keymap

use serde::{Deserialize, Serialize};

use super::function::KeyFun;
use super::types::{KeyChord, KeySeq};

/// A single keymap entry, used for sorting, editing and diffing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeymapEntry {
    /// The key chord sequence that activates the function
    pub keys: KeySeq,
    /// The function bound to that sequence
    pub fun: KeyFun,
}

impl KeymapEntry {
    pub fn new(keys: KeySeq, fun: KeyFun) -> Self {
        Self { keys, fun }
    }

    /// Check if this entry needs a single chord
    pub fn is_single(&self) -> bool {
        !self.keys.is_two_key()
    }

    /// Check if this is a two-key entry starting with the given chord
    pub fn starts_with(&self, key1: &KeyChord) -> bool {
        self.keys.is_two_key() && self.keys.key1 == *key1
    }

    /// Get display string for this entry, e.g. `Control+X o → Next Panel`
    pub fn display_string(&self) -> String {
        format!("{} → {}", self.keys.display_string(), self.fun.display_name())
    }
}

/// Sort entries by function ordinal, then by sequence
pub fn sort_by_fun(entries: &mut [KeymapEntry]) {
    entries.sort_by(|a, b| a.fun.cmp(&b.fun).then_with(|| a.keys.cmp(&b.keys)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry() {
        let entry = KeymapEntry::new(KeySeq::single("Meta+S"), KeyFun::BufferSave);
        assert!(entry.is_single());
        assert!(!entry.starts_with(&KeyChord::from("Meta+S")));
    }

    #[test]
    fn test_two_key_entry() {
        let entry = KeymapEntry::new(KeySeq::new("Control+X", "o"), KeyFun::NextPanel);
        assert!(!entry.is_single());
        assert!(entry.starts_with(&KeyChord::from("Control+X")));
        assert_eq!(entry.display_string(), "Control+X o → Next Panel");
    }

    #[test]
    fn test_sort_by_fun() {
        let mut entries = vec![
            KeymapEntry::new(KeySeq::new("Control+X", "s"), KeyFun::BufferSave),
            KeymapEntry::new(KeySeq::new("Control+X", "o"), KeyFun::NextPanel),
            KeymapEntry::new(KeySeq::new("Control+X", "f"), KeyFun::FileOpen),
            KeymapEntry::new(KeySeq::new("Control+X", "Control+F"), KeyFun::FileOpen),
        ];
        sort_by_fun(&mut entries);

        let funs: Vec<_> = entries.iter().map(|e| e.fun).collect();
        assert_eq!(
            funs,
            vec![
                KeyFun::NextPanel,
                KeyFun::FileOpen,
                KeyFun::FileOpen,
                KeyFun::BufferSave
            ]
        );
        assert_eq!(entries[1].keys, KeySeq::new("Control+X", "Control+F"));
    }
}
