//! Core types for the keymap system: KeyChord and KeySeq

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator between the two chords in the text encoding of a [`KeySeq`]
pub const SEQ_SEPARATOR: char = ';';

/// A single key chord: one key press plus modifiers, e.g. `"Control+X"`
///
/// Produced by the input layer. The keymap never looks inside it; two chords
/// are the same binding only if their text is identical. The empty chord
/// stands for "no key".
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyChord(String);

impl KeyChord {
    /// The empty chord
    pub const fn none() -> Self {
        KeyChord(String::new())
    }

    /// Create a chord from its text
    pub fn new(chord: impl Into<String>) -> Self {
        KeyChord(chord.into())
    }

    /// Check if this is the empty chord
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyChord {
    fn from(s: &str) -> Self {
        KeyChord::new(s)
    }
}

impl From<String> for KeyChord {
    fn from(s: String) -> Self {
        KeyChord(s)
    }
}

/// A key sequence: one chord, or two chords entered one after the other
///
/// An empty `key2` makes this a single-key binding. Ordering compares `key1`
/// first, then `key2`, which is what keeps table iteration deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeySeq {
    pub key1: KeyChord,
    pub key2: KeyChord,
}

impl KeySeq {
    /// Create a two-key sequence
    pub fn new(key1: impl Into<KeyChord>, key2: impl Into<KeyChord>) -> Self {
        Self {
            key1: key1.into(),
            key2: key2.into(),
        }
    }

    /// Create a single-key sequence
    pub fn single(key1: impl Into<KeyChord>) -> Self {
        Self {
            key1: key1.into(),
            key2: KeyChord::none(),
        }
    }

    /// Check if this sequence has no keys at all
    pub fn is_empty(&self) -> bool {
        self.key1.is_empty() && self.key2.is_empty()
    }

    /// Check if this sequence needs two chords
    pub fn is_two_key(&self) -> bool {
        !self.key2.is_empty()
    }

    /// Encode as `key1;key2` (key2 may be empty)
    pub fn encode(&self) -> String {
        let mut s = String::with_capacity(self.key1.0.len() + self.key2.0.len() + 1);
        s.push_str(self.key1.as_str());
        s.push(SEQ_SEPARATOR);
        s.push_str(self.key2.as_str());
        s
    }

    /// Decode from `key1;key2`
    ///
    /// Splits at the first separator. Text without a separator is read as a
    /// single-key sequence.
    pub fn decode(text: &str) -> Self {
        match text.split_once(SEQ_SEPARATOR) {
            Some((k1, k2)) => KeySeq::new(k1, k2),
            None => KeySeq::single(text),
        }
    }

    /// Human readable form, e.g. `Control+X o`
    pub fn display_string(&self) -> String {
        if self.is_two_key() {
            format!("{} {}", self.key1, self.key2)
        } else {
            self.key1.to_string()
        }
    }
}

impl fmt::Display for KeySeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key1, SEQ_SEPARATOR, self.key2)
    }
}

impl FromStr for KeySeq {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(KeySeq::decode(s))
    }
}

// Sequences are map keys in the persisted file, so they must be plain strings
impl Serialize for KeySeq {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for KeySeq {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(KeySeq::decode(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_empty() {
        assert!(KeyChord::none().is_empty());
        assert!(KeyChord::default().is_empty());
        assert!(!KeyChord::from("Control+X").is_empty());
    }

    #[test]
    fn test_chord_equality_is_exact() {
        assert_eq!(KeyChord::from("Control+X"), KeyChord::new("Control+X"));
        assert_ne!(KeyChord::from("Control+X"), KeyChord::from("Control+x"));
    }

    #[test]
    fn test_single_and_two_key() {
        assert!(!KeySeq::single("Control+S").is_two_key());
        assert!(KeySeq::new("Control+X", "o").is_two_key());
        assert!(KeySeq::default().is_empty());
    }

    #[test]
    fn test_encode() {
        assert_eq!(KeySeq::new("Control+X", "o").encode(), "Control+X;o");
        assert_eq!(KeySeq::single("Meta+S").encode(), "Meta+S;");
    }

    #[test]
    fn test_decode() {
        assert_eq!(KeySeq::decode("Control+X;o"), KeySeq::new("Control+X", "o"));
        assert_eq!(KeySeq::decode("Meta+S;"), KeySeq::single("Meta+S"));
        assert_eq!(KeySeq::decode("Meta+S"), KeySeq::single("Meta+S"));
        assert_eq!(KeySeq::decode(""), KeySeq::default());
    }

    #[test]
    fn test_round_trip_text() {
        let seq = KeySeq::new("Control+X", "Control+F");
        assert_eq!(seq.encode().parse::<KeySeq>().unwrap(), seq);
    }

    #[test]
    fn test_serde_as_string() {
        let seq = KeySeq::new("Control+X", "o");
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "\"Control+X;o\"");
        let back: KeySeq = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
    }

    #[test]
    fn test_ordering_key1_first() {
        let a = KeySeq::new("Control+C", "Control+C");
        let b = KeySeq::single("Control+X");
        let c = KeySeq::new("Control+X", "b");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_display_string() {
        assert_eq!(KeySeq::new("Control+X", "o").display_string(), "Control+X o");
        assert_eq!(KeySeq::single("Meta+L").display_string(), "Meta+L");
    }
}
