//! chordmap - key sequence to editor function mapping
//!
//! This crate resolves one- or two-chord key sequences to editor functions
//! and keeps a registry of named, persistable keymaps consistent with the
//! standard keymap.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use config::Preferences;
pub use keymap::{KeyChord, KeyFun, KeyMaps, KeySeq, KeySeqMap, KeymapSession};
