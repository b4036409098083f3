//! Key sequence to function mapping
//!
//! This module maps chorded keyboard input to editor functions:
//! - One or two consecutive key chords form a key sequence
//! - Each keymap binds sequences to functions, many-to-one
//! - Keymaps are reconciled against the standard keymap before use so every
//!   function stays reachable
//! - Named keymaps live in a registry that can be persisted as JSON
//!
//! # Architecture
//!
//! ```text
//! KeyChord(s) → KeymapSession::resolve() → ActiveKeymap → KeyFun
//!                        ↑
//!   KeyMaps::activate() → KeySeqMap::update() (reconcile + prefix index)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let session = KeymapSession::new();
//! match session.resolve(&"Control+X".into(), &KeyChord::none()) {
//!     KeyFun::NeedsSecondKey => { /* wait for the next chord */ }
//!     fun => dispatch(fun),
//! }
//! ```

mod config;
mod defaults;
mod entry;
mod function;
#[allow(clippy::module_inception)]
mod keymap;
mod registry;
mod resolve;
mod session;
mod types;
mod update;

pub use config::{load_keymaps_file, parse_keymaps_json, KeymapError};
pub use defaults::{default_keymap, default_keymap_name, std_keymaps};
pub use entry::{sort_by_fun, KeymapEntry};
pub use function::{KeyFun, UnknownKeyFun};
pub use keymap::KeySeqMap;
pub use registry::{KeyMaps, KeyMapsItem};
pub use resolve::{ActiveKeymap, NeedsSecondKeys};
pub use session::KeymapSession;
pub use types::{KeyChord, KeySeq, SEQ_SEPARATOR};
pub use update::{placeholder_for, UpdateReport, NOT_SET_PREFIX};
