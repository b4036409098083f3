//! KeyMaps: the registry of named keymaps
//!
//! Users edit these in preferences. To create a custom keymap, duplicate an
//! existing one, rename it and customize it; an empty custom keymap is filled
//! from the defaults the first time it is activated.

use serde::{Deserialize, Serialize};

use super::defaults::std_keymaps;
use super::keymap::KeySeqMap;
use super::resolve::ActiveKeymap;
use super::update::UpdateReport;

/// An entry in a [`KeyMaps`] list
///
/// Field names are capitalized in the persisted file to stay compatible with
/// existing `key_maps_prefs.json` files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyMapsItem {
    /// Name of the keymap, unique within its registry
    pub name: String,
    /// Description; a good place to note what the keymap was derived from
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub map: KeySeqMap,
}

impl KeyMapsItem {
    pub fn new(name: impl Into<String>, desc: impl Into<String>, map: KeySeqMap) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            map,
        }
    }
}

/// Ordered list of named keymaps
///
/// Names are not deduplicated; lookups return the first match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMaps {
    items: Vec<KeyMapsItem>,
    /// Set when the list differs from what was last loaded or saved
    #[serde(skip)]
    changed: bool,
}

impl PartialEq for KeyMaps {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for KeyMaps {}

impl KeyMaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<KeyMapsItem>) -> Self {
        Self {
            items,
            changed: false,
        }
    }

    /// A registry holding a copy of the standard keymaps
    pub fn standard() -> Self {
        std_keymaps()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyMapsItem> {
        self.items.iter()
    }

    /// Names of all keymaps, in order
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|it| it.name.as_str()).collect()
    }

    /// Append a keymap
    pub fn push(&mut self, item: KeyMapsItem) {
        self.items.push(item);
        self.changed = true;
    }

    /// Remove the keymap at `index`, if any
    pub fn remove(&mut self, index: usize) -> Option<KeyMapsItem> {
        if index < self.items.len() {
            self.changed = true;
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Find a keymap and its index by name
    ///
    /// A miss is logged and returns `None`.
    pub fn map_by_name(&self, name: &str) -> Option<(&KeySeqMap, usize)> {
        match self.items.iter().position(|it| it.name == name) {
            Some(idx) => Some((&self.items[idx].map, idx)),
            None => {
                tracing::warn!("Key map named {:?} not found", name);
                None
            }
        }
    }

    /// Mutable variant of [`KeyMaps::map_by_name`]
    pub fn map_by_name_mut(&mut self, name: &str) -> Option<(&mut KeySeqMap, usize)> {
        match self.items.iter().position(|it| it.name == name) {
            Some(idx) => Some((&mut self.items[idx].map, idx)),
            None => {
                tracing::warn!("Key map named {:?} not found", name);
                None
            }
        }
    }

    /// Reconcile the named keymap in place and build an active keymap from it
    ///
    /// Returns `None` and leaves everything untouched if the name is unknown.
    pub fn activate(
        &mut self,
        name: &str,
        defaults: &KeySeqMap,
    ) -> Option<(ActiveKeymap, UpdateReport)> {
        let (map, _) = self.map_by_name_mut(name)?;
        let before = map.clone();
        let report = map.update(defaults);
        let active = ActiveKeymap::new(name, map.clone());
        if *map != before {
            self.changed = true;
        }
        tracing::info!(
            "Activated keymap {} ({} bindings, {} prefixes)",
            name,
            active.map().len(),
            active.needs_second().len()
        );
        Some((active, report))
    }

    /// Replace the contents with a deep copy of `other`
    pub fn copy_from(&mut self, other: &KeyMaps) {
        self.items = other.items.clone();
    }

    /// Go back to the standard keymaps compiled into the program
    ///
    /// Any edits are lost. Marks the list as changed so it gets saved.
    pub fn revert_to_std(&mut self) {
        self.copy_from(&std_keymaps());
        self.changed = true;
    }

    pub fn has_changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }
}
