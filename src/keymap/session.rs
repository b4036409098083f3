//! KeymapSession: owns the registry and the keymap currently in use
//!
//! Input handling calls [`KeymapSession::resolve`] from any thread. Anything
//! that changes which keymap is active builds a complete, reconciled
//! [`ActiveKeymap`] first and then swaps it in, so readers only ever see a
//! finished keymap and its matching prefix index. Readers never take a lock;
//! the registry lock only serializes writers.

use std::sync::{Arc, PoisonError, RwLock};

use arc_swap::ArcSwap;

use super::defaults::default_keymap_name;
use super::function::KeyFun;
use super::keymap::KeySeqMap;
use super::registry::KeyMaps;
use super::resolve::ActiveKeymap;
use super::types::KeyChord;
use super::update::UpdateReport;

#[derive(Debug)]
pub struct KeymapSession {
    /// Canonical table missing bindings are filled from
    defaults: KeySeqMap,
    /// Name activated when nothing else is configured or available
    default_name: String,
    maps: RwLock<KeyMaps>,
    active: ArcSwap<ActiveKeymap>,
}

impl KeymapSession {
    /// Session over the standard keymaps with the platform default active
    pub fn new() -> Self {
        let std_maps = KeyMaps::standard();
        let defaults = std_maps
            .map_by_name(default_keymap_name())
            .map(|(map, _)| map.clone())
            .unwrap_or_default();
        Self::with_maps(std_maps, defaults, default_keymap_name())
    }

    /// Session over a given registry
    ///
    /// Activates `default_name`; if that keymap is missing, the active keymap
    /// is a reconciled copy of `defaults`.
    pub fn with_maps(maps: KeyMaps, defaults: KeySeqMap, default_name: &str) -> Self {
        let mut fallback = KeySeqMap::new();
        fallback.update(&defaults);

        let session = Self {
            defaults,
            default_name: default_name.to_string(),
            maps: RwLock::new(maps),
            active: ArcSwap::from_pointee(ActiveKeymap::new(default_name, fallback)),
        };
        session.activate_by_name(default_name);
        session
    }

    /// Translate one or two chords into a function using the active keymap
    pub fn resolve(&self, key1: &KeyChord, key2: &KeyChord) -> KeyFun {
        self.active.load().resolve(key1, key2)
    }

    /// The keymap currently in use
    pub fn active(&self) -> Arc<ActiveKeymap> {
        self.active.load_full()
    }

    pub fn active_name(&self) -> String {
        self.active().name().to_string()
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn defaults(&self) -> &KeySeqMap {
        &self.defaults
    }

    /// Reconcile the named keymap and make it the active one
    ///
    /// Returns `None` and keeps the current keymap if the name is unknown.
    pub fn activate_by_name(&self, name: &str) -> Option<UpdateReport> {
        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
        self.activate_locked(&mut maps, name)
    }

    fn activate_locked(&self, maps: &mut KeyMaps, name: &str) -> Option<UpdateReport> {
        let (active, report) = maps.activate(name, &self.defaults)?;
        self.active.store(Arc::new(active));
        Some(report)
    }

    /// Re-activate the current keymap by name, else the default, else the
    /// first keymap in the registry
    fn reactivate_locked(&self, maps: &mut KeyMaps) {
        let current = self.active_name();
        let name = [current.as_str(), self.default_name.as_str()]
            .into_iter()
            .find(|name| maps.iter().any(|it| it.name == *name))
            .map(str::to_string)
            .or_else(|| maps.iter().next().map(|it| it.name.clone()));

        match name {
            Some(name) => {
                if name != current {
                    tracing::warn!("Keymap {} is no longer available, using {}", current, name);
                }
                self.activate_locked(maps, &name);
            }
            None => tracing::warn!(
                "Registry is empty, still using keymap {} which it no longer contains",
                current
            ),
        }
    }

    /// Replace the registry with the standard keymaps and re-activate
    pub fn reset_to_canonical(&self) {
        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
        maps.revert_to_std();
        self.reactivate_locked(&mut maps);
    }

    /// Replace the registry with another one and re-activate
    pub fn replace_maps(&self, new_maps: &KeyMaps) {
        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
        maps.copy_from(new_maps);
        self.reactivate_locked(&mut maps);
    }

    /// Edit the registry, then re-activate so edits to the active keymap
    /// take effect
    pub fn edit_maps<R>(&self, edit: impl FnOnce(&mut KeyMaps) -> R) -> R {
        let mut maps = self.maps.write().unwrap_or_else(PoisonError::into_inner);
        let result = edit(&mut maps);
        maps.set_changed(true);
        self.reactivate_locked(&mut maps);
        result
    }

    /// A copy of the registry
    pub fn maps(&self) -> KeyMaps {
        self.maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Check if the registry changed since it was loaded or saved
    pub fn maps_changed(&self) -> bool {
        self.maps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .has_changed()
    }
}

impl Default for KeymapSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::registry::KeyMapsItem;
    use crate::keymap::types::KeySeq;

    fn chord(s: &str) -> KeyChord {
        KeyChord::from(s)
    }

    #[test]
    fn test_new_activates_platform_default() {
        let session = KeymapSession::new();
        assert_eq!(session.active_name(), default_keymap_name());
        assert_eq!(
            session.resolve(&chord("Control+X"), &chord("o")),
            KeyFun::NextPanel
        );
        assert_eq!(
            session.resolve(&chord("Control+X"), &KeyChord::none()),
            KeyFun::NeedsSecondKey
        );
    }

    #[test]
    fn test_activate_by_name_switches() {
        let session = KeymapSession::new();
        assert!(session.activate_by_name("MacStd").is_some());
        assert_eq!(session.active_name(), "MacStd");
        assert_eq!(
            session.resolve(&chord("Meta+S"), &KeyChord::none()),
            KeyFun::BufferSave
        );
    }

    #[test]
    fn test_activate_unknown_keeps_current() {
        let session = KeymapSession::new();
        session.activate_by_name("LinuxStd");
        assert!(session.activate_by_name("NoSuchMap").is_none());
        assert_eq!(session.active_name(), "LinuxStd");
    }

    #[test]
    fn test_missing_default_uses_defaults_copy() {
        let defaults =
            KeySeqMap::with_entries([(KeySeq::new("Control+X", "o"), KeyFun::NextPanel)]);
        let session = KeymapSession::with_maps(KeyMaps::new(), defaults.clone(), "Gone");
        let active = session.active();
        assert_eq!(active.name(), "Gone");
        assert_eq!(
            active.map().lookup(&KeySeq::new("Control+X", "o")),
            Some(KeyFun::NextPanel)
        );
        assert!(KeyFun::COMMANDS.iter().all(|&f| active.map().has_fun(f)));
        assert_eq!(
            session.resolve(&chord("Control+X"), &chord("o")),
            KeyFun::NextPanel
        );
    }

    #[test]
    fn test_edit_maps_reactivates() {
        let session = KeymapSession::new();
        session.activate_by_name("LinuxStd");

        session.edit_maps(|maps| {
            let (map, _) = maps.map_by_name_mut("LinuxStd").unwrap();
            map.insert(KeySeq::single("F5"), KeyFun::ExecuteCommand);
        });

        assert!(session.maps_changed());
        assert_eq!(
            session.resolve(&chord("F5"), &KeyChord::none()),
            KeyFun::ExecuteCommand
        );
    }

    #[test]
    fn test_replace_maps_without_current_or_default_uses_first() {
        let session = KeymapSession::new();
        let mut maps = KeyMaps::new();
        maps.push(KeyMapsItem::new(
            "Laptop",
            "",
            KeySeqMap::with_entries([(KeySeq::single("F7"), KeyFun::GotoLine)]),
        ));
        maps.push(KeyMapsItem::new("Desktop", "", KeySeqMap::new()));

        session.replace_maps(&maps);

        assert_eq!(session.active_name(), "Laptop");
        assert_eq!(
            session.resolve(&chord("F7"), &KeyChord::none()),
            KeyFun::GotoLine
        );
    }

    #[test]
    fn test_replace_maps_keeps_current_when_present() {
        let session = KeymapSession::new();
        session.activate_by_name("ChromeStd");
        session.replace_maps(&KeyMaps::standard());
        assert_eq!(session.active_name(), "ChromeStd");
    }

    #[test]
    fn test_reset_to_canonical() {
        let session = KeymapSession::new();
        session.edit_maps(|maps| {
            maps.push(KeyMapsItem::new("Custom", "", KeySeqMap::new()));
        });
        session.activate_by_name("Custom");

        session.reset_to_canonical();

        assert_eq!(session.maps(), KeyMaps::standard());
        assert_eq!(session.active_name(), default_keymap_name());
    }

    #[test]
    fn test_old_active_handle_unchanged_after_swap() {
        let session = KeymapSession::new();
        session.activate_by_name("LinuxStd");
        let old = session.active();

        session.activate_by_name("MacStd");

        assert_eq!(old.name(), "LinuxStd");
        assert_eq!(session.active_name(), "MacStd");
    }

    #[test]
    fn test_resolve_through_handle_while_swapping() {
        let session = Arc::new(KeymapSession::new());
        let writer = {
            let session = Arc::clone(&session);
            std::thread::spawn(move || {
                for name in ["MacStd", "WindowsStd"].iter().cycle().take(100) {
                    session.activate_by_name(name);
                }
            })
        };

        for _ in 0..200 {
            let active = session.active();
            let expected = if active.name() == "MacStd" {
                KeyFun::BufferSave
            } else {
                KeyFun::Nil
            };
            // A handle always pairs a name with that keymap's own table
            assert_eq!(active.resolve(&chord("Meta+S"), &KeyChord::none()), expected);
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_concurrent_readers() {
        let session = Arc::new(KeymapSession::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = Arc::clone(&session);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let fun = session.resolve(&chord("Control+X"), &chord("o"));
                        assert_eq!(fun, KeyFun::NextPanel);
                    }
                })
            })
            .collect();

        for name in ["MacStd", "LinuxStd", "ChromeStd"].iter().cycle().take(60) {
            session.activate_by_name(name);
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
