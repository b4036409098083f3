//! Preferences persistence
//!
//! Stores which keymap is active, and whether the keymap registry is kept in
//! `key_maps_prefs.json`, in `~/.config/chordmap/config.yaml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::keymap::{default_keymap_name, KeyMaps, KeymapSession};

/// Preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Name of the active keymap (e.g. "MacEmacs", "LinuxStd")
    #[serde(default = "default_key_map")]
    pub key_map: String,

    /// Load and save custom keymaps from the prefs directory
    #[serde(default)]
    pub save_key_maps: bool,
}

fn default_key_map() -> String {
    default_keymap_name().to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            key_map: default_key_map(),
            save_key_maps: false,
        }
    }
}

impl Preferences {
    /// Load preferences from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load preferences from a specific file, or return defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(prefs) => {
                    tracing::info!("Loaded preferences from {}", path.display());
                    prefs
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save preferences to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save preferences to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Build a keymap session from these preferences
    ///
    /// Uses the saved registry when `save_key_maps` is set and it loads,
    /// the standard keymaps otherwise, then activates `key_map` (falling
    /// back to the platform default if that name is unknown).
    pub fn session(&self) -> KeymapSession {
        let session = KeymapSession::new();
        if self.save_key_maps {
            let mut maps = KeyMaps::standard();
            match maps.open_prefs() {
                Ok(()) => session.replace_maps(&maps),
                Err(e) => tracing::warn!("Using standard keymaps: {}", e),
            }
        }
        if session.activate_by_name(&self.key_map).is_none() {
            tracing::warn!(
                "Keymap {} not available, using {}",
                self.key_map,
                session.active_name()
            );
        }
        session
    }
}
