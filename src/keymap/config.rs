//! JSON persistence for keymap registries
//!
//! The file is a list of `{ "Name", "Desc", "Map" }` objects. Each map is an
//! object keyed by the sequence text (`key1;key2`) with the function name as
//! value.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::registry::KeyMaps;

/// Errors that can occur when loading or saving keymaps
#[derive(Debug, Error)]
pub enum KeymapError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("No config directory available")]
    NoConfigDir,
}

/// Parse a keymap registry from JSON text
pub fn parse_keymaps_json(json: &str) -> Result<KeyMaps, KeymapError> {
    serde_json::from_str(json).map_err(KeymapError::Parse)
}

/// Load a keymap registry from a JSON file
pub fn load_keymaps_file(path: &Path) -> Result<KeyMaps, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|source| KeymapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_keymaps_json(&content)
}

impl KeyMaps {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, KeymapError> {
        serde_json::to_string_pretty(self).map_err(KeymapError::Serialize)
    }

    /// Replace the contents with the keymaps in a JSON file
    ///
    /// On any error the current contents are left as they were.
    pub fn open_json(&mut self, path: &Path) -> Result<(), KeymapError> {
        let loaded = load_keymaps_file(path)?;
        tracing::info!(
            "Loaded {} keymaps from {}",
            loaded.len(),
            path.display()
        );
        self.copy_from(&loaded);
        Ok(())
    }

    /// Save the keymaps to a JSON file
    ///
    /// Writes a temporary file next to the target and renames it over the
    /// target, so a failed save leaves any existing file untouched.
    pub fn save_json(&self, path: &Path) -> Result<(), KeymapError> {
        let content = self.to_json()?;
        let io_err = |source: std::io::Error| KeymapError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp = path.with_extension("json.tmp");
        if let Err(source) = std::fs::write(&tmp, content) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(source));
        }
        if let Err(source) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(source));
        }

        tracing::info!("Saved {} keymaps to {}", self.len(), path.display());
        Ok(())
    }

    /// Load from `key_maps_prefs.json` in the config directory
    pub fn open_prefs(&mut self) -> Result<(), KeymapError> {
        let path = crate::config_paths::keymaps_prefs_file().ok_or(KeymapError::NoConfigDir)?;
        self.open_json(&path)?;
        self.set_changed(false);
        Ok(())
    }

    /// Save to `key_maps_prefs.json` in the config directory
    pub fn save_prefs(&mut self) -> Result<(), KeymapError> {
        let path = crate::config_paths::keymaps_prefs_file().ok_or(KeymapError::NoConfigDir)?;
        self.save_json(&path)?;
        self.set_changed(false);
        Ok(())
    }
}
