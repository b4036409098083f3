//! Command-line interface for inspecting and checking keymaps
//!
//! Supports:
//! - Listing the available keymaps
//! - Showing and checking (reconciling) one keymap
//! - Resolving a key sequence the way the editor would
//! - Reverting to or exporting the standard keymaps

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Preferences;
use crate::keymap::{sort_by_fun, KeyChord, KeyMaps, KeymapSession, UpdateReport};

/// Inspect and check editor keymaps
#[derive(Parser, Debug)]
#[command(name = "chordmap", version, about = "Inspect and check editor keymaps")]
pub struct CliArgs {
    /// Read keymaps from this JSON file instead of the preferences directory
    #[arg(long, value_name = "FILE", global = true)]
    pub keymaps: Option<PathBuf>,

    /// Keymap to use (defaults to the one in preferences)
    #[arg(short, long, value_name = "NAME", global = true)]
    pub map: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// List available keymaps
    List,
    /// Show the bindings of a keymap, by function
    Show,
    /// Resolve one or two key chords to a function
    Resolve {
        /// First chord, e.g. "Control+X"
        key1: String,
        /// Optional second chord
        key2: Option<String>,
    },
    /// Reconcile a keymap against the standard one and report problems
    Check,
    /// Revert saved keymaps to the standard set
    Reset,
    /// Write the keymaps as JSON
    Export {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

/// Where the keymaps came from, so `reset` writes back to the same place
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeymapSource {
    File(PathBuf),
    Prefs,
    Standard,
}

impl CliArgs {
    fn load_maps(&self, prefs: &Preferences) -> Result<(KeyMaps, KeymapSource)> {
        if let Some(path) = &self.keymaps {
            let maps = crate::keymap::load_keymaps_file(path)
                .with_context(|| format!("loading keymaps from {}", path.display()))?;
            return Ok((maps, KeymapSource::File(path.clone())));
        }

        if prefs.save_key_maps {
            let mut maps = KeyMaps::standard();
            match maps.open_prefs() {
                Ok(()) => return Ok((maps, KeymapSource::Prefs)),
                Err(e) => tracing::warn!("Using standard keymaps: {}", e),
            }
        }
        Ok((KeyMaps::standard(), KeymapSource::Standard))
    }

    /// Run the command, writing results to `out`
    pub fn run(self, prefs: &Preferences, out: &mut impl Write) -> Result<()> {
        let (maps, source) = self.load_maps(prefs)?;
        let name = self.map.clone().unwrap_or_else(|| prefs.key_map.clone());

        let session = KeymapSession::new();
        session.replace_maps(&maps);

        match self.command {
            CliCommand::List => {
                for item in maps.iter() {
                    let marker = if item.name == name { "*" } else { " " };
                    writeln!(out, "{} {:<12} {}", marker, item.name, item.desc)?;
                }
            }
            CliCommand::Show => {
                activate(&session, &name)?;
                let mut entries = session.active().map().to_entries();
                sort_by_fun(&mut entries);
                for entry in entries {
                    writeln!(
                        out,
                        "{:<18} {}",
                        entry.fun.display_name(),
                        entry.keys.display_string()
                    )?;
                }
            }
            CliCommand::Resolve { key1, key2 } => {
                activate(&session, &name)?;
                let key2 = key2.map(KeyChord::from).unwrap_or_default();
                let fun = session.resolve(&KeyChord::from(key1), &key2);
                writeln!(out, "{}", fun)?;
            }
            CliCommand::Check => {
                // The session already repaired its own copy, so check the
                // keymaps as they were loaded
                let mut loaded = maps.clone();
                let Some((_, report)) = loaded.activate(&name, session.defaults()) else {
                    bail!("Keymap {:?} not found", name);
                };
                for keys in &report.removed {
                    writeln!(out, "removed   {} (unknown function)", keys)?;
                }
                for entry in &report.filled {
                    writeln!(out, "filled    {}", entry.display_string())?;
                }
                for fun in &report.placeholders {
                    writeln!(out, "unbound   {}", fun.display_name())?;
                }
                for entry in &report.conflicts {
                    writeln!(out, "conflict  {} (shadowed by a two-key sequence)", entry.keys)?;
                }
                if report.is_clean() {
                    writeln!(out, "{}: ok", name)?;
                }
            }
            CliCommand::Reset => {
                let mut std_maps = KeyMaps::standard();
                match source {
                    KeymapSource::File(path) => std_maps.save_json(&path)?,
                    KeymapSource::Prefs | KeymapSource::Standard => std_maps.save_prefs()?,
                }
                writeln!(out, "Reverted to {} standard keymaps", std_maps.len())?;
            }
            CliCommand::Export { path } => {
                session.maps().save_json(&path)?;
                writeln!(out, "Wrote {}", path.display())?;
            }
        }
        Ok(())
    }
}

fn activate(session: &KeymapSession, name: &str) -> Result<UpdateReport> {
    match session.activate_by_name(name) {
        Some(report) => Ok(report),
        None => bail!("Keymap {:?} not found", name),
    }
}

impl std::fmt::Display for CliCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliCommand::List => write!(f, "list"),
            CliCommand::Show => write!(f, "show"),
            CliCommand::Resolve { .. } => write!(f, "resolve"),
            CliCommand::Check => write!(f, "check"),
            CliCommand::Reset => write!(f, "reset"),
            CliCommand::Export { .. } => write!(f, "export"),
        }
    }
}
