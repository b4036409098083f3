//! Reconciling a keymap against the canonical default keymap
//!
//! [`KeySeqMap::update`] makes a (possibly user-edited, possibly old) keymap
//! safe to activate:
//!
//! 1. entries bound to `Nil` (functions that no longer exist) are dropped
//! 2. an empty keymap becomes a copy of the defaults
//! 3. every function bound in the defaults but missing here gets the default
//!    binding, or a "- Not Set -" placeholder when that binding is taken
//! 4. any command still unbound (the defaults don't bind it either) gets a
//!    placeholder
//! 5. the prefix index is rebuilt
//! 6. single-key entries shadowed by a two-key prefix are reported
//!
//! Nothing here fails. Problems are repaired where possible and logged.

use super::entry::{sort_by_fun, KeymapEntry};
use super::function::KeyFun;
use super::keymap::KeySeqMap;
use super::resolve::NeedsSecondKeys;
use super::types::KeySeq;

/// Marker put in front of the function name for placeholder bindings
pub const NOT_SET_PREFIX: &str = "- Not Set - ";

/// What [`KeySeqMap::update`] changed or found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Sequences removed because their function is gone
    pub removed: Vec<KeySeq>,
    /// Entries copied in from the defaults
    pub filled: Vec<KeymapEntry>,
    /// Functions that only got a placeholder binding
    pub placeholders: Vec<KeyFun>,
    /// Single-key entries that can never fire because their chord is a prefix
    pub conflicts: Vec<KeymapEntry>,
    /// Prefix index rebuilt from the updated keymap
    pub needs_second: NeedsSecondKeys,
}

impl UpdateReport {
    /// True when the keymap needed no repair and has no conflicts
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty()
            && self.filled.is_empty()
            && self.placeholders.is_empty()
            && self.conflicts.is_empty()
    }
}

/// The placeholder sequence used for a function with no usable binding
pub fn placeholder_for(fun: KeyFun) -> KeySeq {
    KeySeq::single(format!("{}{}", NOT_SET_PREFIX, fun.name()))
}

impl KeySeqMap {
    /// Ensure every function in `defaults` has at least one binding here,
    /// drop stale entries, and rebuild the prefix index
    pub fn update(&mut self, defaults: &KeySeqMap) -> UpdateReport {
        let mut report = UpdateReport {
            removed: self.purge_stale(),
            ..Default::default()
        };

        if self.is_empty() {
            self.bootstrap(defaults, &mut report);
        } else {
            self.fill_missing(defaults, &mut report);
        }
        self.bind_unbound_commands(&mut report);

        report.needs_second = NeedsSecondKeys::from_map(self);
        report.conflicts = find_conflicts(self, &report.needs_second);
        report
    }

    fn purge_stale(&mut self) -> Vec<KeySeq> {
        let mut removed = Vec::new();
        self.retain(|keys, fun| {
            if fun.is_command() {
                return true;
            }
            tracing::warn!(
                "Key function is {} (probably renamed), removing binding for key: {}",
                fun,
                keys
            );
            removed.push(keys.clone());
            false
        });
        removed
    }

    /// First use of a new custom keymap: start from the defaults
    fn bootstrap(&mut self, defaults: &KeySeqMap, report: &mut UpdateReport) {
        for (keys, fun) in defaults.iter().filter(|(_, f)| f.is_command()) {
            self.insert(keys.clone(), fun);
            report.filled.push(KeymapEntry::new(keys.clone(), fun));
        }
        tracing::debug!("Initialized empty keymap with {} default bindings", self.len());
    }

    /// Merge-join both keymaps sorted by function, adding what is missing
    fn fill_missing(&mut self, defaults: &KeySeqMap, report: &mut UpdateReport) {
        let mut dkms = defaults.to_entries();
        let mut kms = self.to_entries();
        sort_by_fun(&mut dkms);
        sort_by_fun(&mut kms);

        let mut additions: Vec<KeymapEntry> = Vec::new();
        let mut mi = 0;
        let mut di = 0;

        while di < dkms.len() {
            let fun = dkms[di].fun;
            let group_end = dkms[di..]
                .iter()
                .position(|e| e.fun != fun)
                .map_or(dkms.len(), |n| di + n);
            let group = &dkms[di..group_end];
            di = group_end;

            if !fun.is_command() {
                continue;
            }

            while mi < kms.len() && kms[mi].fun < fun {
                mi += 1;
            }
            if mi < kms.len() && kms[mi].fun == fun {
                continue;
            }

            // Default sequences already used for another function stay theirs
            let before = additions.len();
            additions.extend(group.iter().filter(|e| !self.contains(&e.keys)).cloned());

            if additions.len() == before {
                let keys = placeholder_for(fun);
                tracing::warn!(
                    "{} has no key mapping and its default is taken, adding placeholder {}",
                    fun,
                    keys
                );
                report.placeholders.push(fun);
                additions.push(KeymapEntry::new(keys, fun));
            } else {
                tracing::info!("{} has no key mapping, using default binding", fun);
            }
        }

        for entry in additions {
            self.insert(entry.keys.clone(), entry.fun);
            if !report.placeholders.contains(&entry.fun) {
                report.filled.push(entry);
            }
        }
    }

    /// Every command ends up with at least one sequence, even ones the
    /// defaults leave unbound
    fn bind_unbound_commands(&mut self, report: &mut UpdateReport) {
        for fun in KeyFun::COMMANDS {
            if self.has_fun(fun) {
                continue;
            }
            let keys = placeholder_for(fun);
            tracing::warn!(
                "{} is not bound here or in the default keymap, adding placeholder {}",
                fun,
                keys
            );
            self.insert(keys, fun);
            report.placeholders.push(fun);
        }
    }
}

fn find_conflicts(map: &KeySeqMap, needs_second: &NeedsSecondKeys) -> Vec<KeymapEntry> {
    map.iter()
        .filter(|(keys, _)| !keys.is_two_key() && needs_second.contains(&keys.key1))
        .map(|(keys, fun)| {
            tracing::warn!(
                "Single-key binding starts with a chord used in a two-key sequence, it won't be used: Key: {} Fun: {}",
                keys,
                fun
            );
            KeymapEntry::new(keys.clone(), fun)
        })
        .collect()
}
