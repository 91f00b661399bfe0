// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod registry: the arena holding every mod of a game.
//!
//! ```text
//! mods:  [ Mod0, Mod1, Mod2, ... ]   insertion order
//! index: { identity -> slot }
//!
//! dependency edges are identities, looked up through the index
//! ```

mod shared;

pub use shared::SharedModRegistry;

use std::collections::HashMap;

use anyhow::Context;
use wax::{Glob, Program};

use crate::error::{ModError, ModResult, Result};
use crate::model::{Mod, ModIdentity};

/// Insertion-ordered mapping from [`ModIdentity`] to [`Mod`].
///
/// Provides no synchronization; see [`SharedModRegistry`].
#[derive(Debug, Clone, Default)]
pub struct ModRegistry {
    mods: Vec<Mod>,
    index: HashMap<ModIdentity, usize>,
}

impl ModRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mod.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::DuplicateModIdentity`] if an equal identity is
    /// already registered. The registry is left unchanged.
    pub fn register(&mut self, m: Mod) -> ModResult<()> {
        if self.index.contains_key(m.identity()) {
            return Err(ModError::DuplicateModIdentity(m.identity().clone()));
        }

        tracing::debug!(mod_id = %m.identity(), name = m.name(), "Registered mod");
        self.index.insert(m.identity().clone(), self.mods.len());
        self.mods.push(m);
        Ok(())
    }

    /// Registers multiple mods, stopping at the first duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::DuplicateModIdentity`] for the first duplicate.
    /// Mods before it stay registered.
    pub fn register_all(&mut self, mods: impl IntoIterator<Item = Mod>) -> ModResult<()> {
        for m in mods {
            self.register(m)?;
        }
        Ok(())
    }

    /// Looks up a mod by identity.
    #[must_use]
    pub fn try_get(&self, identity: &ModIdentity) -> Option<&Mod> {
        self.index.get(identity).map(|&slot| &self.mods[slot])
    }

    pub(crate) fn get_mut(&mut self, identity: &ModIdentity) -> Option<&mut Mod> {
        let slot = *self.index.get(identity)?;
        self.mods.get_mut(slot)
    }

    #[must_use]
    pub fn contains(&self, identity: &ModIdentity) -> bool {
        self.index.contains_key(identity)
    }

    /// All mods in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Mod] {
        &self.mods
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Returns the resolved chain of a mod as sibling mods, in merge order.
    ///
    /// `None` if the mod is unknown or still unresolved.
    #[must_use]
    pub fn chain_of(&self, identity: &ModIdentity) -> Option<Vec<&Mod>> {
        let chain = self.try_get(identity)?.dependency_chain()?;
        chain.iter().map(|dep| self.try_get(dep)).collect()
    }

    /// Finds mods whose display name matches a glob pattern.
    ///
    /// An exact name match wins over glob matching. Results keep insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid glob.
    pub fn find_by_name(&self, pattern: &str) -> Result<Vec<&Mod>> {
        let exact: Vec<&Mod> = self.mods.iter().filter(|m| m.name() == pattern).collect();
        if !exact.is_empty() {
            return Ok(exact);
        }

        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;

        Ok(self
            .mods
            .iter()
            .filter(|m| glob.is_match(m.name()))
            .collect())
    }
}
