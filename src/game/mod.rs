// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game instance owning the mod registry.
//!
//! ```text
//! Game
//!  |-- name
//!  |-- base identity   virtual:<name>, optionally registered as a mod
//!  '-- ModRegistry
//!
//! resolve_all(options)
//!   for mod in registry (insertion order)
//!     resolve -> resolved | failed(error)
//!   --> ResolutionReport
//! ```

use std::fmt;

use crate::error::{IdentityError, ModError, ModResult};
use crate::model::{DependencyChain, Mod, ModIdentity};
use crate::registry::ModRegistry;
use crate::resolver::{self, ResolverOptions};

/// A base game and the mods installed on top of it.
#[derive(Debug, Clone)]
pub struct Game {
    name: String,
    base: ModIdentity,
    registry: ModRegistry,
}

impl Game {
    /// Creates a game with an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptyName`] for a blank name.
    pub fn new(name: impl Into<String>) -> Result<Self, IdentityError> {
        let name = name.into();
        let base = ModIdentity::virtual_mod(name.clone())?;
        Ok(Self {
            name,
            base,
            registry: ModRegistry::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity under which the base game itself can be referenced.
    #[must_use]
    pub const fn base_identity(&self) -> &ModIdentity {
        &self.base
    }

    /// Registers the base game as a dependency-free mod so that mods can
    /// declare a dependency on it.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::DuplicateModIdentity`] if it is already registered.
    pub fn register_base(&mut self) -> ModResult<()> {
        let base = Mod::new(self.base.clone(), Vec::new()).with_name(self.name.clone());
        self.registry.register(base)
    }

    #[must_use]
    pub const fn registry(&self) -> &ModRegistry {
        &self.registry
    }

    /// Registers a mod with this game.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::DuplicateModIdentity`] on double registration.
    pub fn register_mod(&mut self, m: Mod) -> ModResult<()> {
        self.registry.register(m)
    }

    /// Resolves a single mod.
    ///
    /// # Errors
    ///
    /// See [`resolver::resolve`].
    pub fn resolve_mod(
        &mut self,
        identity: &ModIdentity,
        options: ResolverOptions,
    ) -> ModResult<DependencyChain> {
        resolver::resolve(&mut self.registry, identity, options)
    }

    /// Resolves every registered mod in insertion order.
    ///
    /// Failures are collected per mod; the batch keeps going. Mods already
    /// resolved as a side effect of an earlier mod are coalesced.
    pub fn resolve_all(&mut self, options: ResolverOptions) -> ResolutionReport {
        let identities: Vec<ModIdentity> = self
            .registry
            .all()
            .iter()
            .map(|m| m.identity().clone())
            .collect();

        let mut report = ResolutionReport::default();
        for identity in identities {
            match self.resolve_mod(&identity, options) {
                Ok(_) => report.resolved.push(identity),
                Err(error) => {
                    tracing::warn!(mod_id = %identity, error = %error, "Failed to resolve mod");
                    report.failed.push(ResolutionFailure { identity, error });
                }
            }
        }

        tracing::info!(
            game = %self.name,
            resolved = report.resolved.len(),
            failed = report.failed.len(),
            "Resolved mods"
        );
        report
    }
}

/// A mod that could not be resolved during [`Game::resolve_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    pub identity: ModIdentity,
    pub error: ModError,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.identity, self.error)
    }
}

/// Outcome of resolving all mods of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub resolved: Vec<ModIdentity>,
    pub failed: Vec<ResolutionFailure>,
}

impl ResolutionReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
