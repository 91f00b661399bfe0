// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The mod node of the dependency graph.

use super::{ChainState, DependencyChain, DependencyReference, ModIdentity, ModState};
use crate::error::{ModError, ModResult};

/// A mod layered on top of the game.
///
/// Identity and declared references are fixed at construction. The chain slot
/// is written by the resolver exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mod {
    identity: ModIdentity,
    name: String,
    references: Vec<DependencyReference>,
    chain: ChainState,
}

impl Mod {
    /// Creates an unresolved mod. The display name defaults to the locator.
    #[must_use]
    pub fn new(identity: ModIdentity, references: Vec<DependencyReference>) -> Self {
        Self {
            name: identity.locator().to_string(),
            identity,
            references,
            chain: ChainState::Unresolved,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn identity(&self) -> &ModIdentity {
        &self.identity
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared references in author priority order.
    #[must_use]
    pub fn references(&self) -> &[DependencyReference] {
        &self.references
    }

    #[must_use]
    pub const fn state(&self) -> ModState {
        self.chain.state()
    }

    /// The resolved chain, or `None` while [`ModState::Unresolved`].
    #[must_use]
    pub const fn dependency_chain(&self) -> Option<&DependencyChain> {
        self.chain.chain()
    }

    /// Attaches a chain to an unresolved mod.
    ///
    /// Returns `Ok(true)` when the chain was written and `Ok(false)` when an
    /// equal chain was already attached.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::ChainAlreadyAttached`] if a different chain is attached.
    pub(crate) fn attach_chain(&mut self, chain: DependencyChain) -> ModResult<bool> {
        match &self.chain {
            ChainState::Unresolved => {
                self.chain = ChainState::Resolved(chain);
                Ok(true)
            }
            ChainState::Resolved(existing) if *existing == chain => Ok(false),
            ChainState::Resolved(_) => Err(ModError::ChainAlreadyAttached(self.identity.clone())),
        }
    }
}
