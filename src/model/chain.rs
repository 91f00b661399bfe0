// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolved dependency chains and the two-state chain slot of a mod.

use serde::Serialize;

use super::ModIdentity;

/// Whether a chain lists direct dependencies only or the full transitive set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainDepth {
    Direct,
    Complete,
}

/// Ordered, deduplicated, acyclic dependency chain of a mod.
///
/// Entries are identities of sibling mods in the owning registry, in
/// merge order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyChain {
    depth: ChainDepth,
    entries: Vec<ModIdentity>,
}

impl DependencyChain {
    #[must_use]
    pub const fn new(depth: ChainDepth, entries: Vec<ModIdentity>) -> Self {
        Self { depth, entries }
    }

    #[must_use]
    pub const fn depth(&self) -> ChainDepth {
        self.depth
    }

    #[must_use]
    pub fn identities(&self) -> &[ModIdentity] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModIdentity> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, identity: &ModIdentity) -> bool {
        self.entries.contains(identity)
    }
}

impl<'a> IntoIterator for &'a DependencyChain {
    type Item = &'a ModIdentity;
    type IntoIter = std::slice::Iter<'a, ModIdentity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Observable resolution state of a mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModState {
    Unresolved,
    Resolved,
}

/// Chain slot of a mod: empty until the resolver attaches a chain once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ChainState {
    #[default]
    Unresolved,
    Resolved(DependencyChain),
}

impl ChainState {
    #[must_use]
    pub(crate) const fn state(&self) -> ModState {
        match self {
            Self::Unresolved => ModState::Unresolved,
            Self::Resolved(_) => ModState::Resolved,
        }
    }

    #[must_use]
    pub(crate) const fn chain(&self) -> Option<&DependencyChain> {
        match self {
            Self::Unresolved => None,
            Self::Resolved(chain) => Some(chain),
        }
    }
}
