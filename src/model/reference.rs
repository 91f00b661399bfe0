// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declared dependency references.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::ModIdentity;

/// How discovery can materialize a referenced mod that is not installed yet.
///
/// The resolver never reads this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ResolutionHint {
    /// Mod is expected in this directory.
    Directory { path: PathBuf },
    /// Mod can be subscribed to on the Steam Workshop.
    Workshop { id: u64 },
}

/// A declared dependency on another mod.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyReference {
    identity: ModIdentity,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<ResolutionHint>,
}

impl DependencyReference {
    #[must_use]
    pub const fn new(identity: ModIdentity) -> Self {
        Self {
            identity,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: ResolutionHint) -> Self {
        self.hint = Some(hint);
        self
    }

    #[must_use]
    pub const fn identity(&self) -> &ModIdentity {
        &self.identity
    }

    #[must_use]
    pub const fn hint(&self) -> Option<&ResolutionHint> {
        self.hint.as_ref()
    }
}

impl From<ModIdentity> for DependencyReference {
    fn from(identity: ModIdentity) -> Self {
        Self::new(identity)
    }
}

impl fmt::Display for DependencyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identity.fmt(f)
    }
}
