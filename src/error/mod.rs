// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 ModError
//!                     |
//!   +---------+-------+-------+----------+
//!   |         |               |          |
//!   v         v               v          v
//! Duplicate Unresolved     Cycle      Chain/Registry
//! identity  reference   (CyclePath)   bookkeeping
//!
//! Side errors:
//!   IdentityError  RelativePath, InvalidWorkshopId, EmptyName, ...
//!   ConfigError    MissingKey, InvalidValue, NotFound
//! ```
//!
//! The engine (`registry`, `resolver`) returns [`ModResult`]. Application
//! layers (`config`, `cmd`) use the `anyhow` alias [`Result`].

use std::fmt;

use thiserror::Error;

use crate::model::{DependencyReference, ModIdentity};

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ModError`].
pub type ModResult<T> = std::result::Result<T, ModError>;

/// Errors raised by the mod registry and the dependency resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModError {
    /// A mod with an equal identity is already registered.
    #[error("mod '{0}' is already registered")]
    DuplicateModIdentity(ModIdentity),

    /// A declared dependency points to an identity absent from the registry.
    #[error("mod '{dependent}' depends on '{}', which is not registered", reference.identity())]
    UnresolvedDependencyReference {
        dependent: ModIdentity,
        reference: DependencyReference,
    },

    /// A reference path revisits a mod that is currently being resolved.
    #[error("dependency cycle detected: {path}")]
    DependencyCycleDetected { path: CyclePath },

    /// The mod to resolve is not a member of the registry.
    #[error("mod '{0}' is not registered")]
    ModNotRegistered(ModIdentity),

    /// A different chain was already attached to the mod.
    #[error("mod '{0}' already has a different dependency chain attached")]
    ChainAlreadyAttached(ModIdentity),
}

impl ModError {
    /// Returns the identity of the mod this error is primarily about.
    #[must_use]
    pub fn subject(&self) -> Option<&ModIdentity> {
        match self {
            Self::DuplicateModIdentity(id)
            | Self::ModNotRegistered(id)
            | Self::ChainAlreadyAttached(id) => Some(id),
            Self::UnresolvedDependencyReference { dependent, .. } => Some(dependent),
            Self::DependencyCycleDetected { path } => path.first(),
        }
    }
}

/// Ordered identities of a dependency cycle.
///
/// The first and last entries are the same mod: `[A, B, A]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CyclePath(Vec<ModIdentity>);

impl CyclePath {
    #[must_use]
    pub const fn new(path: Vec<ModIdentity>) -> Self {
        Self(path)
    }

    #[must_use]
    pub fn identities(&self) -> &[ModIdentity] {
        &self.0
    }

    #[must_use]
    pub fn first(&self) -> Option<&ModIdentity> {
        self.0.first()
    }

    /// Number of distinct mods on the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CyclePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

// --- Identity Errors ---

/// Errors raised while constructing a [`ModIdentity`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Path-based identities must be absolute.
    #[error("mod path must be absolute: {0}")]
    RelativePath(String),

    /// Workshop ids are positive integers.
    #[error("invalid workshop id: '{0}'")]
    InvalidWorkshopId(String),

    /// Virtual mods need a non-empty name.
    #[error("virtual mod name must not be empty")]
    EmptyName,

    /// Unknown `kind` discriminator.
    #[error("unknown mod kind '{0}' (expected path, workshop or virtual)")]
    UnknownKind(String),

    /// Text form is not `kind:locator`.
    #[error("malformed mod identity '{0}' (expected kind:locator)")]
    Malformed(String),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}
