// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry handle that can be shared across threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ModRegistry;
use crate::error::ModResult;
use crate::model::{DependencyChain, Mod, ModIdentity};
use crate::resolver::{self, ResolverOptions};

/// Cloneable handle to a [`ModRegistry`] behind a mutex.
///
/// A resolution holds the lock for the whole top-level call, so concurrent
/// resolutions of overlapping mods run one after the other. A second
/// resolution of an already resolved mod is coalesced by the write-once
/// chain slot.
#[derive(Debug, Clone, Default)]
pub struct SharedModRegistry {
    inner: Arc<Mutex<ModRegistry>>,
}

impl SharedModRegistry {
    #[must_use]
    pub fn new(registry: ModRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Registers a mod.
    ///
    /// # Errors
    ///
    /// See [`ModRegistry::register`].
    pub fn register(&self, m: Mod) -> ModResult<()> {
        self.lock().register(m)
    }

    /// Resolves a mod while holding the registry lock.
    ///
    /// # Errors
    ///
    /// See [`resolver::resolve`].
    pub fn resolve(
        &self,
        identity: &ModIdentity,
        options: ResolverOptions,
    ) -> ModResult<DependencyChain> {
        let mut registry = self.lock();
        resolver::resolve(&mut registry, identity, options)
    }

    /// Runs `f` with shared access to the registry.
    pub fn read<R>(&self, f: impl FnOnce(&ModRegistry) -> R) -> R {
        f(&self.lock())
    }

    /// Returns a snapshot of the registry.
    #[must_use]
    pub fn snapshot(&self) -> ModRegistry {
        self.lock().clone()
    }

    // A panic while holding the lock cannot leave a half-written chain.
    fn lock(&self) -> MutexGuard<'_, ModRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<ModRegistry> for SharedModRegistry {
    fn from(registry: ModRegistry) -> Self {
        Self::new(registry)
    }
}
