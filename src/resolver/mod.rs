// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency resolver.
//!
//! ```text
//! resolve(registry, A, options)
//!   path = [A], visited = {A}
//!   for ref in A.references (declared order)
//!     lookup ref ----------------------> missing: UnresolvedDependencyReference
//!     ref on path? --check------------> DependencyCycleDetected [ref .. ref]
//!                  --no check---------> skip
//!     ref visited? -------------------> skip
//!     complete: append ref, push ref, recurse, pop
//!     direct:   append ref
//!   commit A's chain (+ own chains of unresolved mods walked on the way)
//! ```
//!
//! Diamond `A -> [B, C]`, `B -> [D]`, `C -> [D]` flattens to `[B, D, C]`.
//!
//! # Flattening
//!
//! Appending each dependency followed by its own chain, first occurrence
//! winning, yields the depth-first preorder of the graph from the resolved
//! mod. A single walk with one visited set per call therefore produces the
//! chain, and every mod and reference is looked at once.
//!
//! Walked dependencies get their own chain from a separate walk started at
//! them, so a committed chain never depends on where the call started.
//! Without cycle checking, a dependency that lies on a cycle is left
//! unresolved until it is resolved itself.

mod options;

pub use options::ResolverOptions;

use std::collections::HashSet;

use crate::error::{CyclePath, ModError, ModResult};
use crate::model::{ChainDepth, DependencyChain, DependencyReference, Mod, ModIdentity, ModState};
use crate::registry::ModRegistry;

/// Resolves the dependency chain of a registered mod and attaches it.
///
/// In complete-chain mode, dependencies walked on the way that are still
/// unresolved receive their own complete chain as well. Nothing is written
/// unless the whole call succeeds.
///
/// # Errors
///
/// - [`ModError::ModNotRegistered`] if `identity` is not in the registry.
/// - [`ModError::UnresolvedDependencyReference`] for a reference to an
///   unregistered mod.
/// - [`ModError::DependencyCycleDetected`] when cycle checking is enabled and
///   a reference re-enters the current path.
/// - [`ModError::ChainAlreadyAttached`] if the mod already holds a different chain.
pub fn resolve(
    registry: &mut ModRegistry,
    identity: &ModIdentity,
    options: ResolverOptions,
) -> ModResult<DependencyChain> {
    let resolution = DependencyResolver::new(registry, options).run(identity)?;
    resolution.commit(registry, identity)
}

/// Computes the chain of a registered mod without attaching anything.
///
/// # Errors
///
/// Same as [`resolve`], except [`ModError::ChainAlreadyAttached`].
pub fn compute_chain(
    registry: &ModRegistry,
    identity: &ModIdentity,
    options: ResolverOptions,
) -> ModResult<DependencyChain> {
    let resolver = DependencyResolver::new(registry, options);
    let root = resolver.root(identity)?;
    resolver.chain(root)
}

/// Result of one top-level call, not yet written to the registry.
struct Resolution {
    chain: DependencyChain,
    /// Complete chains of walked dependencies that are still unresolved.
    dependencies: Vec<(ModIdentity, Vec<ModIdentity>)>,
}

impl Resolution {
    fn commit(self, registry: &mut ModRegistry, identity: &ModIdentity) -> ModResult<DependencyChain> {
        let root = registry
            .get_mut(identity)
            .ok_or_else(|| ModError::ModNotRegistered(identity.clone()))?;
        if !root.attach_chain(self.chain.clone())? {
            tracing::debug!(mod_id = %identity, "Chain already attached, coalesced");
        }

        let mut committed = 0usize;
        for (dependency, entries) in self.dependencies {
            if let Some(m) = registry.get_mut(&dependency)
                && m.state() == ModState::Unresolved
            {
                m.attach_chain(DependencyChain::new(ChainDepth::Complete, entries))?;
                committed += 1;
            }
        }
        if committed > 0 {
            tracing::debug!(mod_id = %identity, committed, "Attached chains of walked dependencies");
        }

        Ok(self.chain)
    }
}

/// Resolution of a single top-level call against a read-only registry.
struct DependencyResolver<'a> {
    registry: &'a ModRegistry,
    options: ResolverOptions,
}

impl<'a> DependencyResolver<'a> {
    const fn new(registry: &'a ModRegistry, options: ResolverOptions) -> Self {
        Self { registry, options }
    }

    fn root(&self, identity: &ModIdentity) -> ModResult<&'a Mod> {
        self.registry
            .try_get(identity)
            .ok_or_else(|| ModError::ModNotRegistered(identity.clone()))
    }

    fn run(&self, identity: &ModIdentity) -> ModResult<Resolution> {
        let root = self.root(identity)?;

        tracing::debug!(
            mod_id = %identity,
            check_for_cycle = self.options.check_for_cycle(),
            complete = self.options.resolve_complete_chain(),
            "Resolving dependency chain"
        );

        let chain = self.chain(root)?;
        tracing::debug!(mod_id = %identity, chain_len = chain.len(), "Resolved dependency chain");

        let dependencies = if self.options.resolve_complete_chain() {
            self.dependency_chains(&chain)?
        } else {
            Vec::new()
        };

        Ok(Resolution {
            chain,
            dependencies,
        })
    }

    fn chain(&self, root: &'a Mod) -> ModResult<DependencyChain> {
        let entries = if self.options.resolve_complete_chain() {
            Flatten::run(self.registry, self.options, root)?.entries
        } else {
            self.direct(root)?
        };
        Ok(DependencyChain::new(self.options.depth(), entries))
    }

    /// Declared references of `root`, deduplicated, self-references dropped.
    fn direct(&self, root: &'a Mod) -> ModResult<Vec<ModIdentity>> {
        let registry = self.registry;
        let path = [root.identity().clone()];
        let mut scan = self
            .options
            .scans_for_cycles()
            .then(|| CycleScan::new(registry, root));

        let mut entries = Vec::new();
        let mut seen = HashSet::from([root.identity().clone()]);
        for reference in root.references() {
            let target = lookup(registry, root, reference)?;
            let target_id = target.identity();

            if let Some(pos) = position_on_path(&path, target_id) {
                reenter(self.options, &path, pos, 0, target_id)?;
                continue;
            }
            if let Some(scan) = scan.as_mut() {
                scan.scan(target)?;
            }
            if seen.insert(target_id.clone()) {
                entries.push(target_id.clone());
            }
        }
        Ok(entries)
    }

    /// Own complete chains of the unresolved mods in `chain`.
    fn dependency_chains(
        &self,
        chain: &DependencyChain,
    ) -> ModResult<Vec<(ModIdentity, Vec<ModIdentity>)>> {
        let mut dependencies = Vec::new();
        for dependency in chain {
            let Some(m) = self.registry.try_get(dependency) else {
                continue;
            };
            if m.state() != ModState::Unresolved {
                continue;
            }

            let flatten = Flatten::run(self.registry, self.options, m)?;
            if flatten.reenters_root {
                tracing::trace!(mod_id = %dependency, "Dependency lies on a cycle, left unresolved");
                continue;
            }
            dependencies.push((dependency.clone(), flatten.entries));
        }
        Ok(dependencies)
    }
}

/// Depth-first preorder of everything reachable from one mod.
///
/// `path` holds the mods being walked, `visited` every mod already placed in
/// `entries` plus the start.
struct Flatten<'a> {
    registry: &'a ModRegistry,
    options: ResolverOptions,
    path: Vec<ModIdentity>,
    visited: HashSet<ModIdentity>,
    entries: Vec<ModIdentity>,
    /// Some reference led back to the start.
    reenters_root: bool,
}

impl<'a> Flatten<'a> {
    fn run(registry: &'a ModRegistry, options: ResolverOptions, root: &'a Mod) -> ModResult<Self> {
        let mut flatten = Self {
            registry,
            options,
            path: vec![root.identity().clone()],
            visited: HashSet::from([root.identity().clone()]),
            entries: Vec::new(),
            reenters_root: false,
        };
        flatten.visit(root)?;
        Ok(flatten)
    }

    fn visit(&mut self, node: &'a Mod) -> ModResult<()> {
        let registry = self.registry;
        let depth = self.path.len() - 1;

        for reference in node.references() {
            let target = lookup(registry, node, reference)?;
            let target_id = target.identity();

            tracing::trace!(mod_id = %node.identity(), dependency = %target_id, "Visiting dependency");

            if let Some(pos) = position_on_path(&self.path, target_id) {
                reenter(self.options, &self.path, pos, depth, target_id)?;
                self.reenters_root |= pos == 0;
                continue;
            }
            if !self.visited.insert(target_id.clone()) {
                continue;
            }

            self.entries.push(target_id.clone());
            self.path.push(target_id.clone());
            self.visit(target)?;
            self.path.pop();
        }
        Ok(())
    }
}

/// Read-only walk of everything reachable from the direct dependencies,
/// failing on cycles. Unregistered deep references are ignored.
struct CycleScan<'a> {
    registry: &'a ModRegistry,
    path: Vec<ModIdentity>,
    scanned: HashSet<ModIdentity>,
}

impl<'a> CycleScan<'a> {
    fn new(registry: &'a ModRegistry, root: &Mod) -> Self {
        Self {
            registry,
            path: vec![root.identity().clone()],
            scanned: HashSet::new(),
        }
    }

    fn scan(&mut self, target: &'a Mod) -> ModResult<()> {
        let id = target.identity();
        if self.scanned.contains(id) {
            return Ok(());
        }

        self.path.push(id.clone());
        let result = self.scan_references(target);
        self.path.pop();
        result?;

        self.scanned.insert(id.clone());
        Ok(())
    }

    fn scan_references(&mut self, node: &'a Mod) -> ModResult<()> {
        let registry = self.registry;
        for reference in node.references() {
            let Some(target) = registry.try_get(reference.identity()) else {
                tracing::debug!(
                    mod_id = %node.identity(),
                    dependency = %reference.identity(),
                    "Unregistered reference ignored by cycle scan"
                );
                continue;
            };
            if let Some(pos) = position_on_path(&self.path, target.identity()) {
                return Err(cycle_error(&self.path, pos, target.identity()));
            }
            self.scan(target)?;
        }
        Ok(())
    }
}

fn lookup<'a>(
    registry: &'a ModRegistry,
    dependent: &Mod,
    reference: &DependencyReference,
) -> ModResult<&'a Mod> {
    registry
        .try_get(reference.identity())
        .ok_or_else(|| ModError::UnresolvedDependencyReference {
            dependent: dependent.identity().clone(),
            reference: reference.clone(),
        })
}

/// Handles a reference from `path[depth]` to the mod at `path[pos]`.
fn reenter(
    options: ResolverOptions,
    path: &[ModIdentity],
    pos: usize,
    depth: usize,
    target: &ModIdentity,
) -> ModResult<()> {
    if options.check_for_cycle() {
        return Err(cycle_error(path, pos, target));
    }
    if pos == depth {
        tracing::trace!(mod_id = %target, "Dropping self-reference");
    } else {
        tracing::warn!(
            mod_id = %path[depth],
            dependency = %target,
            "Skipping dependency that is already being resolved"
        );
    }
    Ok(())
}

fn cycle_error(path: &[ModIdentity], pos: usize, target: &ModIdentity) -> ModError {
    let mut cycle = path[pos..].to_vec();
    cycle.push(target.clone());
    ModError::DependencyCycleDetected {
        path: CyclePath::new(cycle),
    }
}

fn position_on_path(path: &[ModIdentity], identity: &ModIdentity) -> Option<usize> {
    path.iter().position(|id| id == identity)
}

#[cfg(test)]
mod tests;
