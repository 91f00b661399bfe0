// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolution policy.

use bon::Builder;

use crate::model::ChainDepth;

/// Switches controlling a single resolution call.
///
/// The default is permissive: no cycle check and direct dependencies only.
/// Install and launch pipelines should use [`ResolverOptions::strict`].
///
/// Direct-only resolution never looks past the first level, so
/// `check_for_cycle` on its own only catches self-references there. With
/// `A -> B` and `B -> A`, resolving `A` direct-only with the check yields
/// `Ok([B])`. Enable `scan_direct_for_cycles` to report such cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Builder)]
pub struct ResolverOptions {
    /// Fail with a cycle error instead of skipping re-entered mods. In
    /// direct-only mode this covers the first level unless the scan is on.
    #[builder(setters(name = with_check_for_cycle), default = false)]
    check_for_cycle: bool,
    /// Flatten the full transitive chain instead of direct dependencies.
    #[builder(setters(name = with_resolve_complete_chain), default = false)]
    resolve_complete_chain: bool,
    /// In direct-only mode, still walk the reachable graph to detect cycles.
    /// Only has an effect together with `check_for_cycle`.
    #[builder(setters(name = with_scan_direct_for_cycles), default = false)]
    scan_direct_for_cycles: bool,
}

impl ResolverOptions {
    /// Cycle-checked, fully expanded resolution.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            check_for_cycle: true,
            resolve_complete_chain: true,
            scan_direct_for_cycles: false,
        }
    }

    #[must_use]
    pub const fn check_for_cycle(&self) -> bool {
        self.check_for_cycle
    }

    #[must_use]
    pub const fn resolve_complete_chain(&self) -> bool {
        self.resolve_complete_chain
    }

    #[must_use]
    pub const fn scan_direct_for_cycles(&self) -> bool {
        self.scan_direct_for_cycles
    }

    /// Whether direct-only resolution walks the graph for cycle detection.
    #[must_use]
    pub const fn scans_for_cycles(&self) -> bool {
        self.check_for_cycle && self.scan_direct_for_cycles && !self.resolve_complete_chain
    }

    /// Depth of the chains produced with these options.
    #[must_use]
    pub const fn depth(&self) -> ChainDepth {
        if self.resolve_complete_chain {
            ChainDepth::Complete
        } else {
            ChainDepth::Direct
        }
    }
}
