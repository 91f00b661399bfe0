// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::{ResolverOptions, compute_chain, resolve};
use crate::error::{CyclePath, ModError};
use crate::model::{ChainDepth, DependencyReference, Mod, ModIdentity, ModState};
use crate::registry::ModRegistry;

fn id(name: &str) -> ModIdentity {
    ModIdentity::virtual_mod(name).unwrap()
}

fn ids(names: &[&str]) -> Vec<ModIdentity> {
    names.iter().map(|n| id(n)).collect()
}

fn create_registry(graph: &[(&str, &[&str])]) -> ModRegistry {
    let mut registry = ModRegistry::new();
    for (name, deps) in graph {
        let references = deps
            .iter()
            .map(|d| DependencyReference::new(id(d)))
            .collect();
        registry.register(Mod::new(id(name), references)).unwrap();
    }
    registry
}

fn complete() -> ResolverOptions {
    ResolverOptions::builder()
        .with_resolve_complete_chain(true)
        .build()
}

fn chain_of(registry: &ModRegistry, name: &str) -> Option<Vec<ModIdentity>> {
    registry
        .try_get(&id(name))
        .and_then(Mod::dependency_chain)
        .map(|chain| chain.identities().to_vec())
}

#[test]
fn test_no_dependencies_yields_empty_chain() {
    let mut registry = create_registry(&[("a", &[])]);

    let chain = resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap();
    assert!(chain.is_empty());
    assert_eq!(
        registry.try_get(&id("a")).unwrap().state(),
        ModState::Resolved
    );
}

#[test]
fn test_order_preservation() {
    let mut registry = create_registry(&[("a", &["c", "b"]), ("b", &[]), ("c", &[])]);

    let chain = resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap();
    assert_eq!(chain.identities(), ids(&["c", "b"]).as_slice());
}

#[test]
fn test_diamond_flattening() {
    let mut registry = create_registry(&[
        ("a", &["b", "c"]),
        ("b", &["d"]),
        ("c", &["d"]),
        ("d", &[]),
    ]);

    let chain = resolve(&mut registry, &id("a"), complete()).unwrap();
    assert_eq!(chain.identities(), ids(&["b", "d", "c"]).as_slice());
    assert_eq!(chain.depth(), ChainDepth::Complete);
}

#[test]
fn test_first_occurrence_wins_across_levels() {
    // a declares d directly after b, but b already pulled d in.
    let mut registry = create_registry(&[
        ("a", &["b", "d", "c"]),
        ("b", &["e", "d"]),
        ("c", &["e"]),
        ("d", &[]),
        ("e", &[]),
    ]);

    let chain = resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap();
    assert_eq!(chain.identities(), ids(&["b", "e", "d", "c"]).as_slice());
}

#[test]
fn test_cycle_detected_with_check() {
    let mut registry = create_registry(&[("a", &["b"]), ("b", &["a"])]);

    let err = resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap_err();
    assert_eq!(
        err,
        ModError::DependencyCycleDetected {
            path: CyclePath::new(ids(&["a", "b", "a"])),
        }
    );
    assert_eq!(registry.try_get(&id("a")).unwrap().state(), ModState::Unresolved);
    assert_eq!(registry.try_get(&id("b")).unwrap().state(), ModState::Unresolved);
}

#[test]
fn test_cycle_reports_only_the_loop() {
    let mut registry = create_registry(&[
        ("root", &["x"]),
        ("x", &["y"]),
        ("y", &["z"]),
        ("z", &["x"]),
    ]);

    let err = resolve(&mut registry, &id("root"), ResolverOptions::strict()).unwrap_err();
    let ModError::DependencyCycleDetected { path } = err else {
        panic!("expected cycle error, got {err:?}");
    };
    insta::assert_snapshot!(path.to_string(), @"virtual:x -> virtual:y -> virtual:z -> virtual:x");
}

#[test]
fn test_cycle_skipped_without_check() {
    let mut registry = create_registry(&[("a", &["b"]), ("b", &["a"])]);

    let chain = resolve(&mut registry, &id("a"), complete()).unwrap();
    assert_eq!(chain.identities(), ids(&["b"]).as_slice());

    // b lies on the cycle, so it is left for its own resolution.
    assert_eq!(registry.try_get(&id("b")).unwrap().state(), ModState::Unresolved);

    let chain_b = resolve(&mut registry, &id("b"), complete()).unwrap();
    assert_eq!(chain_b.identities(), ids(&["a"]).as_slice());
}

#[test]
fn test_self_reference() {
    let mut registry = create_registry(&[("a", &["a", "b"]), ("b", &[])]);

    let err = resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap_err();
    assert_eq!(
        err,
        ModError::DependencyCycleDetected {
            path: CyclePath::new(ids(&["a", "a"])),
        }
    );

    let chain = resolve(&mut registry, &id("a"), complete()).unwrap();
    assert_eq!(chain.identities(), ids(&["b"]).as_slice());
}

#[test]
fn test_missing_reference() {
    let mut registry = create_registry(&[("a", &["x"])]);

    let err = resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap_err();
    assert_eq!(
        err,
        ModError::UnresolvedDependencyReference {
            dependent: id("a"),
            reference: DependencyReference::new(id("x")),
        }
    );
    assert_eq!(registry.try_get(&id("a")).unwrap().state(), ModState::Unresolved);
}

#[test]
fn test_missing_deep_reference_is_all_or_nothing() {
    let mut registry = create_registry(&[("a", &["b", "c"]), ("b", &[]), ("c", &["x"])]);

    let err = resolve(&mut registry, &id("a"), complete()).unwrap_err();
    assert!(matches!(
        err,
        ModError::UnresolvedDependencyReference { ref dependent, .. } if *dependent == id("c")
    ));

    // b was fully walked before the failure but receives nothing.
    for name in ["a", "b", "c"] {
        assert_eq!(
            registry.try_get(&id(name)).unwrap().state(),
            ModState::Unresolved,
            "{name} should stay unresolved"
        );
    }
}

#[test]
fn test_direct_only_mode() {
    let mut registry = create_registry(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);

    let chain = resolve(&mut registry, &id("a"), ResolverOptions::default()).unwrap();
    assert_eq!(chain.identities(), ids(&["b"]).as_slice());
    assert_eq!(chain.depth(), ChainDepth::Direct);
    assert_eq!(registry.try_get(&id("b")).unwrap().state(), ModState::Unresolved);
}

#[test]
fn test_direct_mode_deduplicates_declared_references() {
    let mut registry = create_registry(&[("a", &["b", "c", "b"]), ("b", &[]), ("c", &[])]);

    let chain = resolve(&mut registry, &id("a"), ResolverOptions::default()).unwrap();
    assert_eq!(chain.identities(), ids(&["b", "c"]).as_slice());
}

#[test]
fn test_direct_mode_ignores_deep_cycles_by_default() {
    let mut registry = create_registry(&[("a", &["b"]), ("b", &["c"]), ("c", &["b"])]);

    let options = ResolverOptions::builder().with_check_for_cycle(true).build();
    let chain = resolve(&mut registry, &id("a"), options).unwrap();
    assert_eq!(chain.identities(), ids(&["b"]).as_slice());
}

#[test]
fn test_direct_mode_check_only_sees_first_level() {
    let registry = create_registry(&[("a", &["b"]), ("b", &["a"])]);

    // b -> a is beyond the first level, so only the scan reports it.
    let check_only = ResolverOptions::builder().with_check_for_cycle(true).build();
    let chain = compute_chain(&registry, &id("a"), check_only).unwrap();
    assert_eq!(chain.identities(), ids(&["b"]).as_slice());

    let scanning = ResolverOptions::builder()
        .with_check_for_cycle(true)
        .with_scan_direct_for_cycles(true)
        .build();
    let err = compute_chain(&registry, &id("a"), scanning).unwrap_err();
    assert_eq!(
        err,
        ModError::DependencyCycleDetected {
            path: CyclePath::new(ids(&["a", "b", "a"])),
        }
    );
}

#[test]
fn test_direct_mode_scan_detects_deep_cycles() {
    let registry = create_registry(&[("a", &["b"]), ("b", &["c"]), ("c", &["b"])]);

    let options = ResolverOptions::builder()
        .with_check_for_cycle(true)
        .with_scan_direct_for_cycles(true)
        .build();
    assert!(options.scans_for_cycles());

    let err = compute_chain(&registry, &id("a"), options).unwrap_err();
    assert_eq!(
        err,
        ModError::DependencyCycleDetected {
            path: CyclePath::new(ids(&["b", "c", "b"])),
        }
    );
}

#[test]
fn test_direct_mode_scan_tolerates_shared_subtrees() {
    let registry = create_registry(&[
        ("a", &["b", "c"]),
        ("b", &["d"]),
        ("c", &["d"]),
        ("d", &["missing"]),
    ]);

    let options = ResolverOptions::builder()
        .with_check_for_cycle(true)
        .with_scan_direct_for_cycles(true)
        .build();
    let chain = compute_chain(&registry, &id("a"), options).unwrap();
    assert_eq!(chain.identities(), ids(&["b", "c"]).as_slice());
}

#[test]
fn test_complete_resolution_commits_walked_dependencies() {
    let mut registry = create_registry(&[
        ("a", &["b", "c"]),
        ("b", &["d"]),
        ("c", &["d"]),
        ("d", &[]),
    ]);

    resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap();

    assert_eq!(chain_of(&registry, "b"), Some(ids(&["d"])));
    assert_eq!(chain_of(&registry, "c"), Some(ids(&["d"])));
    assert_eq!(chain_of(&registry, "d"), Some(Vec::new()));
}

#[test]
fn test_walked_dependency_with_existing_chain_is_kept() {
    let mut registry = create_registry(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);

    resolve(&mut registry, &id("b"), ResolverOptions::default()).unwrap();
    resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap();

    let b = registry.try_get(&id("b")).unwrap();
    assert_eq!(b.dependency_chain().unwrap().depth(), ChainDepth::Direct);
    assert_eq!(chain_of(&registry, "a"), Some(ids(&["b", "c"])));
}

#[test]
fn test_idempotent_resolution() {
    let mut registry = create_registry(&[
        ("a", &["b", "c"]),
        ("b", &["d"]),
        ("c", &["d", "e"]),
        ("d", &[]),
        ("e", &[]),
    ]);

    let first = resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap();
    let second = resolve(&mut registry, &id("a"), ResolverOptions::strict()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_conflicting_resolution_rejected() {
    let mut registry = create_registry(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);

    resolve(&mut registry, &id("a"), ResolverOptions::default()).unwrap();
    let err = resolve(&mut registry, &id("a"), complete()).unwrap_err();
    assert_eq!(err, ModError::ChainAlreadyAttached(id("a")));
    assert_eq!(chain_of(&registry, "a"), Some(ids(&["b"])));
}

#[test]
fn test_unregistered_root() {
    let mut registry = create_registry(&[("a", &[])]);

    let err = resolve(&mut registry, &id("ghost"), ResolverOptions::strict()).unwrap_err();
    assert_eq!(err, ModError::ModNotRegistered(id("ghost")));
}

#[test]
fn test_compute_chain_does_not_attach() {
    let registry = create_registry(&[("a", &["b"]), ("b", &[])]);

    let chain = compute_chain(&registry, &id("a"), ResolverOptions::strict()).unwrap();
    assert_eq!(chain.identities(), ids(&["b"]).as_slice());
    assert_eq!(registry.try_get(&id("a")).unwrap().state(), ModState::Unresolved);
}

#[test]
fn test_chain_invariants_on_dense_graph() {
    let graph: &[(&str, &[&str])] = &[
        ("a", &["b", "c", "d"]),
        ("b", &["c", "e"]),
        ("c", &["e", "f"]),
        ("d", &["b", "f"]),
        ("e", &["f"]),
        ("f", &[]),
    ];
    let mut registry = create_registry(graph);

    for (name, _) in graph {
        resolve(&mut registry, &id(name), ResolverOptions::strict()).unwrap();
    }

    for m in registry.all() {
        let chain = m.dependency_chain().unwrap();
        assert!(!chain.contains(m.identity()), "{} contains itself", m.identity());

        let unique: HashSet<_> = chain.iter().collect();
        assert_eq!(unique.len(), chain.len(), "{} has duplicates", m.identity());
    }

    assert_eq!(chain_of(&registry, "a"), Some(ids(&["b", "c", "e", "f", "d"])));
}

#[test]
fn test_cyclic_graph_without_check_never_contains_self() {
    let graph: &[(&str, &[&str])] = &[
        ("a", &["b", "c"]),
        ("b", &["c", "a"]),
        ("c", &["a", "b"]),
    ];
    let mut registry = create_registry(graph);

    for (name, _) in graph {
        let chain = resolve(&mut registry, &id(name), complete()).unwrap();
        assert!(!chain.contains(&id(name)));
        let unique: HashSet<_> = chain.iter().collect();
        assert_eq!(unique.len(), chain.len());
    }
}

#[test]
fn test_dependency_leading_into_cycle_is_committed() {
    let mut registry = create_registry(&[
        ("a", &["d"]),
        ("d", &["e"]),
        ("e", &["f"]),
        ("f", &["e"]),
    ]);

    let chain = resolve(&mut registry, &id("a"), complete()).unwrap();
    assert_eq!(chain.identities(), ids(&["d", "e", "f"]).as_slice());

    assert_eq!(chain_of(&registry, "d"), Some(ids(&["e", "f"])));
    assert_eq!(registry.try_get(&id("e")).unwrap().state(), ModState::Unresolved);
    assert_eq!(registry.try_get(&id("f")).unwrap().state(), ModState::Unresolved);
}

#[test]
fn test_fully_connected_graph_resolves_quickly() {
    const SIZE: usize = 14;

    let names: Vec<String> = (0..SIZE).map(|i| format!("m{i}")).collect();
    let mut registry = ModRegistry::new();
    for name in &names {
        let references = names
            .iter()
            .filter(|other| *other != name)
            .map(|other| DependencyReference::new(id(other)))
            .collect();
        registry.register(Mod::new(id(name), references)).unwrap();
    }

    let started = Instant::now();
    let chain = resolve(&mut registry, &id("m0"), complete()).unwrap();
    let elapsed = started.elapsed();
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");

    let expected: Vec<_> = names[1..].iter().map(|n| id(n)).collect();
    assert_eq!(chain.identities(), expected.as_slice());

    // Every other mod lies on a cycle through m0.
    for name in &names[1..] {
        assert_eq!(registry.try_get(&id(name)).unwrap().state(), ModState::Unresolved);
    }

    let strict = compute_chain(&registry, &id("m1"), ResolverOptions::strict()).unwrap_err();
    assert_eq!(
        strict,
        ModError::DependencyCycleDetected {
            path: CyclePath::new(ids(&["m1", "m0", "m1"])),
        }
    );
}
