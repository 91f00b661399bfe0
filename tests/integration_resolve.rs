// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for dependency resolution.
//!
//! Tests the registry, resolver and game with realistic mod setups that mix
//! path, workshop and virtual identities.

use std::thread;

use modchain::error::ModError;
use modchain::game::Game;
use modchain::model::{DependencyReference, Mod, ModIdentity, ModState, PathCase};
use modchain::registry::{ModRegistry, SharedModRegistry};
use modchain::resolver::{self, ResolverOptions};

fn workshop(id: u64) -> ModIdentity {
    ModIdentity::workshop(id).unwrap()
}

fn local(path: &str) -> ModIdentity {
    ModIdentity::path(path, PathCase::Insensitive).unwrap()
}

fn depends_on(identities: &[&ModIdentity]) -> Vec<DependencyReference> {
    identities
        .iter()
        .map(|identity| DependencyReference::new((*identity).clone()))
        .collect()
}

fn names(registry: &ModRegistry, identity: &ModIdentity) -> Vec<String> {
    registry
        .chain_of(identity)
        .unwrap()
        .into_iter()
        .map(|m| m.name().to_string())
        .collect()
}

/// Empire at War with a total conversion, its asset pack, a submod and a
/// locally installed patch:
///
/// ```text
/// submod -> [raw, patch]
/// raw    -> [assets, base]
/// patch  -> [raw]
/// assets -> [base]
/// ```
fn empire_at_war() -> (Game, [ModIdentity; 4]) {
    let mut game = Game::new("Empire at War").unwrap();
    game.register_base().unwrap();
    let base = game.base_identity().clone();

    let raw = workshop(1_129_810_972);
    let assets = workshop(1_125_571_106);
    let patch = local("C:/Games/EaW/Mods/RaW-Patch");
    let submod = workshop(2_508_288_191);

    game.register_mod(Mod::new(raw.clone(), depends_on(&[&assets, &base])).with_name("Republic at War"))
        .unwrap();
    game.register_mod(Mod::new(assets.clone(), depends_on(&[&base])).with_name("Republic Assets"))
        .unwrap();
    game.register_mod(Mod::new(patch.clone(), depends_on(&[&raw])).with_name("RaW Patch"))
        .unwrap();
    game.register_mod(
        Mod::new(submod.clone(), depends_on(&[&raw, &patch])).with_name("Clone Wars Submod"),
    )
    .unwrap();

    (game, [raw, assets, patch, submod])
}

// =============================================================================
// Complete chains
// =============================================================================

#[test]
fn resolve_submod_flattens_shared_dependencies() {
    let (mut game, [raw, assets, patch, submod]) = empire_at_war();

    game.resolve_mod(&submod, ResolverOptions::strict()).unwrap();

    assert_eq!(
        names(game.registry(), &submod),
        vec!["Republic at War", "Republic Assets", "Empire at War", "RaW Patch"]
    );

    // Dependencies walked on the way were resolved too.
    for identity in [&raw, &assets, &patch] {
        assert_eq!(
            game.registry().try_get(identity).unwrap().state(),
            ModState::Resolved
        );
    }
    assert_eq!(
        names(game.registry(), &patch),
        vec!["Republic at War", "Republic Assets", "Empire at War"]
    );
}

#[test]
fn resolve_all_in_any_order_agrees() {
    let (mut forward, [_, _, _, submod]) = empire_at_war();
    let report = forward.resolve_all(ResolverOptions::strict());
    assert!(report.is_success());
    assert_eq!(report.resolved.len(), 5);

    let (mut backward, _) = empire_at_war();
    let mut identities: Vec<ModIdentity> = backward
        .registry()
        .all()
        .iter()
        .map(|m| m.identity().clone())
        .collect();
    identities.reverse();
    for identity in &identities {
        backward.resolve_mod(identity, ResolverOptions::strict()).unwrap();
    }

    for m in forward.registry().all() {
        assert_eq!(
            m.dependency_chain(),
            backward.registry().try_get(m.identity()).unwrap().dependency_chain()
        );
    }
    assert_eq!(names(backward.registry(), &submod).len(), 4);
}

#[test]
fn path_identities_ignore_case_and_separators() {
    let (mut game, [_, _, _, submod]) = empire_at_war();
    let spelled_differently = local(r"c:\games\eaw\mods\raw-patch\");

    let chain = game
        .resolve_mod(&spelled_differently, ResolverOptions::strict())
        .unwrap();
    assert_eq!(chain.len(), 3);

    game.resolve_mod(&submod, ResolverOptions::strict()).unwrap();
    assert!(
        game.registry()
            .try_get(&submod)
            .unwrap()
            .dependency_chain()
            .unwrap()
            .contains(&spelled_differently)
    );
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn missing_dependency_leaves_everything_unresolved() {
    let (mut game, [raw, _, _, _]) = empire_at_war();
    let missing = workshop(999);
    let broken = workshop(1_000);
    game.register_mod(Mod::new(broken.clone(), depends_on(&[&raw, &missing])))
        .unwrap();

    let err = game
        .resolve_mod(&broken, ResolverOptions::strict())
        .unwrap_err();
    assert_eq!(
        err,
        ModError::UnresolvedDependencyReference {
            dependent: broken.clone(),
            reference: DependencyReference::new(missing),
        }
    );

    assert!(
        game.registry()
            .all()
            .iter()
            .all(|m| m.state() == ModState::Unresolved)
    );
}

#[test]
fn cycle_is_reported_from_the_entry_point() {
    let mut registry = ModRegistry::new();
    let a = workshop(1);
    let b = workshop(2);
    let c = workshop(3);
    registry
        .register_all([
            Mod::new(a.clone(), depends_on(&[&b])),
            Mod::new(b.clone(), depends_on(&[&c])),
            Mod::new(c.clone(), depends_on(&[&b])),
        ])
        .unwrap();

    let err = resolver::resolve(&mut registry, &a, ResolverOptions::strict()).unwrap_err();
    let ModError::DependencyCycleDetected { path } = &err else {
        panic!("expected a cycle, got {err}");
    };
    assert_eq!(path.identities(), &[b.clone(), c.clone(), b.clone()]);
    assert_eq!(
        err.to_string(),
        "dependency cycle detected: workshop:2 -> workshop:3 -> workshop:2"
    );

    let relaxed = ResolverOptions::builder()
        .with_resolve_complete_chain(true)
        .build();
    let chain = resolver::resolve(&mut registry, &a, relaxed).unwrap();
    assert_eq!(chain.identities(), &[b, c]);
}

#[test]
fn direct_mode_only_lists_declared_dependencies() {
    let (mut game, [raw, assets, _, submod]) = empire_at_war();
    let direct = ResolverOptions::builder()
        .with_check_for_cycle(true)
        .build();

    let chain = game.resolve_mod(&submod, direct).unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(
        game.registry().try_get(&raw).unwrap().state(),
        ModState::Unresolved
    );
    assert_eq!(
        game.registry().try_get(&assets).unwrap().state(),
        ModState::Unresolved
    );

    // A later complete resolution cannot replace the direct chain.
    let err = game
        .resolve_mod(&submod, ResolverOptions::strict())
        .unwrap_err();
    assert_eq!(err, ModError::ChainAlreadyAttached(submod));
}

// =============================================================================
// Shared registry
// =============================================================================

#[test]
fn concurrent_resolutions_are_serialized() {
    let (game, [raw, _, patch, submod]) = empire_at_war();
    let shared = SharedModRegistry::new(game.registry().clone());

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let shared = shared.clone();
            let target = [&submod, &patch, &raw][i % 3].clone();
            thread::spawn(move || shared.resolve(&target, ResolverOptions::strict()))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let registry = shared.snapshot();
    assert_eq!(names(&registry, &submod).len(), 4);
    assert_eq!(
        registry
            .all()
            .iter()
            .filter(|m| m.state() == ModState::Resolved)
            .count(),
        5
    );
}
