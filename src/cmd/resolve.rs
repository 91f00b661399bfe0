// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Resolve and check commands for modchain.
//!
//! ```text
//! resolve [MODS...]
//!   select: kind:locator | name glob | all
//!   resolve each in order --> ChainReport --> text | json
//!
//! check
//!   Game::resolve_all --> ResolutionReport --> summary + failures
//! ```

use std::collections::HashSet;

use anyhow::{anyhow, bail};
use serde::Serialize;

use crate::cli::resolve::{CheckArgs, ResolveArgs};
use crate::config::Config;
use crate::error::Result;
use crate::game::{Game, ResolutionReport};
use crate::model::{ChainDepth, ModIdentity, PathCase};
use crate::registry::ModRegistry;
use crate::resolver::ResolverOptions;

/// A chain entry as printed by `resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainEntry {
    pub id: ModIdentity,
    pub name: String,
}

/// Resolution outcome of one mod as printed by `resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    pub id: ModIdentity,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<ChainDepth>,
    pub chain: Vec<ChainEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChainReport {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Main handler for resolve command.
///
/// # Errors
///
/// Returns an error if the manifest is invalid, a pattern matches no mod, or
/// any selected mod fails to resolve.
pub fn run_resolve_command(args: &ResolveArgs, config: &Config) -> Result<()> {
    let mut game = config.build_game()?;
    let options = args.policy.apply(config.resolver_options());
    let selected = select_mods(game.registry(), &args.mods, config.game.path_case())?;

    tracing::debug!(
        mods = selected.len(),
        check_for_cycle = options.check_for_cycle(),
        resolve_complete_chain = options.resolve_complete_chain(),
        "Resolving selected mods"
    );

    let reports = resolve_selected(&mut game, &selected, options);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for line in format_chain_reports(&reports) {
            println!("{line}");
        }
    }

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        return Err(anyhow!(
            "{failed} of {} mods failed to resolve",
            reports.len()
        ));
    }
    Ok(())
}

/// Main handler for check command.
///
/// # Errors
///
/// Returns an error if the manifest is invalid or any mod fails to resolve.
pub fn run_check_command(args: &CheckArgs, config: &Config) -> Result<()> {
    let mut game = config.build_game()?;
    let options = args.policy.apply(config.resolver_options());

    let report = game.resolve_all(options);
    for line in format_resolution_report(&report) {
        println!("{line}");
    }

    if !report.is_success() {
        bail!("{} mods failed to resolve", report.failed.len());
    }
    Ok(())
}

/// Maps command-line mod arguments to registered identities.
///
/// An argument that parses as `kind:locator` is taken as an identity even if
/// it is not registered; anything else is matched against display names.
/// All mods are selected when `patterns` is empty. Duplicates are dropped.
///
/// # Errors
///
/// Returns an error if a name pattern is an invalid glob or matches nothing.
pub fn select_mods(
    registry: &ModRegistry,
    patterns: &[String],
    case: PathCase,
) -> Result<Vec<ModIdentity>> {
    if patterns.is_empty() {
        return Ok(registry.all().iter().map(|m| m.identity().clone()).collect());
    }

    let mut seen = HashSet::new();
    let mut selected = Vec::new();
    for pattern in patterns {
        let matches = match ModIdentity::parse_with_case(pattern, case) {
            Ok(identity) => vec![identity],
            Err(_) => {
                let found = registry.find_by_name(pattern)?;
                if found.is_empty() {
                    bail!("no mod matches '{pattern}'");
                }
                found.into_iter().map(|m| m.identity().clone()).collect()
            }
        };
        for identity in matches {
            if seen.insert(identity.clone()) {
                selected.push(identity);
            }
        }
    }
    Ok(selected)
}

/// Resolves each identity in order; failures are recorded, not returned.
pub fn resolve_selected(
    game: &mut Game,
    identities: &[ModIdentity],
    options: ResolverOptions,
) -> Vec<ChainReport> {
    identities
        .iter()
        .map(|identity| {
            let outcome = game.resolve_mod(identity, options);
            let registry = game.registry();
            let name = display_name(registry, identity);
            match outcome {
                Ok(chain) => ChainReport {
                    id: identity.clone(),
                    name,
                    depth: Some(chain.depth()),
                    chain: chain
                        .iter()
                        .map(|dep| ChainEntry {
                            id: dep.clone(),
                            name: display_name(registry, dep),
                        })
                        .collect(),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(mod_id = %identity, error = %e, "Failed to resolve mod");
                    ChainReport {
                        id: identity.clone(),
                        name,
                        depth: None,
                        chain: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}

fn display_name(registry: &ModRegistry, identity: &ModIdentity) -> String {
    registry
        .try_get(identity)
        .map_or_else(|| identity.locator().to_string(), |m| m.name().to_string())
}

/// Text form of `resolve` output.
///
/// ```text
/// Republic at War (workshop:1129810972)
///   1. Republic Assets (workshop:1125571106)
///   2. Empire at War (virtual:Empire at War)
/// ```
#[must_use]
pub fn format_chain_reports(reports: &[ChainReport]) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        if let Some(error) = &report.error {
            lines.push(format!("{} ({}): error: {error}", report.name, report.id));
            continue;
        }
        lines.push(format!("{} ({})", report.name, report.id));
        if report.chain.is_empty() {
            lines.push("  (no dependencies)".to_string());
        }
        for (i, entry) in report.chain.iter().enumerate() {
            lines.push(format!("  {}. {} ({})", i + 1, entry.name, entry.id));
        }
    }
    lines
}

/// Text form of `check` output.
#[must_use]
pub fn format_resolution_report(report: &ResolutionReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} resolved, {} failed",
        report.resolved.len(),
        report.failed.len()
    )];
    lines.extend(report.failed.iter().map(|failure| format!("  {failure}")));
    lines
}
