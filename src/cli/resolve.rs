// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the resolution commands.
//!
//! # Policy Flags
//!
//! ```text
//! [resolver] section of the config
//!   --no-cycle-check   check_for_cycle = false
//!   --direct           resolve_complete_chain = false
//!   --scan-cycles      scan_direct_for_cycles = true (requires --direct)
//! ```

use clap::{ArgAction, Args};

use crate::resolver::ResolverOptions;

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Only lists mods whose name matches this glob, like 'Republic*'.
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,
}

/// Resolution policy overrides.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PolicyArgs {
    /// Silently skips dependency cycles instead of failing.
    #[arg(long = "no-cycle-check", action = ArgAction::SetTrue)]
    pub no_cycle_check: bool,

    /// Only resolves direct dependencies.
    #[arg(long, action = ArgAction::SetTrue)]
    pub direct: bool,

    /// With --direct, still walks the whole graph to detect cycles.
    #[arg(long = "scan-cycles", action = ArgAction::SetTrue, requires = "direct")]
    pub scan_cycles: bool,
}

impl PolicyArgs {
    /// Applies the flags on top of the configured policy.
    #[must_use]
    pub fn apply(&self, options: ResolverOptions) -> ResolverOptions {
        ResolverOptions::builder()
            .with_check_for_cycle(options.check_for_cycle() && !self.no_cycle_check)
            .with_resolve_complete_chain(options.resolve_complete_chain() && !self.direct)
            .with_scan_direct_for_cycles(options.scan_direct_for_cycles() || self.scan_cycles)
            .build()
    }
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Prints the chains as JSON.
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Mods to resolve, by 'kind:locator' or by name.
    /// Globs like 'Republic*' are supported. Resolves all mods when empty.
    #[arg(value_name = "MOD")]
    pub mods: Vec<String>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,
}
