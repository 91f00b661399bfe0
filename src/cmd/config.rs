// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `options` and `inis` commands.
//!
//! ```text
//! options   effective settings, then the resolver policy they select
//! inis      config layers in load order, lowest precedence first
//! ```

use crate::config::Config;
use crate::resolver::ResolverOptions;

pub fn run_options_command(config: &Config) {
    for line in format_options_report(config) {
        println!("{line}");
    }
}

pub fn run_inis_command(layers: &[String]) {
    for line in format_inis_report(layers) {
        println!("{line}");
    }
}

/// Effective settings followed by a one-line summary of the resolver policy.
#[must_use]
pub fn format_options_report(config: &Config) -> Vec<String> {
    let mut lines = config.format_options();
    lines.push(String::new());
    lines.push(format!(
        "resolver policy: {}",
        describe_policy(config.resolver_options())
    ));
    lines
}

#[must_use]
pub fn format_inis_report(layers: &[String]) -> Vec<String> {
    if layers.is_empty() {
        return vec!["No config files loaded, using defaults and environment".to_string()];
    }
    let mut lines = vec!["Config layers, lowest precedence first:".to_string()];
    lines.extend(layers.iter().map(|layer| format!("  {layer}")));
    lines
}

fn describe_policy(options: ResolverOptions) -> String {
    let depth = if options.resolve_complete_chain() {
        "complete chains"
    } else {
        "direct dependencies"
    };
    let cycles = if !options.check_for_cycle() {
        "cycles skipped"
    } else if options.resolve_complete_chain() || options.scans_for_cycles() {
        "cycles rejected"
    } else {
        "self-references rejected"
    };
    format!("{depth}, {cycles}")
}
