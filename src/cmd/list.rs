// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for modchain.

use crate::cli::resolve::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::model::Mod;

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be turned into a game or the
/// pattern is not a valid glob.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let game = config.build_game()?;
    let registry = game.registry();

    let mods: Vec<&Mod> = match &args.pattern {
        Some(pattern) => registry.find_by_name(pattern).inspect_err(|e| {
            eprintln!("Failed to match mod pattern: {e}");
        })?,
        None => registry.all().iter().collect(),
    };

    let lines = format_mod_list(&mods);
    if lines.is_empty() {
        println!("No mods found");
    } else {
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}

/// One `name  identity` line per mod, names padded to a common width.
#[must_use]
pub fn format_mod_list(mods: &[&Mod]) -> Vec<String> {
    let width = mods.iter().map(|m| m.name().len()).max().unwrap_or(0);
    mods.iter()
        .map(|m| format!("{:<width$}  {}", m.name(), m.identity()))
        .collect()
}
