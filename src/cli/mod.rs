// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for modchain using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! modchain [global options] <command>
//! version
//! options
//! inis
//! list [PATTERN]
//! resolve [MODS...] [--no-cycle-check] [--direct [--scan-cycles]] [--json]
//! check [--no-cycle-check] [--direct [--scan-cycles]]
//! ```

pub mod global;
pub mod resolve;


use crate::cli::global::GlobalOptions;
use crate::cli::resolve::{CheckArgs, ListArgs, ResolveArgs};
use clap::{Parser, Subcommand};

/// Mod Dependency Resolution Engine
///
/// Computes the ordered dependency chain of installed game mods.
#[derive(Debug, Parser)]
#[command(
    name = "modchain",
    author,
    version,
    about = "Mod Dependency Resolution Engine",
    long_about = "modchain Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Computes the ordered dependency chain of installed game mods.\n\n\
                  Invoking `modchain check` resolves every mod of the manifest.\n\
                  Do `modchain resolve <mod>...` to print specific chains. See\n\
                  `modchain <command> --help` for more information about a command.",
    after_help = "INI FILES:\n\n\
                  By default, modchain loads `modchain.toml` from the current\n\
                  directory if it exists. Additional INIs can be specified with\n\
                  --ini, those are loaded afterwards and override it. Variables\n\
                  named MODCHAIN_<SECTION>__<KEY> override the INIs, and --set\n\
                  overrides everything. Use --no-default-inis to only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by modchain.
    Inis,

    /// Lists registered mods.
    List(ListArgs),

    /// Resolves mods and prints their dependency chains.
    Resolve(ResolveArgs),

    /// Resolves every mod and reports failures.
    Check(CheckArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
