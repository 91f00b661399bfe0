// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Options shared by every modchain command.
//!
//! They only feed the config layers; the game manifest and resolver policy
//! come from the merged configuration.
//!
//! ```text
//! modchain.toml  (cwd, unless --no-default-inis)
//!   <- --ini FILE ...           extra manifests, later files win
//!   <- MODCHAIN_* environment   e.g. MODCHAIN_RESOLVER__CHECK_FOR_CYCLE=false
//!   <- -s section/key=value     e.g. -s resolver/resolve_complete_chain=false
//!   <- -l / --file-log-level / --log-file
//! ```

use clap::Args;
use std::path::PathBuf;

/// Flags accepted before any subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Extra TOML manifest layered over modchain.toml. Repeatable.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Verbosity on stderr, 0 (off) to 6 (everything). Resolver cycle
    /// warnings appear from 2, per-reference traces from 5.
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Verbosity of the log file. Defaults to --log-level.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Write a log file in addition to stderr.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Overrides one config key as `section/key=value`, for example
    /// `resolver/check_for_cycle=false`. Repeatable.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Skip modchain.toml in the working directory.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// `section/key=value` overrides in application order: `--set` values
    /// first, then the logging flags.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global/output_log_level={level}"));
        }

        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global/file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global/log_file={}", path.display()));
        }

        overrides
    }
}
