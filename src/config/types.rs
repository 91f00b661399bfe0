// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, ResolverConfig, GameConfig, [ModEntry]
//! ModEntry:        id = "kind:locator", name?, dependencies
//! ReferenceEntry:  "kind:locator" | { id, path? }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::{LogFormat, LogLevel};
use crate::model::PathCase;
use crate::resolver::ResolverOptions;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Format of the log file.
    pub log_format: LogFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Resolution policy used by the CLI.
///
/// Unlike [`ResolverOptions::default`], this defaults to strict resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub check_for_cycle: bool,
    pub resolve_complete_chain: bool,
    pub scan_direct_for_cycles: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            check_for_cycle: true,
            resolve_complete_chain: true,
            scan_direct_for_cycles: false,
        }
    }
}

impl From<ResolverConfig> for ResolverOptions {
    fn from(config: ResolverConfig) -> Self {
        Self::builder()
            .with_check_for_cycle(config.check_for_cycle)
            .with_resolve_complete_chain(config.resolve_complete_chain)
            .with_scan_direct_for_cycles(config.scan_direct_for_cycles)
            .build()
    }
}

/// The base game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Display name, also the locator of the base game's virtual identity.
    pub name: String,
    /// Case handling of path identities; host file system when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_insensitive_paths: Option<bool>,
    /// Register the base game as a mod that others can depend on.
    pub register_base: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            case_insensitive_paths: None,
            register_base: true,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn path_case(&self) -> PathCase {
        self.case_insensitive_paths
            .map_or_else(PathCase::native, PathCase::from_insensitive)
    }
}

/// A mod of the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModEntry {
    /// Identity in `kind:locator` form.
    pub id: String,
    /// Display name; the locator when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared dependencies in priority order.
    #[serde(default)]
    pub dependencies: Vec<ReferenceEntry>,
}

/// A dependency of a manifest mod.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceEntry {
    /// `"kind:locator"`.
    Short(String),
    /// `{ id = "kind:locator", path = "..." }` with a directory hint.
    Detailed {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },
}

impl ReferenceEntry {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Short(id) | Self::Detailed { id, .. } => id,
        }
    }
}
