// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration and game manifest.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. modchain.toml (cwd, optional)
//! 3. --ini files
//! 4. MODCHAIN_* env vars
//! 5. --set overrides
//! ```
//!
//! # Manifest
//!
//! ```toml
//! [game]
//! name = "Empire at War"
//!
//! [resolver]
//! check_for_cycle = true
//!
//! [[mods]]
//! id = "workshop:1129810972"
//! name = "Republic at War"
//! dependencies = ["workshop:1125571106", "virtual:Empire at War"]
//! ```
//!
//! The manifest stands in for mod discovery: it lists identities and declared
//! references, and [`Config::build_game`] registers them.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;

use crate::error::{ConfigError, Result};
use crate::game::Game;
use crate::model::{DependencyReference, Mod, ModIdentity, PathCase, ResolutionHint};
use crate::resolver::ResolverOptions;

use loader::ConfigLoader;
use types::{GameConfig, GlobalConfig, ModEntry, ReferenceEntry, ResolverConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Resolution policy.
    pub resolver: ResolverConfig,
    /// Base game.
    pub game: GameConfig,
    /// Installed mods.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<ModEntry>,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use modchain::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("game.toml")
    ///     .with_env_prefix("MODCHAIN")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Loads configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or the
    /// manifest is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Loads configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or the manifest is invalid.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolution policy for this configuration.
    #[must_use]
    pub fn resolver_options(&self) -> ResolverOptions {
        self.resolver.into()
    }

    /// Checks that every identity in the manifest parses and no mod is listed twice.
    ///
    /// Dangling references are not checked here; they are reported by the resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid entry.
    pub fn validate(&self) -> Result<()> {
        if !self.mods.is_empty() && self.game.name.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "game".to_string(),
                key: "name".to_string(),
            }
            .into());
        }

        let case = self.game.path_case();
        let mut seen = HashSet::new();
        for (index, entry) in self.mods.iter().enumerate() {
            let identity = parse_identity(&entry.id, case, index, "id")?;
            if !seen.insert(identity) {
                return Err(invalid_mod(index, "id", format!("'{}' is listed twice", entry.id)).into());
            }
            for dependency in &entry.dependencies {
                parse_identity(dependency.id(), case, index, "dependencies")?;
            }
        }
        Ok(())
    }

    /// Builds the game and registers every manifest mod in listed order.
    ///
    /// # Errors
    ///
    /// Returns an error if the game name is blank or the manifest is invalid.
    pub fn build_game(&self) -> Result<Game> {
        let mut game = Game::new(self.game.name.clone())
            .with_context(|| format!("invalid game name '{}'", self.game.name))?;
        if self.game.register_base {
            game.register_base()?;
        }

        let case = self.game.path_case();
        for (index, entry) in self.mods.iter().enumerate() {
            let m = build_mod(entry, case, index)?;
            game.register_mod(m)
                .with_context(|| format!("failed to register mod '{}'", entry.id))?;
        }

        tracing::debug!(game = %game.name(), mods = game.registry().len(), "Built game from manifest");
        Ok(game)
    }

    /// Formats the effective options, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "global.log_format",
            format!("{:?}", self.global.log_format).to_lowercase(),
        );
        options.insert(
            "resolver.check_for_cycle",
            self.resolver.check_for_cycle.to_string(),
        );
        options.insert(
            "resolver.resolve_complete_chain",
            self.resolver.resolve_complete_chain.to_string(),
        );
        options.insert(
            "resolver.scan_direct_for_cycles",
            self.resolver.scan_direct_for_cycles.to_string(),
        );
        options.insert("game.name", self.game.name.clone());
        options.insert(
            "game.case_insensitive_paths",
            (self.game.path_case() == PathCase::Insensitive).to_string(),
        );
        options.insert("game.register_base", self.game.register_base.to_string());
        options.insert("mods", self.mods.len().to_string());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn invalid_mod(index: usize, key: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: format!("mods.{index}"),
        key: key.to_string(),
        message,
    }
}

fn parse_identity(text: &str, case: PathCase, index: usize, key: &str) -> Result<ModIdentity> {
    ModIdentity::parse_with_case(text, case)
        .map_err(|e| invalid_mod(index, key, e.to_string()).into())
}

fn build_mod(entry: &ModEntry, case: PathCase, index: usize) -> Result<Mod> {
    let identity = parse_identity(&entry.id, case, index, "id")?;

    let references = entry
        .dependencies
        .iter()
        .map(|dependency| build_reference(dependency, case, index))
        .collect::<Result<Vec<_>>>()?;

    let m = Mod::new(identity, references);
    Ok(match &entry.name {
        Some(name) => m.with_name(name.clone()),
        None => m,
    })
}

fn build_reference(entry: &ReferenceEntry, case: PathCase, index: usize) -> Result<DependencyReference> {
    let identity = parse_identity(entry.id(), case, index, "dependencies")?;

    let hint = match entry {
        ReferenceEntry::Detailed {
            path: Some(path), ..
        } => Some(ResolutionHint::Directory { path: path.clone() }),
        _ => identity
            .workshop_id()
            .map(|id| ResolutionHint::Workshop { id }),
    };

    let reference = DependencyReference::new(identity);
    Ok(match hint {
        Some(hint) => reference.with_hint(hint),
        None => reference,
    })
}
