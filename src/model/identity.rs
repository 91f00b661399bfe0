// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod identities.
//!
//! ```text
//! kind       locator (display)         key (comparison)
//! path       C:/Games/EaW/Mods/RaW     c:/games/eaw/mods/raw   (insensitive)
//! workshop   1129810972                1129810972
//! virtual    Republic at War Bundle    Republic at War Bundle
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdentityError;

/// Discriminator of a [`ModIdentity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModKind {
    /// Mod installed in a directory.
    Path,
    /// Mod identified by its Steam Workshop id.
    Workshop,
    /// Synthetic mod composed of other mods.
    Virtual,
}

impl ModKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Workshop => "workshop",
            Self::Virtual => "virtual",
        }
    }
}

impl fmt::Display for ModKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModKind {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "workshop" | "steam" => Ok(Self::Workshop),
            "virtual" => Ok(Self::Virtual),
            _ => Err(IdentityError::UnknownKind(s.to_string())),
        }
    }
}

/// Case handling for path-based locators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCase {
    Sensitive,
    Insensitive,
}

impl PathCase {
    /// Case handling of the host file system.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(any(windows, target_os = "macos")) {
            Self::Insensitive
        } else {
            Self::Sensitive
        }
    }

    #[must_use]
    pub const fn from_insensitive(insensitive: bool) -> Self {
        if insensitive {
            Self::Insensitive
        } else {
            Self::Sensitive
        }
    }
}

impl Default for PathCase {
    fn default() -> Self {
        Self::native()
    }
}

/// Identity of a mod within one game.
///
/// Equality, hashing and ordering only consider the kind and the comparison
/// key, so two path identities that differ in case are equal when they were
/// built with [`PathCase::Insensitive`].
#[derive(Debug, Clone)]
pub struct ModIdentity {
    kind: ModKind,
    locator: Box<str>,
    key: Box<str>,
}

impl ModIdentity {
    /// Creates a path-based identity from an absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::RelativePath`] if the path is not absolute.
    pub fn path(path: impl AsRef<Path>, case: PathCase) -> Result<Self, IdentityError> {
        let raw = path.as_ref().to_string_lossy();
        let locator = normalize_path(&raw)?;
        let key = match case {
            PathCase::Sensitive => locator.clone(),
            PathCase::Insensitive => locator.to_lowercase(),
        };
        Ok(Self {
            kind: ModKind::Path,
            locator: locator.into_boxed_str(),
            key: key.into_boxed_str(),
        })
    }

    /// Creates a workshop identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidWorkshopId`] for id `0`.
    pub fn workshop(id: u64) -> Result<Self, IdentityError> {
        if id == 0 {
            return Err(IdentityError::InvalidWorkshopId(id.to_string()));
        }
        let locator: Box<str> = id.to_string().into_boxed_str();
        Ok(Self {
            kind: ModKind::Workshop,
            key: locator.clone(),
            locator,
        })
    }

    /// Parses a workshop id from text.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidWorkshopId`] if the text is not a positive integer.
    pub fn parse_workshop(id: &str) -> Result<Self, IdentityError> {
        let trimmed = id.trim();
        let value = trimmed
            .parse::<u64>()
            .map_err(|_| IdentityError::InvalidWorkshopId(trimmed.to_string()))?;
        Self::workshop(value)
    }

    /// Creates a virtual identity with a synthetic name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptyName`] if the name is blank.
    pub fn virtual_mod(name: impl Into<String>) -> Result<Self, IdentityError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IdentityError::EmptyName);
        }
        let locator: Box<str> = name.into_boxed_str();
        Ok(Self {
            kind: ModKind::Virtual,
            key: locator.clone(),
            locator,
        })
    }

    /// Creates an identity of the given kind from its locator.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] if the locator is invalid for the kind.
    pub fn new(kind: ModKind, locator: &str, case: PathCase) -> Result<Self, IdentityError> {
        match kind {
            ModKind::Path => Self::path(locator, case),
            ModKind::Workshop => Self::parse_workshop(locator),
            ModKind::Virtual => Self::virtual_mod(locator),
        }
    }

    /// Parses the `kind:locator` text form.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Malformed`] if there is no `:` separator, or
    /// the error of [`ModIdentity::new`].
    pub fn parse_with_case(text: &str, case: PathCase) -> Result<Self, IdentityError> {
        let (kind, locator) = text
            .split_once(':')
            .ok_or_else(|| IdentityError::Malformed(text.to_string()))?;
        Self::new(kind.trim().parse()?, locator.trim(), case)
    }

    #[must_use]
    pub const fn kind(&self) -> ModKind {
        self.kind
    }

    /// Display form of the locator (normalized path, id, or name).
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Returns the workshop id for workshop identities.
    #[must_use]
    pub fn workshop_id(&self) -> Option<u64> {
        match self.kind {
            ModKind::Workshop => self.locator.parse().ok(),
            ModKind::Path | ModKind::Virtual => None,
        }
    }
}

impl PartialEq for ModIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.key == other.key
    }
}

impl Eq for ModIdentity {}

impl Hash for ModIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.key.hash(state);
    }
}

impl PartialOrd for ModIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModIdentity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.kind, &self.key).cmp(&(other.kind, &other.key))
    }
}

impl fmt::Display for ModIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.locator)
    }
}

impl FromStr for ModIdentity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_case(s, PathCase::native())
    }
}

impl Serialize for ModIdentity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ModIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Lexically normalizes an absolute path.
///
/// Separators become `/`, `.` is dropped, `..` pops one component, and
/// repeated or trailing separators collapse.
fn normalize_path(raw: &str) -> Result<String, IdentityError> {
    let unified = raw.trim().replace('\\', "/");
    let (root, rest) =
        split_root(&unified).ok_or_else(|| IdentityError::RelativePath(raw.to_string()))?;

    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    Ok(format!("{root}{}", parts.join("/")))
}

/// Splits the root (`/`, `//` for UNC shares, or `X:/`) from an absolute path.
fn split_root(path: &str) -> Option<(&str, &str)> {
    let bytes = path.as_bytes();
    if let Some(rest) = path.strip_prefix("//") {
        Some(("//", rest))
    } else if let Some(rest) = path.strip_prefix('/') {
        Some(("/", rest))
    } else if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && bytes[2] == b'/'
    {
        Some(path.split_at(3))
    } else {
        None
    }
}
