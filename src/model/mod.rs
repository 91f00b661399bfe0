// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Identity and reference model.
//!
//! ```text
//! Mod
//!  |-- ModIdentity        kind + locator
//!  |-- [DependencyReference]
//!  |       |-- ModIdentity
//!  |       '-- ResolutionHint?   (discovery only)
//!  '-- ChainState
//!          Unresolved | Resolved(DependencyChain)
//! ```

mod chain;
mod game_mod;
mod identity;
mod reference;

pub(crate) use chain::ChainState;
pub use chain::{ChainDepth, DependencyChain, ModState};
pub use game_mod::Mod;
pub use identity::{ModIdentity, ModKind, PathCase};
pub use reference::{DependencyReference, ResolutionHint};
