// modchain: Mod Dependency Resolution Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          list / resolve / check
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, layered, manifest  |
//!              '-------------+-------------'
//!                            v
//!                          game
//!                            |
//!                +-----------+-----------+
//!                v                       v
//!            registry  <-------------  resolver
//!        arena of mods, shared      DFS, cycles, commit
//!                |
//!                v
//!              model   identity, reference, mod, chain
//!
//!   +-----------------------------------------+
//!   |  foundation       error, logging        |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod model;
pub mod registry;
pub mod resolver;
