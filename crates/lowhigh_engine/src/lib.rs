//! # LowHigh Engine
//!
//! Naming, duplication, pairing and grouping engine for LOW/HIGH bake
//! workflows on 3D scene objects.
//!
//! ## Features
//!
//! - **Suffix Naming**: case-insensitive `base_token` normalization
//! - **Duplication**: copies with independent payloads, moved into a single group
//! - **Pair Detection**: LOW/HIGH matching by base name, in stable order
//! - **Bake Groups**: per-pair or shared groups, plus cleanup of empty ones
//! - **Snapshots**: scenes stored as TOML or RON documents
//!
//! ## Quick Start
//!
//! ```rust
//! use lowhigh_engine::prelude::*;
//!
//! let mut scene = Scene::new(World::new());
//! let rock = scene.world.spawn_mesh("Rock");
//! let config = LowHighConfig::default();
//!
//! actions::run(&mut scene, &[rock], &config, Action::CopyTo(Role::Low))?;
//! actions::run(&mut scene, &[rock], &config, Action::AddSuffix(Role::High))?;
//! let report = actions::run(&mut scene, &[], &config, Action::FindPairs)?;
//!
//! assert_eq!(report.count, 1);
//! assert!(scene.groups.contains("Bake_Rock"));
//! # Ok::<(), lowhigh_engine::actions::ActionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

// Core modules
pub mod core;
pub mod config;
pub mod naming;
pub mod scene;
pub mod bake;
pub mod actions;

// Shared utilities
pub mod foundation;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        actions::{self, Action, ActionReport, ActionStatus},
        bake::{BakeGroupOrganizer, EntityDuplicator, Pair, PairMatcher, prune_empty},
        core::config::{Config, GroupNames, LowHighConfig, NamingConfig, Role, TieBreak},
        naming::{NameNormalizer, Suffix},
        scene::{EntityId, EntityKind, EntityStore, GroupRegistry, Scene, SceneSnapshot, World},
    };
}
