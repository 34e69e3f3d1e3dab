//! User-triggered actions
//!
//! Each action maps to one engine operation and returns a report with a
//! count and a human-readable message. Actions that need a selection are
//! cancelled, without touching the scene, when the selection is empty.

mod rename;

pub use rename::{rename_to_base, rename_with_suffix};

use crate::bake::{prune_empty, BakeGroupOrganizer, EntityDuplicator, PairMatcher};
use crate::core::config::{LowHighConfig, Role};
use crate::naming::{NameNormalizer, NamingError, Suffix};
use crate::scene::{EntityId, EntityStore, Scene};

/// The actions a user can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Add the role's suffix to every selected entity
    AddSuffix(Role),
    /// Strip any recognized suffix from every selected entity
    RemoveSuffix,
    /// Duplicate the selection into the role's group
    CopyTo(Role),
    /// Detect pairs, then organize them if configured
    FindPairs,
    /// Remove empty bake groups
    CleanBakeGroups,
}

impl Action {
    /// Whether the action operates on a selection
    pub fn needs_selection(self) -> bool {
        matches!(self, Action::AddSuffix(_) | Action::RemoveSuffix | Action::CopyTo(_))
    }
}

/// How an action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// The action ran
    Finished,
    /// Nothing to do; the scene was not touched
    Cancelled,
}

/// Outcome of an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    /// Action that ran
    pub action: Action,
    /// Finished or cancelled
    pub status: ActionStatus,
    /// Entities renamed, entities copied, pairs found or groups removed
    pub count: usize,
    /// Selected entities that could not be processed
    pub skipped: usize,
    /// Human-readable summary
    pub message: String,
}

impl ActionReport {
    fn finished(action: Action, count: usize, skipped: usize, message: String) -> Self {
        Self { action, status: ActionStatus::Finished, count, skipped, message }
    }

    fn cancelled(action: Action, message: &str) -> Self {
        Self {
            action,
            status: ActionStatus::Cancelled,
            count: 0,
            skipped: 0,
            message: message.to_string(),
        }
    }
}

/// Action errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The configured suffix is unusable
    #[error("Invalid suffix: {0}")]
    Naming(#[from] NamingError),
}

/// Run one action against a scene
///
/// Per-entity failures are logged and counted in [`ActionReport::skipped`];
/// they never abort the rest of the selection.
pub fn run<S: EntityStore>(
    scene: &mut Scene<S>,
    selection: &[EntityId],
    config: &LowHighConfig,
    action: Action,
) -> Result<ActionReport, ActionError> {
    if action.needs_selection() && selection.is_empty() {
        log::warn!("No selection");
        return Ok(ActionReport::cancelled(action, "No selection"));
    }

    let naming = &config.naming;
    let report = match action {
        Action::AddSuffix(role) => {
            let suffix = Suffix::new(naming.suffix_for(role))?;
            let normalizer = NameNormalizer::from_config(naming);
            let (renamed, skipped) = for_each_selected(selection, |id| {
                rename_with_suffix(&mut scene.world, id, &normalizer, &suffix).map(|_| ())
            });
            ActionReport::finished(action, renamed, skipped, format!("Renamed {renamed} objects"))
        }
        Action::RemoveSuffix => {
            let normalizer = NameNormalizer::from_config(naming);
            let (renamed, skipped) = for_each_selected(selection, |id| {
                rename_to_base(&mut scene.world, id, &normalizer).map(|_| ())
            });
            ActionReport::finished(action, renamed, skipped, format!("Renamed {renamed} objects"))
        }
        Action::CopyTo(role) => {
            let suffix = Suffix::new(naming.suffix_for(role))?;
            let target = config.groups.group_for(role);
            let batch = EntityDuplicator::from_config(naming).duplicate_all(scene, selection, &suffix, target);
            let copied = batch.created.len();
            ActionReport::finished(
                action,
                copied,
                batch.failed.len(),
                format!("Copied {copied} objects to {target} collection"),
            )
        }
        Action::FindPairs => {
            let pairs = PairMatcher::from_config(naming).find_pairs_in(&scene.world);
            if naming.create_groups {
                BakeGroupOrganizer::from_names(&config.groups).organize(
                    &mut scene.groups,
                    &pairs,
                    naming.use_common_group,
                );
            }
            ActionReport::finished(action, pairs.len(), 0, format!("Found {} pairs", pairs.len()))
        }
        Action::CleanBakeGroups => {
            let removed = prune_empty(&mut scene.groups, &config.groups.bake_prefix);
            ActionReport::finished(action, removed, 0, format!("Removed {removed} collections"))
        }
    };

    log::info!("{}", report.message);
    Ok(report)
}

fn for_each_selected<E: std::fmt::Display>(
    selection: &[EntityId],
    mut step: impl FnMut(EntityId) -> Result<(), E>,
) -> (usize, usize) {
    let mut done = 0;
    let mut skipped = 0;
    for &id in selection {
        match step(id) {
            Ok(()) => done += 1,
            Err(err) => {
                log::warn!("Skipping {:?}: {}", id, err);
                skipped += 1;
            }
        }
    }
    (done, skipped)
}
