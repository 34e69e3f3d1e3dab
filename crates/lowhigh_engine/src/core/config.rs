//! # Engine Configuration
//!
//! Immutable configuration passed into each operation. Nothing here is read
//! from ambient state: callers build a [`NamingConfig`] (or load a
//! [`LowHighConfig`] from disk) and hand it to the operation they run.
//!
//! ## Configuration Categories
//!
//! - **Naming**: LOW/HIGH suffix tokens, grouping policy, tie-break rule
//! - **Group names**: reserved names of the groups the engine manages

use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::naming::{tokens_equal, trim_underscores};

// Re-export the file-format layer for convenience
pub use crate::config::{Config, ConfigError, read_document};

/// Which side of a bake pair a name or group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Low-poly target of a bake
    Low,
    /// High-poly source of a bake
    High,
}

/// Rule applied when several entities of one base name match the same role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the first candidate in store order
    #[default]
    FirstMatch,
    /// Keep the last candidate in store order
    LastMatch,
}

/// # Naming Configuration
///
/// Suffix tokens are compared case-insensitively and kept with surrounding
/// underscores trimmed; the accessors always return the trimmed token even
/// when the struct was deserialized from untrimmed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Suffix token marking low-poly entities
    pub suffix_low: String,
    /// Suffix token marking high-poly entities
    pub suffix_high: String,
    /// Whether pair detection also moves pairs into bake groups
    pub create_groups: bool,
    /// Put every pair into one shared group instead of one group per pair
    pub use_common_group: bool,
    /// Candidate selection rule for ambiguous base names
    pub tie_break: TieBreak,
}

impl NamingConfig {
    /// Create a naming configuration with the given suffixes and default policy
    pub fn new(suffix_low: impl Into<String>, suffix_high: impl Into<String>) -> Self {
        Self {
            suffix_low: suffix_low.into(),
            suffix_high: suffix_high.into(),
            ..Self::default()
        }
        .normalized()
    }

    /// Enable or disable bake-group creation after pair detection
    pub fn with_create_groups(mut self, create_groups: bool) -> Self {
        self.create_groups = create_groups;
        self
    }

    /// Choose between one shared bake group and one group per pair
    pub fn with_common_group(mut self, use_common_group: bool) -> Self {
        self.use_common_group = use_common_group;
        self
    }

    /// Set the tie-break rule for ambiguous candidates
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Trimmed low suffix token
    pub fn suffix_low(&self) -> &str {
        trim_underscores(&self.suffix_low)
    }

    /// Trimmed high suffix token
    pub fn suffix_high(&self) -> &str {
        trim_underscores(&self.suffix_high)
    }

    /// Trimmed suffix token for a role
    pub fn suffix_for(&self, role: Role) -> &str {
        match role {
            Role::Low => self.suffix_low(),
            Role::High => self.suffix_high(),
        }
    }

    /// Return a copy with both suffixes stored in trimmed form
    pub fn normalized(mut self) -> Self {
        self.suffix_low = self.suffix_low().to_string();
        self.suffix_high = self.suffix_high().to_string();
        self
    }

    /// Check that both suffixes are usable tokens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suffix_low().is_empty() {
            return Err(ConfigError::Invalid("suffix_low is empty".to_string()));
        }
        if self.suffix_high().is_empty() {
            return Err(ConfigError::Invalid("suffix_high is empty".to_string()));
        }
        if self.has_equal_suffixes() {
            log::warn!(
                "LOW and HIGH suffixes are both '{}'; pair detection will find nothing",
                self.suffix_low()
            );
        }
        Ok(())
    }

    /// Whether both roles use the same token, compared the way names are matched
    pub fn has_equal_suffixes(&self) -> bool {
        tokens_equal(self.suffix_low(), self.suffix_high())
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            suffix_low: "low".to_string(),
            suffix_high: "high".to_string(),
            create_groups: true,
            use_common_group: false,
            tie_break: TieBreak::FirstMatch,
        }
    }
}

/// Reserved names of the groups the engine creates and prunes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupNames {
    /// Target group of "copy to LOW"
    pub low: String,
    /// Target group of "copy to HIGH"
    pub high: String,
    /// Shared group used when all pairs go into one group
    pub common_bake: String,
    /// Prefix of per-pair bake groups, also the pruning prefix
    pub bake_prefix: String,
}

impl GroupNames {
    /// Copy target group for a role
    pub fn group_for(&self, role: Role) -> &str {
        match role {
            Role::Low => &self.low,
            Role::High => &self.high,
        }
    }

    /// Per-pair bake group name for a base name
    pub fn bake_group_for(&self, base_name: &str) -> String {
        format!("{}{}", self.bake_prefix, base_name)
    }
}

impl Default for GroupNames {
    fn default() -> Self {
        Self {
            low: "LOW".to_string(),
            high: "HIGH".to_string(),
            common_bake: "Bake_Pairs".to_string(),
            bake_prefix: "Bake_".to_string(),
        }
    }
}

/// # LowHigh Configuration
///
/// File-backed bundle of everything an action needs. Loading trims suffixes
/// and validates them.
///
/// ```toml
/// [naming]
/// suffix_low = "_lp"
/// suffix_high = "_hp"
/// use_common_group = true
///
/// [groups]
/// common_bake = "Bake_All"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowHighConfig {
    /// Naming conventions and grouping policy
    pub naming: NamingConfig,
    /// Reserved group names
    pub groups: GroupNames,
}

impl LowHighConfig {
    /// Create a configuration around a naming policy with default group names
    pub fn new(naming: NamingConfig) -> Self {
        Self {
            naming: naming.normalized(),
            groups: GroupNames::default(),
        }
    }

    /// Replace the reserved group names
    pub fn with_groups(mut self, groups: GroupNames) -> Self {
        self.groups = groups;
        self
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.naming.validate()?;
        if self.groups.bake_prefix.is_empty() {
            return Err(ConfigError::Invalid("groups.bake_prefix is empty".to_string()));
        }
        Ok(())
    }
}

impl Config for LowHighConfig {
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let loaded: Self = read_document(path)?;
        let config = Self {
            naming: loaded.naming.normalized(),
            groups: loaded.groups,
        };
        config.validate()?;
        Ok(config)
    }
}
