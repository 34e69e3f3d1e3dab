//! # Core Module
//!
//! Shared configuration types used by every engine operation.
//!
//! ## Organization
//!
//! - **Config**: naming conventions, reserved group names and the file-backed
//!   [`LowHighConfig`] bundle

pub mod config;

pub use config::{
    GroupNames,
    LowHighConfig,
    NamingConfig,
    Role,
    TieBreak,
    Config,
    ConfigError,
};
