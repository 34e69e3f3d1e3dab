//! Foundation module - shared utilities
//!
//! Pieces every other module leans on:
//! - Insertion-ordered and handle-keyed collections
//! - Logger setup for the command-line tool and tests

pub mod collections;
pub mod logging;
