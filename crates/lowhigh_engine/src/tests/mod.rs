//! Cross-module workflow tests

mod config_files;
