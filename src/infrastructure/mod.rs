//! Filesystem and environment lookups.

pub mod paths;

pub use paths::{config_dir, data_dir, default_config_file, expand_tilde, expand_tilde_with};
