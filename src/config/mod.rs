//! Configuration module for gtest-grader
//!
//! This module handles:
//! - Run configuration (gtest-grader.toml / .gtest-graderrc.json)
//! - User-level defaults (~/.config/gtest-grader/config.toml)
//! - Score file and message artifact locations

mod grader_config;

pub use grader_config::{
    load_config,
    load_config_file,
    user_config_path,
    GraderConfig,
    MessageConfig,
    StoreConfig,
    CONFIG_FILE,
    JSON_CONFIG_FILE,
};
