//! Configuration module for BudgetIQ
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
