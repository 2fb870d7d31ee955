//! Path management for BudgetIQ
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETIQ_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `budgetiq`
//!    (`$XDG_CONFIG_HOME/budgetiq`, `~/Library/Application Support/budgetiq`,
//!    `%APPDATA%\budgetiq`)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::BudgetError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUDGETIQ_DATA_DIR";

/// Manages all paths used by BudgetIQ
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Create a new BudgetPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BudgetError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BudgetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the registered users file
    pub fn users_file(&self) -> PathBuf {
        self.base_dir.join("users.json")
    }

    /// Get the path to the active session file
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to incomes.json
    pub fn incomes_file(&self) -> PathBuf {
        self.data_dir().join("incomes.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, BudgetError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| BudgetError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("budgetiq"))
}
