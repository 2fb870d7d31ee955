//! BudgetIQ - Month-scoped personal budget tracker
//!
//! This library provides the core functionality for the BudgetIQ budgeting
//! application: income sources and categorized expenses recorded per
//! calendar month, summaries computed over the selected month, and export of
//! the expense list to a spreadsheet.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (incomes, expenses, months, money)
//! - `storage`: JSON record store with live query subscriptions
//! - `session`: Local account registration and sign-in
//! - `services`: Month selection, aggregation, editing and the dashboard
//! - `export`: XLSX and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetiq::config::{paths::BudgetPaths, settings::Settings};
//! use budgetiq::services::{Dashboard, MonthSelector};
//! use budgetiq::storage::Storage;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let selector = MonthSelector::from_settings(&settings);
//! let dashboard = Dashboard::open(&storage, selector, selector.select("March")?)?;
//! println!("{:?}", dashboard.view().summary);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
