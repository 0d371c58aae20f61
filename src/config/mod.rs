//! Configuration loading and management for the toll engine.
//!
//! This module loads the fee schedule, grace period, fee cap and holiday
//! list from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use toll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sweden_2013").unwrap();
//! println!("Holidays: {}", config.holidays().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HolidayList, TollSettings};
