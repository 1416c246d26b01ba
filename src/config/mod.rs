//! Configuration loading and management for the contractor billing engine.
//!
//! This module loads the engine settings (workday length, default overtime
//! multiplier, rounding policy and server address) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use contractor_billing::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/billing").unwrap();
//! println!("Workday length: {}h", loader.config().workday_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, RoundingConfig, ServerConfig};
