//! Configuration loading and management for the Leave Engine.
//!
//! This module loads leave policies (metadata and vacation-splitting
//! thresholds) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/clt").unwrap();
//! println!("Loaded policy: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PolicyFile, PolicyMetadata, VacationPolicy};
