//! Platform layer for medichat: local file persistence, configuration
//! loading, and path resolution.

pub mod config_service;
pub mod file_snapshot_store;
pub mod paths;

pub use config_service::ConfigService;
pub use file_snapshot_store::FileSnapshotStore;
pub use paths::{MedichatPaths, PathError};
