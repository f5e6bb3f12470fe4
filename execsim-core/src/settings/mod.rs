//! Execution settings and the registry that owns them

pub mod registry;
pub mod types;

pub use registry::{SettingsError, SettingsRegistry};
pub use types::{ExecutionMode, Leverage, MinMax, Settings};
