// configuration module public api

pub mod loading;
pub mod types;

pub use loading::{load_policy_config, ConfigError};
pub use types::*;
