//! Configuration types and loading.
//!
//! - `SteeringConfig`: top-level `steering.toml` with validation
//! - `ProjectPaths`: resolved locations of the config file and steering directory

mod settings;

pub use settings::{
    CONFIG_FILE, ContextConfig, DEFAULT_STEERING_DIR, DirectoryConfig, ProjectPaths,
    SteeringConfig,
};
