//! Configuration file loading for context-discovery
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./discovery.toml` or `./.discovery.toml`
//! 3. Global: `$XDG_CONFIG_HOME/context-discovery/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_OUTPUT_PATH, FileConfig, FileNameMapping, FileOpenApiConfig, FileOutputConfig,
    FileResourceSource, FileTaggedSource, FileTopologyConfig, RESOURCE_PRESETS,
};
pub use loader::ConfigLoader;
