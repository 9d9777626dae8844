//! Output configuration from TOML (`[output]` section)

use discovery_domain::OutputFormat;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_PATH: &str = "src-gen/context-map.cml";

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Destination of the generated CML file
    pub path: String,
    /// Summary format printed after the run
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            format: None,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_deserialize() {
        let toml_str = r#"
[output]
format = "json"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.path, DEFAULT_OUTPUT_PATH);
    }
}
