use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::attachment::DEFAULT_ATTACHMENT_NAME;

pub const CONFIG_FILE_NAME: &str = ".flowview.toml";

/// Message shown when a report has nothing to display
pub const DEFAULT_EMPTY_MESSAGE: &str = "No Violations Found";

/// flowview configuration (loaded from .flowview.toml)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowviewConfig {
    #[serde(default)]
    pub attachment: AttachmentConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentConfig {
    /// File name of the report attachment inside a record directory
    #[serde(default = "default_attachment_name")]
    pub name: String,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        AttachmentConfig {
            name: default_attachment_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: default_format(),
            empty_message: default_empty_message(),
        }
    }
}

fn default_attachment_name() -> String {
    DEFAULT_ATTACHMENT_NAME.to_string()
}

fn default_format() -> String {
    "terminal".to_string()
}

fn default_empty_message() -> String {
    DEFAULT_EMPTY_MESSAGE.to_string()
}

impl FlowviewConfig {
    /// Try to load .flowview.toml from the given directory or its parents
    pub fn load(start: &Path) -> Option<Self> {
        let config_path = find_config_file(start)?;
        debug!("Found config: {}", config_path.display());

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str::<FlowviewConfig>(&content) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                    None
                }
            },
            Err(e) => {
                debug!("Could not read {}: {}", config_path.display(), e);
                None
            }
        }
    }
}

/// Walk up from `start` to find .flowview.toml
fn find_config_file(start: &Path) -> Option<std::path::PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let config = current.join(CONFIG_FILE_NAME);
        if config.is_file() {
            return Some(config);
        }
        if !current.pop() {
            return None;
        }
    }
}

const DEFAULT_CONFIG: &str = r#"# flowview configuration

[attachment]
# File name of the flow scanner report attached to a record
name = "output.json"

[output]
# Default output format: "terminal" or "json"
format = "terminal"

# Shown when a report contains no violations
empty_message = "No Violations Found"
"#;

/// Create a default .flowview.toml in `dir`. Returns `false` if one already
/// exists.
pub fn init_config(dir: &Path) -> Result<bool> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(false);
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(true)
}
