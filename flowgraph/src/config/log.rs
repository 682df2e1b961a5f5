use serde::Deserialize;
use serde::Serialize;

const DEFAULT_LOG_DIRECTORY: &str = ".logs";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    // Directory where logs will be stored
    pub directory: Option<String>,
}

impl LoggingConfig {
    pub fn directory(&self) -> &str {
        self.directory.as_deref().unwrap_or(DEFAULT_LOG_DIRECTORY)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: Some(DEFAULT_LOG_DIRECTORY.to_string()),
        }
    }
}
