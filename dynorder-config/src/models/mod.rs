pub mod sources;

use std::path::PathBuf;

/// Where a loaded configuration came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
