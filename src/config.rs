// src/config.rs
use std::path::PathBuf;

pub const DEFAULT_TABLE: &str = "finAssets";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_SOURCE_DIR: &str = "./statements";
pub const DEFAULT_LEDGER_DIR: &str = "./ledger";

/// Ledger connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub table: String,
    pub region: String,
    pub profile: Option<String>,
    /// Directory for the local JSON-lines ledger.
    pub ledger_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            region: DEFAULT_REGION.to_string(),
            profile: None,
            ledger_dir: PathBuf::from(DEFAULT_LEDGER_DIR),
        }
    }
}

/// Everything one import run needs, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub source_dir: PathBuf,
    /// Owner to write under; looked up from the ledger when `None`.
    pub owner: Option<String>,
    pub store: StoreConfig,
    pub dry_run: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            owner: None,
            store: StoreConfig::default(),
            dry_run: false,
        }
    }
}
