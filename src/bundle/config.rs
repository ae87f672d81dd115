//! Bridge configuration, read from a JSON file.
//!
//! ```json
//! {
//!   "generation": 2,
//!   "dependents": "joined",
//!   "cacheDir": "/data/cache",
//!   "authority": "io.nawa.kobo.mrz.fileprovider",
//!   "launchAction": "io.nawa.kobo.mrz"
//! }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use super::codec::blob::CacheDirStore;
use super::transport::{LaunchGuard, DEFAULT_LAUNCH_ACTION};
use super::types::error::Result;
use super::types::models::{DependentScheme, MarshalOptions, SchemaGeneration};

pub const DEFAULT_AUTHORITY: &str = "io.nawa.kobo.mrz.fileprovider";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    /// Schema generation tag of the host's form.
    pub generation: u32,
    pub dependents: DependentScheme,
    /// Where decoded images are written. Defaults to the system temp dir.
    pub cache_dir: Option<PathBuf>,
    pub authority: String,
    pub launch_action: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            generation: SchemaGeneration::default().number(),
            dependents: DependentScheme::default(),
            cache_dir: None,
            authority: DEFAULT_AUTHORITY.to_string(),
            launch_action: DEFAULT_LAUNCH_ACTION.to_string(),
        }
    }
}

impl BridgeConfig {
    /// Reads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading bridge configuration: {}", path.display());
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Marshalling options for this target.
    ///
    /// # Errors
    /// Returns [`UnsupportedGeneration`](crate::BundleError::UnsupportedGeneration)
    /// for an unknown generation tag.
    pub fn marshal_options(&self) -> Result<MarshalOptions> {
        Ok(MarshalOptions::new(
            SchemaGeneration::try_from(self.generation)?,
            self.dependents,
        ))
    }

    pub fn blob_store(&self) -> CacheDirStore {
        let dir = self.cache_dir.clone().unwrap_or_else(std::env::temp_dir);
        CacheDirStore::new(dir, self.authority.clone())
    }

    pub fn launch_guard(&self) -> LaunchGuard {
        LaunchGuard::new(self.launch_action.clone())
    }
}
