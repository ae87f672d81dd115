//! Image payload decoding and storage.
//!
//! The scanning UI hands images over as `data:` URLs. Before a record can be
//! marshalled each payload is decoded, written somewhere the host can read,
//! and replaced by a resource reference.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, trace};
use regex::Regex;
use url::Url;

use crate::bundle::types::error::{BundleError, Result};

/// Compiled pattern for `data:[<mime>][;<param>]*,<payload>`.
static DATA_URL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Returns the cached data URL pattern.
fn data_url_regex() -> &'static Regex {
    DATA_URL_PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^data:([^;,]*)((?:;[^;,]*)*),(.*)$").expect("Invalid data URL pattern")
    })
}

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Declared media type, if the URL names one.
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Decodes a base64 `data:` URL.
///
/// A string without the `data:` prefix is accepted when it contains a comma;
/// everything after the first comma is taken as the base64 payload.
///
/// # Errors
/// - [`BundleError::InvalidDataUrl`] if there is no payload separator or the
///   URL is not base64-encoded
/// - [`BundleError::Base64`] if the payload does not decode
pub fn decode_data_url(input: &str) -> Result<DataUrl> {
    let (mime, payload) = match data_url_regex().captures(input) {
        Some(caps) => {
            let params = caps.get(2).map_or("", |m| m.as_str());
            if !params.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
                return Err(BundleError::InvalidDataUrl(
                    "only base64 data URLs are supported".to_string(),
                ));
            }
            let mime = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            (mime, caps.get(3).map_or("", |m| m.as_str()))
        }
        None => {
            let (_, payload) = input.split_once(',').ok_or_else(|| {
                BundleError::InvalidDataUrl("missing payload separator".to_string())
            })?;
            (None, payload)
        }
    };

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    trace!("Decoded data URL payload: {} bytes", bytes.len());
    Ok(DataUrl { mime, bytes })
}

/// Somewhere decoded blobs can be written and referenced from a bundle.
pub trait BlobStore {
    /// Stores `bytes` under `name` and returns a reference the host can open.
    fn store(&self, name: &str, bytes: &[u8]) -> Result<Url>;

    /// Decodes a `data:` URL and stores the payload under `name`.
    fn store_data_url(&self, name: &str, data_url: &str) -> Result<Url> {
        let decoded = decode_data_url(data_url)?;
        self.store(name, &decoded.bytes)
    }
}

/// Writes blobs into a cache directory and references them through a
/// `content://<authority>/<name>` URI.
#[derive(Debug, Clone)]
pub struct CacheDirStore {
    dir: PathBuf,
    authority: String,
}

impl CacheDirStore {
    pub fn new(dir: impl Into<PathBuf>, authority: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            authority: authority.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }
}

impl BlobStore for CacheDirStore {
    fn store(&self, name: &str, bytes: &[u8]) -> Result<Url> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, bytes)?;
        debug!("Stored blob {} ({} bytes)", name, bytes.len());
        Ok(Url::parse(&format!("content://{}/{}", self.authority, name))?)
    }
}
