//! Hand-off to the host application.
//!
//! The bundle travels as the payload of one result message. The message
//! also lists the image references it points at so the host can be granted
//! read access to them.

use log::{info, warn};
use url::Url;

use super::types::bundle::FlatBundle;
use super::types::error::{BundleError, Result};
use super::types::models::DocumentRecord;

/// Intent action the host uses to launch the scanner.
pub const DEFAULT_LAUNCH_ACTION: &str = "io.nawa.kobo.mrz";

/// Outcome reported alongside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Canceled,
}

/// One result message: a bundle plus the resources it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub result_code: ResultCode,
    pub bundle: FlatBundle,
    /// Front, back, then face image, when present.
    pub attachments: Vec<Url>,
    /// Whether the host must be granted read access to the attachments.
    pub grant_read: bool,
}

impl Envelope {
    /// Wraps a successfully encoded bundle for `record`.
    pub fn ok(bundle: FlatBundle, record: &DocumentRecord) -> Self {
        let attachments: Vec<Url> = record.images().into_iter().cloned().collect();
        Self {
            result_code: ResultCode::Ok,
            grant_read: !attachments.is_empty(),
            bundle,
            attachments,
        }
    }

    /// A payload-less cancellation.
    pub fn canceled() -> Self {
        Self {
            result_code: ResultCode::Canceled,
            bundle: FlatBundle::new(),
            attachments: Vec::new(),
            grant_read: false,
        }
    }
}

/// The inter-process messaging primitive. Owned exclusively for one send.
pub trait Transport {
    fn deliver(&mut self, envelope: Envelope) -> Result<()>;
}

/// Keeps delivered envelopes in memory.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    delivered: Vec<Envelope>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> &[Envelope] {
        &self.delivered
    }

    pub fn last(&self) -> Option<&Envelope> {
        self.delivered.last()
    }
}

impl Transport for MemoryTransport {
    fn deliver(&mut self, envelope: Envelope) -> Result<()> {
        info!(
            "Delivering {:?} result: {} keys, {} attachments",
            envelope.result_code,
            envelope.bundle.len(),
            envelope.attachments.len()
        );
        self.delivered.push(envelope);
        Ok(())
    }
}

/// Refuses to run the bridge unless the host launched it.
#[derive(Debug, Clone)]
pub struct LaunchGuard {
    expected_action: String,
}

impl LaunchGuard {
    pub fn new(expected_action: impl Into<String>) -> Self {
        Self {
            expected_action: expected_action.into(),
        }
    }

    /// Returns `true` when the launch action matches the host's.
    pub fn check(&self, action: Option<&str>) -> bool {
        let allowed = action == Some(self.expected_action.as_str());
        if !allowed {
            warn!("Not launched by the host application (action: {:?})", action);
        }
        allowed
    }

    /// Like [`check`](Self::check), as a `Result`.
    ///
    /// # Errors
    /// Returns [`BundleError::UnexpectedLaunch`] for a missing or foreign action.
    pub fn require(&self, action: Option<&str>) -> Result<()> {
        if self.check(action) {
            Ok(())
        } else {
            Err(BundleError::UnexpectedLaunch(action.map(str::to_string)))
        }
    }
}

impl Default for LaunchGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LAUNCH_ACTION)
    }
}
