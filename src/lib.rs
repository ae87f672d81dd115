//! # scan-bundle
//!
//! Hands scanned identity-document records to a data-collection host
//! application as a flat, string-keyed bundle, and reads them back.
//!
//! Two things vary between host form versions and are always chosen by the
//! caller: the key layout of the primary fields ([`SchemaGeneration`]) and
//! the encoding of the dependent list ([`DependentScheme`]).
pub mod bundle;

// Re-export the main types for convenience
pub use bundle::{
    BundleError,
    Result,
    RecordMarshaller,
    codec::blob::{BlobStore, CacheDirStore},
    command::{send_data, SendDataRequest, ACK_MESSAGE},
    config::BridgeConfig,
    format::dependents::{DependentEncoding, Joined, Positional},
    transport::{Envelope, LaunchGuard, MemoryTransport, ResultCode, Transport},
    types::{
        bundle::{BundleValue, FlatBundle},
        models::{
            DependentRecord,
            DependentScheme,
            DocumentRecord,
            MarshalOptions,
            SchemaGeneration,
        },
    },
};
