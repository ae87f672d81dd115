//! Codec layer for image payloads.
//!
//! # Submodules
//!
//! - [`blob`][]: `data:` URL decoding and the [`BlobStore`](blob::BlobStore) abstraction

pub mod blob;
