//! Core data structures for the marshalling protocol.
//!
//! This module defines the fundamental types used throughout the library:
//! - The scanned document record and its dependents
//! - Schema generation and dependent encoding selectors
//! - Marshalling options

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{BundleError, Result};
use super::keys;

/// One accompanying person listed on the scanned document.
///
/// Every field defaults to the empty string when the source lacks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DependentRecord {
    pub date_of_birth: String,
    pub sex: String,
    pub document_number: String,
    pub full_name: String,
}

impl DependentRecord {
    /// Field values in wire order (see [`keys::DEPENDENT_FIELDS`]).
    pub fn fields(&self) -> [&str; 4] {
        [
            self.date_of_birth.as_str(),
            self.sex.as_str(),
            self.document_number.as_str(),
            self.full_name.as_str(),
        ]
    }

    /// Builds a dependent from field values in wire order.
    pub fn from_fields([date_of_birth, sex, document_number, full_name]: [String; 4]) -> Self {
        Self {
            date_of_birth,
            sex,
            document_number,
            full_name,
        }
    }
}

/// A scanned identity document, as handed to the host application.
///
/// Built once per scan session and never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentRecord {
    pub date_of_birth: Option<String>,
    #[serde(rename = "CoAAddress")]
    pub coa_address: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
    pub document_number: Option<String>,
    pub full_name: Option<String>,
    pub fathers_name: Option<String>,
    /// Age in completed years. Travels as `-1` on the wire when absent.
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub front_image: Option<Url>,
    pub back_image: Option<Url>,
    pub face_image: Option<Url>,
    /// Raw dependents source, passed through untouched.
    pub dependents_info: Option<String>,
    /// `None` means no dependents contribution at all (absent or malformed source).
    pub dependents: Option<Vec<DependentRecord>>,
    pub date_of_issue: Option<String>,
    pub document_additional_number: Option<String>,
    pub date_of_expiry: Option<String>,
}

impl DocumentRecord {
    /// Names of required fields that are null, in validation order.
    ///
    /// An empty string counts as present.
    pub fn missing_required(&self) -> Vec<&'static str> {
        missing_required([
            self.document_number.is_some(),
            self.full_name.is_some(),
            self.age.is_some(),
            self.gender.is_some(),
            self.date_of_birth.is_some(),
        ])
    }

    /// Checks that the record may be transmitted.
    pub fn validate(&self) -> Result<()> {
        require_present(self.missing_required())
    }

    /// Image references present on the record, front, back, then face.
    pub fn images(&self) -> Vec<&Url> {
        [&self.front_image, &self.back_image, &self.face_image]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Names the required fields whose presence flag is false.
///
/// `present` follows the order of [`keys::REQUIRED_FIELDS`].
pub fn missing_required(present: [bool; 5]) -> Vec<&'static str> {
    keys::REQUIRED_FIELDS
        .into_iter()
        .zip(present)
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect()
}

/// Turns a list of missing field names into a validation result.
pub fn require_present(missing: Vec<&'static str>) -> Result<()> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BundleError::MissingRequiredParameters(missing))
    }
}

/// Key layout generation of the flat bundle.
///
/// - V1: the base field set with `_dep` copies
/// - V2: adds issue/expiry dates, the additional document number and the face image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SchemaGeneration {
    V1,
    #[default]
    V2,
}

impl SchemaGeneration {
    /// The numeric tag of this generation.
    pub fn number(&self) -> u32 {
        match self {
            SchemaGeneration::V1 => 1,
            SchemaGeneration::V2 => 2,
        }
    }
}

impl TryFrom<u32> for SchemaGeneration {
    type Error = BundleError;
    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            _ => Err(BundleError::UnsupportedGeneration(value)),
        }
    }
}

impl fmt::Display for SchemaGeneration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Encoding used for the dependent list. Always chosen by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependentScheme {
    /// `dependentNN_<field>` keys plus `dependentCount`.
    #[default]
    Positional,
    /// `dependent_<field>` keys holding `"; "`-joined values.
    Joined,
}

impl FromStr for DependentScheme {
    type Err = BundleError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positional" => Ok(Self::Positional),
            "joined" => Ok(Self::Joined),
            other => Err(BundleError::UnknownDependentScheme(other.to_string())),
        }
    }
}

impl fmt::Display for DependentScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DependentScheme::Positional => write!(f, "positional"),
            DependentScheme::Joined => write!(f, "joined"),
        }
    }
}

/// Selects the key layout and dependent encoding for one integration target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarshalOptions {
    pub generation: SchemaGeneration,
    pub dependents: DependentScheme,
}

impl MarshalOptions {
    pub fn new(generation: SchemaGeneration, dependents: DependentScheme) -> Self {
        Self {
            generation,
            dependents,
        }
    }
}
