//! Scaler metadata validation.
//!
//! Every operation of the contract carries a `scalerMetadata` string
//! map on the `ScaledObjectRef`. Validation is structural: all three
//! keys must be present on every operation, even the ones that do not
//! read them all (GetMetricSpec is static but still validates —
//! autoscaler deployments rely on misconfiguration failing on the
//! first call, not the Nth).

use std::collections::HashMap;

use thiserror::Error;

pub const KEY_GRAIN_TYPE: &str = "graintype";
pub const KEY_SILO_NAME_FILTER: &str = "siloNameFilter";
pub const KEY_UPPER_BOUND: &str = "upperbound";

/// Rejections raised before any cluster query happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("scaler metadata must specify `{0}`")]
    MissingKey(&'static str),

    #[error("scaler metadata `upperbound` must be a non-negative integer, got `{0}`")]
    InvalidUpperBound(String),
}

/// Validated scaler parameters extracted from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleParams {
    /// Substring matched against grain type names.
    pub grain_type: String,
    /// Substring matched against silo names.
    pub silo_name_filter: String,
    /// Raw `upperbound` value; parsed on demand by the IsActive family.
    upper_bound_raw: String,
}

impl ScaleParams {
    /// Validate that all required keys are present and extract them.
    ///
    /// Key order in the map is irrelevant; only presence counts.
    pub fn from_metadata(metadata: &HashMap<String, String>) -> Result<Self, MetadataError> {
        let get = |key: &'static str| {
            metadata
                .get(key)
                .cloned()
                .ok_or(MetadataError::MissingKey(key))
        };

        Ok(Self {
            grain_type: get(KEY_GRAIN_TYPE)?,
            silo_name_filter: get(KEY_SILO_NAME_FILTER)?,
            upper_bound_raw: get(KEY_UPPER_BOUND)?,
        })
    }

    /// Parse the `upperbound` value. A non-numeric value is a caller
    /// error, reported before any cluster query.
    pub fn upper_bound(&self) -> Result<u64, MetadataError> {
        self.upper_bound_raw
            .trim()
            .parse::<u64>()
            .map_err(|_| MetadataError::InvalidUpperBound(self.upper_bound_raw.clone()))
    }
}
