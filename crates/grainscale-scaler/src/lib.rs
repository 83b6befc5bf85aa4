//! grainscale-scaler — the external scaler protocol adapter.
//!
//! Implements the four-operation external-scaler gRPC contract on top
//! of the cluster saturation probe:
//!
//! ```text
//! ExternalScalerServer (gRPC)
//!   ├── GetMetricSpec() → "grainThreshold", target 10 (static)
//!   ├── GetMetrics()    → grains-per-silo metric value
//!   ├── IsActive()      → upperbound <= grains-per-silo
//!   └── StreamIsActive() → polls every 5s, emits `true` when over
//!                          threshold, silent otherwise
//! ```
//!
//! All four operations validate the scaler metadata (`graintype`,
//! `siloNameFilter`, `upperbound`) before touching the cluster.

pub mod metadata;
pub mod saturation;
pub mod server;

/// Generated protobuf types and gRPC service stubs.
pub mod proto {
    tonic::include_proto!("externalscaler");
}

pub use metadata::{MetadataError, ScaleParams};
pub use server::ExternalScalerServer;
