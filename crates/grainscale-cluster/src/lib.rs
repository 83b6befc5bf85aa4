//! grainscale-cluster — read-only cluster view for the external scaler.
//!
//! Provides the gRPC client for the cluster's management plane, the
//! `ClusterInspector` trait that abstracts it, and the saturation
//! probe that turns two raw listings into a count snapshot.
//!
//! # Architecture
//!
//! ```text
//! SaturationProbe
//!   ├── snapshot(grain_type_filter, silo_name_filter)
//!   │     ├── ClusterInspector::list_grain_activations()
//!   │     └── ClusterInspector::list_silos()
//!   └── → SaturationSnapshot { grain_count, silo_count }
//!
//! ManagementClient (gRPC)
//!   └── implements ClusterInspector against the management service
//! ```
//!
//! Nothing here mutates cluster state; every snapshot is a fresh
//! full scan of the management plane's current view.

pub mod client;
pub mod inspect;
pub mod probe;

/// Generated protobuf types and gRPC stubs for the management plane.
pub mod proto {
    tonic::include_proto!("grainscale.management");
}

pub use client::ManagementClient;
pub use inspect::{ClusterError, ClusterInspector, ClusterResult, GrainActivation, SiloDescriptor, SiloStatus};
pub use probe::{SaturationProbe, SaturationSnapshot};
