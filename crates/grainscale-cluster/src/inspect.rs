//! Cluster inspector — the injected management-plane view.
//!
//! The scaler never talks to the cluster directly; it goes through
//! this trait so tests can substitute a double and the daemon can
//! plug in the gRPC-backed [`ManagementClient`](crate::ManagementClient).

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the management collaborator.
///
/// Both variants are transient from the caller's point of view: the
/// cluster is expected to answer again on a later query.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("management endpoint connection failed: {0}")]
    Connect(#[from] tonic::transport::Error),

    #[error("management query failed: {0}")]
    Query(#[from] tonic::Status),
}

pub type ClusterResult<T> = Result<T, ClusterError>;

/// Liveness status of a silo in the membership table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiloStatus {
    Joining,
    Active,
    ShuttingDown,
    Dead,
    Unknown,
}

/// One live grain activation and the silo hosting it.
#[derive(Debug, Clone)]
pub struct GrainActivation {
    pub grain_type: String,
    pub grain_id: String,
    pub silo_address: String,
}

/// One silo known to the membership table.
#[derive(Debug, Clone)]
pub struct SiloDescriptor {
    pub name: String,
    pub address: String,
    pub status: SiloStatus,
}

/// Read-only view of the cluster's management plane.
///
/// Both listings are point-in-time full scans; implementations must
/// not cache across calls. Failures surface as [`ClusterError`] and
/// are never converted into empty listings.
#[async_trait]
pub trait ClusterInspector: Send + Sync {
    /// Every grain activation currently alive in the cluster.
    async fn list_grain_activations(&self) -> ClusterResult<Vec<GrainActivation>>;

    /// Every silo in the membership table, dead ones included.
    async fn list_silos(&self) -> ClusterResult<Vec<SiloDescriptor>>;
}
