//! Management-plane gRPC client.
//!
//! Connects to the cluster's management service and adapts its wire
//! types into the [`ClusterInspector`] record types. One client is
//! built at startup and shared; tonic channels multiplex requests,
//! so per-call clones are cheap.

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::inspect::{
    ClusterInspector, ClusterResult, GrainActivation, SiloDescriptor, SiloStatus,
};
use crate::proto;
use crate::proto::management_service_client::ManagementServiceClient;

/// gRPC-backed implementation of [`ClusterInspector`].
#[derive(Debug, Clone)]
pub struct ManagementClient {
    client: ManagementServiceClient<Channel>,
}

impl ManagementClient {
    /// Connect to the management service at `endpoint`
    /// (e.g. `http://127.0.0.1:4040`).
    pub async fn connect(endpoint: String) -> ClusterResult<Self> {
        let channel = Endpoint::from_shared(endpoint)?.connect().await?;
        Ok(Self {
            client: ManagementServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl ClusterInspector for ManagementClient {
    async fn list_grain_activations(&self) -> ClusterResult<Vec<GrainActivation>> {
        let mut client = self.client.clone();
        let response = client
            .list_grain_activations(proto::ListGrainActivationsRequest {})
            .await?;

        let activations: Vec<GrainActivation> = response
            .into_inner()
            .activations
            .into_iter()
            .map(|a| GrainActivation {
                grain_type: a.grain_type,
                grain_id: a.grain_id,
                silo_address: a.silo_address,
            })
            .collect();

        debug!(count = activations.len(), "listed grain activations");
        Ok(activations)
    }

    async fn list_silos(&self) -> ClusterResult<Vec<SiloDescriptor>> {
        let mut client = self.client.clone();
        let response = client.list_silos(proto::ListSilosRequest {}).await?;

        let silos: Vec<SiloDescriptor> = response
            .into_inner()
            .silos
            .into_iter()
            .map(|s| SiloDescriptor {
                status: match s.status() {
                    proto::SiloStatus::Joining => SiloStatus::Joining,
                    proto::SiloStatus::Active => SiloStatus::Active,
                    proto::SiloStatus::ShuttingDown => SiloStatus::ShuttingDown,
                    proto::SiloStatus::Dead => SiloStatus::Dead,
                    proto::SiloStatus::Unknown => SiloStatus::Unknown,
                },
                name: s.name,
                address: s.address,
            })
            .collect();

        debug!(count = silos.len(), "listed silos");
        Ok(silos)
    }
}
