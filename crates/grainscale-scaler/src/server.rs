//! External scaler gRPC server.
//!
//! Implements the `ExternalScaler` contract. All four operations
//! validate the scaler metadata before any cluster query; the
//! streaming operation runs one cooperative polling task per open
//! stream and only ever writes `true` items — the consumer reads
//! silence as "still below threshold".

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::{info, warn};

use grainscale_cluster::{ClusterError, SaturationProbe};

use crate::metadata::{MetadataError, ScaleParams};
use crate::proto;
use crate::proto::external_scaler_server::ExternalScaler;
use crate::saturation;

/// Metric name reported to the autoscaler.
pub const METRIC_NAME: &str = "grainThreshold";

/// Target size advertised by `GetMetricSpec`.
const METRIC_TARGET_SIZE: i64 = 10;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// gRPC implementation of the external scaler contract.
pub struct ExternalScalerServer {
    probe: SaturationProbe,
    poll_interval: Duration,
}

impl ExternalScalerServer {
    /// Create a new scaler server over the given probe.
    pub fn new(probe: SaturationProbe) -> Self {
        Self {
            probe,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the StreamIsActive polling interval (default 5s).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Get the tonic service for mounting on a gRPC server.
    pub fn into_service(
        self,
    ) -> proto::external_scaler_server::ExternalScalerServer<Self> {
        proto::external_scaler_server::ExternalScalerServer::new(self)
    }

    /// Snapshot the cluster and decide whether it is over the bound.
    async fn too_many_grains(&self, params: &ScaleParams, upper_bound: u64) -> Result<bool, Status> {
        let snapshot = self
            .probe
            .snapshot(&params.grain_type, &params.silo_name_filter)
            .await
            .map_err(cluster_status)?;

        let too_many = saturation::is_over_threshold(&snapshot, upper_bound);
        info!(
            too_many,
            grain_count = snapshot.grain_count,
            silo_count = snapshot.silo_count,
            upper_bound,
            "evaluated saturation threshold"
        );
        Ok(too_many)
    }
}

fn metadata_status(err: MetadataError) -> Status {
    Status::invalid_argument(err.to_string())
}

fn cluster_status(err: ClusterError) -> Status {
    Status::unavailable(err.to_string())
}

#[tonic::async_trait]
impl ExternalScaler for ExternalScalerServer {
    async fn get_metric_spec(
        &self,
        request: Request<proto::ScaledObjectRef>,
    ) -> Result<Response<proto::GetMetricSpecResponse>, Status> {
        let scaled_object = request.into_inner();
        ScaleParams::from_metadata(&scaled_object.scaler_metadata).map_err(metadata_status)?;

        Ok(Response::new(proto::GetMetricSpecResponse {
            metric_specs: vec![proto::MetricSpec {
                metric_name: METRIC_NAME.to_string(),
                target_size: METRIC_TARGET_SIZE,
            }],
        }))
    }

    async fn get_metrics(
        &self,
        request: Request<proto::GetMetricsRequest>,
    ) -> Result<Response<proto::GetMetricsResponse>, Status> {
        let scaled_object = request
            .into_inner()
            .scaled_object_ref
            .ok_or_else(|| Status::invalid_argument("scaledObjectRef must be set"))?;

        let params =
            ScaleParams::from_metadata(&scaled_object.scaler_metadata).map_err(metadata_status)?;

        let snapshot = self
            .probe
            .snapshot(&params.grain_type, &params.silo_name_filter)
            .await
            .map_err(cluster_status)?;

        Ok(Response::new(proto::GetMetricsResponse {
            metric_values: vec![proto::MetricValue {
                metric_name: METRIC_NAME.to_string(),
                metric_value: saturation::compute_metric(&snapshot) as i64,
            }],
        }))
    }

    async fn is_active(
        &self,
        request: Request<proto::ScaledObjectRef>,
    ) -> Result<Response<proto::IsActiveResponse>, Status> {
        let scaled_object = request.into_inner();
        let params =
            ScaleParams::from_metadata(&scaled_object.scaler_metadata).map_err(metadata_status)?;
        let upper_bound = params.upper_bound().map_err(metadata_status)?;

        let result = self.too_many_grains(&params, upper_bound).await?;
        info!(result, "returning from IsActive");
        Ok(Response::new(proto::IsActiveResponse { result }))
    }

    type StreamIsActiveStream = ReceiverStream<Result<proto::IsActiveResponse, Status>>;

    async fn stream_is_active(
        &self,
        request: Request<proto::ScaledObjectRef>,
    ) -> Result<Response<Self::StreamIsActiveStream>, Status> {
        let scaled_object = request.into_inner();
        // Validation failures fail the call itself — no stream opens.
        let params =
            ScaleParams::from_metadata(&scaled_object.scaler_metadata).map_err(metadata_status)?;
        let upper_bound = params.upper_bound().map_err(metadata_status)?;

        let probe = self.probe.clone();
        let poll_interval = self.poll_interval;
        let (tx, rx) = mpsc::channel(4);

        tokio::spawn(async move {
            loop {
                if tx.is_closed() {
                    break;
                }

                let snapshot = match probe
                    .snapshot(&params.grain_type, &params.silo_name_filter)
                    .await
                {
                    Ok(s) => s,
                    Err(e) => {
                        // No retry policy inside the loop: a failed
                        // query ends the stream with an error.
                        warn!(error = %e, "cluster query failed, closing IsActive stream");
                        let _ = tx.send(Err(cluster_status(e))).await;
                        break;
                    }
                };

                if saturation::is_over_threshold(&snapshot, upper_bound) {
                    info!("writing IsActiveResponse to stream with result = true");
                    if tx
                        .send(Ok(proto::IsActiveResponse { result: true }))
                        .await
                        .is_err()
                    {
                        // Receiver gone — the caller cancelled.
                        break;
                    }
                }
                // A `false` result is never written; silence carries it.

                tokio::select! {
                    _ = tx.closed() => break,
                    _ = tokio::time::sleep(poll_interval) => {}
                }
            }
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}
