//! Saturation probe — point-in-time cluster counts.
//!
//! Turns the two raw management listings into a
//! [`SaturationSnapshot`]: how many activations of a grain type are
//! alive, and how many active silos match a name filter. The snapshot
//! is what the scaler's metric formula consumes.

use std::sync::Arc;

use tracing::info;

use crate::inspect::{ClusterInspector, ClusterResult, SiloStatus};

/// Counts of matching grains and silos at one instant.
///
/// All-or-nothing: a snapshot only exists if both listings succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaturationSnapshot {
    pub grain_count: u64,
    pub silo_count: u64,
}

/// Queries the management plane and counts matches.
///
/// Stateless apart from the shared inspector handle; every call is a
/// fresh full scan.
#[derive(Clone)]
pub struct SaturationProbe {
    inspector: Arc<dyn ClusterInspector>,
}

impl SaturationProbe {
    /// Create a probe over the given management-plane view.
    pub fn new(inspector: Arc<dyn ClusterInspector>) -> Self {
        Self { inspector }
    }

    /// Count grain activations whose type contains `grain_type_filter`
    /// and active silos whose name contains `silo_name_filter`, both
    /// case-insensitively.
    ///
    /// The two listings run concurrently; either failure fails the
    /// whole snapshot.
    pub async fn snapshot(
        &self,
        grain_type_filter: &str,
        silo_name_filter: &str,
    ) -> ClusterResult<SaturationSnapshot> {
        let (activations, silos) = tokio::join!(
            self.inspector.list_grain_activations(),
            self.inspector.list_silos(),
        );
        let (activations, silos) = (activations?, silos?);

        let grain_filter = grain_type_filter.to_lowercase();
        let silo_filter = silo_name_filter.to_lowercase();

        let grain_count = activations
            .iter()
            .filter(|a| a.grain_type.to_lowercase().contains(&grain_filter))
            .count() as u64;

        let silo_count = silos
            .iter()
            .filter(|s| s.status == SiloStatus::Active)
            .filter(|s| s.name.to_lowercase().contains(&silo_filter))
            .count() as u64;

        info!(
            grain_count,
            silo_count,
            grain_type = %grain_type_filter,
            silo_name_filter = %silo_name_filter,
            "cluster saturation snapshot"
        );

        Ok(SaturationSnapshot {
            grain_count,
            silo_count,
        })
    }
}
