use crate::pb::HealthRes;

/// Simple health service that can be used by both gRPC and REST APIs.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Report that the process is up. The library is built before any server starts, so a
    /// running server always has content loaded.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Catalog is alive".into(),
        }
    }
}
