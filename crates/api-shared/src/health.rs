use crate::wire::HealthRes;

/// Simple health service for the Patientor APIs.
///
/// Provides a standardised way to check the health status of the service.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Patientor is alive".into(),
        }
    }
}
