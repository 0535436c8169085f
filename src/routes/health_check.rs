/// Liveness probe. Always answers `200 OK` with a fixed plain-text body.
#[tracing::instrument(name = "Sending health check result")]
pub async fn health_check() -> &'static str {
    "I'm ok"
}
