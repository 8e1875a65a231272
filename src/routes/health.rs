//! Health check endpoint for container orchestration.

/// Health check handler.
///
/// Returns a simple "ok" response to indicate the service is running.
/// This is a liveness probe - it only checks that the process can respond
/// to HTTP; it does not touch the database.
pub async fn health() -> &'static str {
    "ok"
}
