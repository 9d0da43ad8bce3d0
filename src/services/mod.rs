/// Loading, projecting and refreshing the question snapshot.
pub mod catalog_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Ranking projections over the score ledger.
pub mod leaderboard_service;
/// Write-behind persistence of team records.
pub mod score_persistence;
/// Storage health polling and reconnection.
pub mod store_monitor;
/// Answer submission pipeline.
pub mod submission_service;
