/// Match clock control and the per-tick playtime updater.
pub mod clock_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Roster replacement and lookup.
pub mod roster_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Player playtime tracking operations.
pub mod tracking_service;
