//! Operations behind the HTTP facade, plus the report rules shared with the console.

/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Queue refresh, marker toggling and result reporting for the HTTP facade.
pub mod queue_service;
/// Score parsing and winner determination.
pub mod report_service;
