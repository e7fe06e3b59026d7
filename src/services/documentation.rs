use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the bracket console facade.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::matches::refresh_matches,
        crate::routes::matches::toggle_match,
        crate::routes::report::report_result,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::matches::MatchView,
            crate::dto::matches::MatchesResponse,
            crate::dto::matches::ToggleResponse,
            crate::dto::report::ReportRequest,
            crate::dto::report::ReportResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "matches", description = "Match queue and in-progress markers"),
        (name = "report", description = "Result reporting"),
    )
)]
pub struct ApiDoc;
