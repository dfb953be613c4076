use utoipa::OpenApi;

/// OpenAPI documentation for the Days v1 API
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::days_api::core::v1::index::handler,
        crate::days_api::core::v1::between::handler::handler,
        crate::days_api::core::v1::weekday::handler::handler,
        crate::days_api::core::v1::history::handler::read_handler,
        crate::days_api::core::v1::history::handler::clear_handler,
        crate::days_api::core::v1::current_age::handler::handler,
    ),
    info(
        title = "Days API",
        version = "1.0.0",
        description = "Calendar arithmetic over naive dates with a rolling history of served requests",
        license(name = "Apache-2.0")
    ),
    tags(
        (name = "days", description = "Date differences, weekdays and ages"),
        (name = "history", description = "Recently served requests")
    )
)]
pub struct DaysV1ApiDoc;

impl DaysV1ApiDoc {
    pub fn openapi() -> utoipa::openapi::OpenApi {
        <DaysV1ApiDoc as utoipa::OpenApi>::openapi()
    }
}
