use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::HealthResponse;
use crate::application::dto::{ErrorResponse, UploadAccepted};

/// OpenAPI specification for the image upload API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Image Intake API",
        version = "1.0.0",
        description = "Validates uploaded images and stores accepted files on local disk"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::upload::upload_handler,
    ),
    components(schemas(UploadAccepted, ErrorResponse, HealthResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "uploads", description = "Image upload")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
