//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Arca API",
        version = "0.1.0",
        description = "Attachment storage service for the finance-office admin portal. Uploads are routed through a configurable fallback chain (GitHub contents API, local filesystem, inline base64); deletions are best-effort and never block record deletion."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::delete::delete_file,
        handlers::public_file::serve_upload,
    ),
    components(
        schemas(
            handlers::upload::UploadResponse,
            handlers::delete::DeleteResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Attachment upload, deletion, and serving")
    )
)]
pub struct ApiDoc;
