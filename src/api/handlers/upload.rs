use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::Json,
};
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::application::dto::{ErrorResponse, IncomingFile, UploadAccepted};
use crate::application::use_cases::UploadImageUseCase;

/// POST /upload
/// Upload a single image as multipart/form-data
///
/// The first file part is streamed straight to storage. The rest of the body
/// is then read only to find out whether a second file part follows.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body(
        content_type = "multipart/form-data",
        description = "Exactly one file part (PNG, JPEG, GIF or SVG, 2 KiB to 10 MiB)"
    ),
    responses(
        (status = 201, description = "Image stored", body = UploadAccepted),
        (status = 400, description = "Upload rejected", body = ErrorResponse),
        (status = 413, description = "Request body too large"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_handler(
    State(use_case): State<Arc<UploadImageUseCase>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadAccepted>), ApiError> {
    let mut staged = None;
    let mut files_seen = 0;

    match multipart {
        Ok(mut multipart) => loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    if let Some(staged) = staged.take() {
                        use_case.abandon(staged).await;
                    }
                    return Err(e.into());
                }
            };

            // Plain form fields are skipped
            if field.file_name().is_none() {
                continue;
            }

            files_seen += 1;
            if staged.is_some() {
                break;
            }
            staged = Some(use_case.stage(streaming_file(field)).await?);
        },
        // Not a multipart body, so no file is attached
        Err(rejection) => debug!("Upload without multipart body: {}", rejection),
    }

    let accepted = use_case.finish(staged, files_seen).await?;

    Ok((StatusCode::CREATED, Json(accepted)))
}

/// Expose a file part as an async reader without buffering it
fn streaming_file(field: Field<'_>) -> IncomingFile<'_> {
    let declared_type = field.content_type().map(str::to_string);
    let original_name = field.file_name().unwrap_or_default().to_string();

    let stream = field.map(|result| result.map_err(std::io::Error::other));

    IncomingFile {
        declared_type,
        original_name,
        declared_len: None,
        reader: Box::pin(tokio_util::io::StreamReader::new(stream)),
    }
}
