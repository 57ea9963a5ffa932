use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::UploadReader;

/// One file attached to an upload request
pub struct IncomingFile<'a> {
    /// MIME type claimed by the client; untrusted
    pub declared_type: Option<String>,
    pub original_name: String,
    /// Length claimed by the client, if any; informational only
    pub declared_len: Option<u64>,
    pub reader: UploadReader<'a>,
}

impl std::fmt::Debug for IncomingFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomingFile")
            .field("declared_type", &self.declared_type)
            .field("original_name", &self.original_name)
            .field("declared_len", &self.declared_len)
            .finish_non_exhaustive()
    }
}

/// Fully received upload, all files known up front
#[derive(Debug, Default)]
pub struct UploadRequest {
    pub files: Vec<IncomingFile<'static>>,
}

impl UploadRequest {
    pub fn single(file: IncomingFile<'static>) -> Self {
        Self { files: vec![file] }
    }
}

/// Successful upload response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadAccepted {
    /// Public path of the stored file
    #[schema(example = "/images/1700000000123-482913377.png")]
    pub file_name: String,
    /// File name as sent by the client
    #[schema(example = "holiday.png")]
    pub original_name: String,
}

/// Error body returned for rejected uploads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
