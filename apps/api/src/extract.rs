//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart};

use crate::error::{ApiError, ApiResult};

/// `axum::Json` whose rejection is an [`ApiError`] body instead of plain text.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// A file pulled out of a multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Reads the first file part: a field named `file`, or any field with a file name.
///
/// Other fields are skipped. `None` when the form has no file part.
pub async fn read_file_field(mut multipart: Multipart) -> ApiResult<Option<UploadedFile>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") || field.file_name().is_some() {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?;
            return Ok(Some(UploadedFile { file_name, bytes }));
        }
    }

    Ok(None)
}

/// Like [`read_file_field`] but a missing or empty file is a 400.
pub async fn require_file(multipart: Multipart) -> ApiResult<UploadedFile> {
    match read_file_field(multipart).await? {
        Some(file) if !file.is_empty() => Ok(file),
        _ => Err(ApiError::bad_request("No image uploaded")),
    }
}
