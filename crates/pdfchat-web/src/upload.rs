use axum::extract::Multipart;

use crate::error::ApiError;

/// An uploaded file with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Pull the `file` part out of a multipart form upload.
///
/// Unknown fields are drained and ignored. The bytes must carry the
/// `%PDF-` magic; anything else is rejected before it reaches the
/// extractor.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadUpload(format!("Failed to read form field: {e}")))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadUpload(format!("Failed to read file data: {e}")))?
                    .to_vec();
                file = Some(UploadedFile { filename, data });
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let file = file.ok_or(ApiError::NoFile)?;

    if !file.data.starts_with(b"%PDF-") {
        return Err(ApiError::BadUpload(
            "Uploaded file doesn't appear to be a valid PDF".to_string(),
        ));
    }

    Ok(file)
}
