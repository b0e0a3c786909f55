use actix_multipart::Multipart;
use futures::StreamExt;
use log::warn;

use crate::error::ApiError;

pub const FILE_FIELD: &str = "file";

// Reads the `file` part of a multipart upload into memory, bounded by `max_bytes`.
pub async fn read_file_field(mut payload: Multipart, max_bytes: usize) -> Result<Vec<u8>, ApiError> {
    while let Some(item) = payload.next().await {
        let mut field = item?;
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let mut content = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if content.len() + chunk.len() > max_bytes {
                warn!("Rejected upload larger than {} bytes", max_bytes);
                return Err(ApiError::BadRequest(format!(
                    "Uploaded file exceeds the {} byte limit",
                    max_bytes
                )));
            }
            content.extend_from_slice(&chunk);
        }
        return Ok(content);
    }

    Err(ApiError::BadRequest(format!(
        "Missing '{}' field in upload",
        FILE_FIELD
    )))
}
