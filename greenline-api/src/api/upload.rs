//! Spreadsheet upload endpoint
//!
//! Accepts one multipart file field, parses CSV content, and acknowledges
//! with the number of data rows. Only CSV is parsed here; other
//! spreadsheet formats are rejected as unsupported.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::{ApiError, ApiResult};

/// Response body for POST /upload
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    /// Data rows parsed, excluding the header
    pub rows: usize,
}

/// POST /upload
///
/// Expects a multipart form with a `file` field.
pub async fn upload_file(mut multipart: Multipart) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ApiError::BadRequest("No selected file".to_string())),
        };

        let is_csv = Path::new(&filename)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(ApiError::UnsupportedFileType(filename));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let rows = count_csv_rows(&bytes)?;
        info!(filename = %filename, rows, "Processed uploaded spreadsheet");

        return Ok(Json(UploadResponse { filename, rows }));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

/// Count data rows in CSV content, first row treated as the header
fn count_csv_rows(bytes: &[u8]) -> ApiResult<usize> {
    let mut reader = csv::ReaderBuilder::new().from_reader(bytes);

    let mut rows = 0;
    for record in reader.records() {
        record.map_err(|e| ApiError::BadRequest(format!("Error processing file: {}", e)))?;
        rows += 1;
    }

    Ok(rows)
}
