use actix_web::{web, HttpResponse, Error};
use actix_multipart::Multipart;
use futures::StreamExt;
use std::io::Write;

use crate::models::response::{UploadResponse, ErrorResponse};
use crate::services::DatasetStore;

/// Handle a CSV upload and replace the active dataset with its contents
pub async fn upload_dataset(
    mut payload: Multipart,
    store: web::Data<DatasetStore>,
) -> Result<HttpResponse, Error> {
    // Process the multipart form data
    let mut file_content = Vec::new();
    let mut filename = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let content_disposition = field.content_disposition();

        if let Some(name) = content_disposition.get_name() {
            if name == "file" {
                if let Some(fname) = content_disposition.get_filename() {
                    filename = fname.to_string();
                }

                // Read the file data
                while let Some(chunk) = field.next().await {
                    let data = chunk?;
                    file_content.write_all(&data)?;
                }
            }
        }
    }

    if file_content.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "No file uploaded".to_string(),
            status_code: 400,
        }));
    }

    log::info!("📥 Received upload: {} ({} bytes)", filename, file_content.len());

    match store.ingest(&file_content) {
        Ok((rows, cols)) => {
            log::info!("✅ Parsed dataset: {} rows, {} columns", rows, cols);
            Ok(HttpResponse::Ok().json(UploadResponse {
                status: "success".to_string(),
                message: "File uploaded and parsed successfully.".to_string(),
            }))
        }
        Err(e) => {
            log::error!("❌ Failed to parse uploaded file: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to upload and parse file: {}", e),
                status_code: 500,
            }))
        }
    }
}
