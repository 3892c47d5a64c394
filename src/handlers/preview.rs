use actix_web::{web, HttpResponse, Error};

use crate::models::response::{PreviewResponse, ErrorResponse};
use crate::services::dataset::{DatasetStore, PREVIEW_ROW_LIMIT};

/// Return the first rows of the active dataset as JSON records
pub async fn preview_dataset(store: web::Data<DatasetStore>) -> Result<HttpResponse, Error> {
    match store.preview_records(PREVIEW_ROW_LIMIT) {
        Ok(Some(preview)) => Ok(HttpResponse::Ok().json(PreviewResponse {
            status: "success".to_string(),
            preview,
        })),
        Ok(None) => Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "No dataset uploaded.".to_string(),
            status_code: 400,
        })),
        Err(e) => {
            log::error!("Failed to generate preview: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to generate preview: {}", e),
                status_code: 500,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App, http::StatusCode};
    use serde_json::{json, Value};

    async fn preview_response(store: DatasetStore) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(web::resource("/preview").route(web::get().to(preview_dataset))),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/preview").to_request()).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_preview_before_upload_returns_400() {
        let (status, body) = preview_response(DatasetStore::new()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No dataset uploaded.");
        assert_eq!(body["status_code"], 400);
    }

    #[actix_web::test]
    async fn test_preview_returns_rows_in_dataset_order() {
        let store = DatasetStore::new();
        store
            .ingest(b"Name,Weight,MPG\nFord Torino,3449,17.0\nDatsun 510,2280,27.2\n")
            .unwrap();

        let (status, body) = preview_response(store).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let preview = body["preview"].as_array().unwrap();
        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0]["Name"], json!("Ford Torino"));
        assert_eq!(preview[1]["MPG"], json!(27.2));

        let keys: Vec<&String> = preview[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["Name", "Weight", "MPG"]);
    }

    #[actix_web::test]
    async fn test_preview_caps_at_ten_rows() {
        let mut csv = String::from("id\n");
        for i in 0..40 {
            csv.push_str(&format!("{}\n", i));
        }
        let store = DatasetStore::new();
        store.ingest(csv.as_bytes()).unwrap();

        let (status, body) = preview_response(store).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["preview"].as_array().unwrap().len(), 10);
    }
}
