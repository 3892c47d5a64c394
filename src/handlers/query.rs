use actix_web::{web, HttpResponse, Error};
use log::{info, error};

use crate::models::query::{QueryRequest, QueryResponse};
use crate::models::response::ErrorResponse;
use crate::services::chart::SpecOutcome;
use crate::services::{ChartService, CompletionServiceTrait, DatasetStore, RelevanceFilter};

/// Guidance returned when a question arrives before any upload
const NO_DATASET_MESSAGE: &str = "Please upload a dataset before sending a message.";

/// Handle a natural-language chart query. Questions that do not mention any
/// column of the active dataset are answered locally without touching the
/// completion API.
pub async fn query_chart<C>(
    request: web::Json<QueryRequest>,
    store: web::Data<DatasetStore>,
    relevance: web::Data<RelevanceFilter>,
    chart_service: web::Data<ChartService<C>>,
) -> Result<HttpResponse, Error>
where
    C: CompletionServiceTrait + Clone + std::fmt::Debug,
{
    let request = request.into_inner();
    info!("Received chart query: {}", request.user_query);

    let column_names = match store.column_names() {
        Ok(Some(column_names)) => column_names,
        Ok(None) => {
            return Ok(HttpResponse::Ok().json(QueryResponse {
                response: Some(NO_DATASET_MESSAGE.to_string()),
                vega_spec: None,
            }));
        }
        Err(e) => {
            error!("Failed to read dataset columns: {}", e);
            return Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Failed to read dataset columns: {}", e),
                status_code: 500,
            }));
        }
    };

    if !relevance.is_relevant(&column_names, &request.user_query) {
        info!("Rejected question with no column overlap: {}", request.user_query);
        return Ok(HttpResponse::Ok().json(QueryResponse {
            response: Some(format!(
                "The question '{}' is not relevant to the dataset. Ask a more relevant question please.",
                request.user_query
            )),
            vega_spec: None,
        }));
    }

    match chart_service.generate_spec(&request.prompt).await {
        Ok(SpecOutcome::Spec(spec)) => Ok(HttpResponse::Ok().json(QueryResponse {
            response: None,
            vega_spec: Some(spec),
        })),
        Ok(SpecOutcome::Unparsed(text)) => Ok(HttpResponse::Ok().json(QueryResponse {
            response: Some(text),
            vega_spec: None,
        })),
        Err(e) => {
            error!("Chart specification generation failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
                status_code: 500,
            }))
        }
    }
}
