use actix_web::{web, HttpResponse, Error};
use log::{info, error};

use crate::models::query::{DescriptionRequest, DescriptionResponse};
use crate::models::response::ErrorResponse;
use crate::services::{ChartService, CompletionServiceTrait};

/// Generate a one-line description of a rendered chart
pub async fn describe_chart<C>(
    request: web::Json<DescriptionRequest>,
    chart_service: web::Data<ChartService<C>>,
) -> Result<HttpResponse, Error>
where
    C: CompletionServiceTrait + Clone + std::fmt::Debug,
{
    let request = request.into_inner();
    info!(
        "Describing chart for query: {} ({} sample rows)",
        request.user_query,
        request.data.len()
    );

    match chart_service.describe(&request.data, &request.user_query).await {
        Ok(description) => Ok(HttpResponse::Ok().json(DescriptionResponse { description })),
        Err(e) => {
            error!("Chart description generation failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
                status_code: 500,
            }))
        }
    }
}
