//! 子域名生成

use actix_web::{HttpResponse, web};
use pages_orchestrator_core::types::PathSlot;
use serde::Deserialize;

use crate::error::{ApiError, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// `MM.DD`
    pub date: String,
    pub parent_domain: Option<String>,
    pub paths: Option<Vec<PathSlot>>,
}

/// `POST /api/generate`
pub async fn generate(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, ApiError> {
    let GenerateRequest {
        date,
        parent_domain,
        paths,
    } = body.into_inner();

    let names = state.generator.generate(&date, parent_domain, paths).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(names)))
}
