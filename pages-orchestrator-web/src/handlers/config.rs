//! 用户配置读写

use actix_web::{HttpResponse, web};
use pages_orchestrator_core::types::UserConfig;
use serde::Serialize;

use crate::error::{ApiError, ApiResponse};
use crate::state::AppState;

/// `GET /api/config` 的响应：从未保存过时 `config` 为 `null`
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub success: bool,
    pub config: Option<UserConfig>,
}

/// `GET /api/config`
pub async fn get_config(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let config = state.config.get().await?;
    Ok(HttpResponse::Ok().json(ConfigResponse {
        success: true,
        config,
    }))
}

/// `POST /api/config`，整体替换
pub async fn save_config(
    state: web::Data<AppState>,
    body: web::Json<UserConfig>,
) -> Result<HttpResponse, ApiError> {
    state.config.save(&body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}
