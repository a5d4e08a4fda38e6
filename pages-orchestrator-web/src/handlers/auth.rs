//! 登录校验

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::error::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// `POST /api/auth`
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> HttpResponse {
    if state.check_password(&body.password) {
        tracing::info!("登录成功");
        HttpResponse::Ok().json(ApiResponse::ok())
    } else {
        tracing::warn!("登录失败：密码错误");
        HttpResponse::Unauthorized().json(ApiResponse::failed())
    }
}
