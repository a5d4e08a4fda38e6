//! HTTP 处理模块

pub mod auth;
pub mod cf;
pub mod config;
pub mod generate;

use actix_web::{HttpResponse, web};

use crate::error::ApiError;

/// 配置 `/api` 下的全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .service(
                web::resource("/auth")
                    .route(web::post().to(auth::login))
                    .default_service(web::to(invalid_route)),
            )
            .service(
                web::resource("/config")
                    .route(web::get().to(config::get_config))
                    .route(web::post().to(config::save_config))
                    .default_service(web::to(invalid_route)),
            )
            .service(
                web::resource("/generate")
                    .route(web::post().to(generate::generate))
                    .default_service(web::to(invalid_route)),
            )
            .route("/cf/{tail:.*}", web::route().to(cf::proxy)),
    );
}

/// 请求体 JSON 解析失败时也返回 `{success:false,error}`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// 未匹配的路由
pub async fn invalid_route() -> Result<HttpResponse, ApiError> {
    Err(ApiError::InvalidRoute)
}
