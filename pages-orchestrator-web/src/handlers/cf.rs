//! Cloudflare 代理：`/api/cf/{path}`
//!
//! 添加/移除 Pages 自定义域名时附带处理 CNAME，其余请求原样转发。

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use pages_orchestrator_core::services::CfRoute;
use pages_orchestrator_core::types::{DomainBindingRequest, ForwardRequest};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

pub const PAGES_TOKEN_HEADER: &str = "X-Pages-Token";
pub const ZONE_TOKEN_HEADER: &str = "X-Zone-Token";
pub const ACCOUNT_ID_HEADER: &str = "X-Account-Id";

const CF_PREFIX: &str = "/api/cf/";

/// 添加域名的请求体（与 Cloudflare API 相同）
#[derive(Debug, Deserialize)]
struct AddDomainBody {
    #[serde(default)]
    name: String,
}

fn header_value<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// 请求行里的原始路径（未解码），转发时保留客户端的百分号编码
fn raw_tail(req: &HttpRequest) -> &str {
    req.uri().path().strip_prefix(CF_PREFIX).unwrap_or_default()
}

/// `* /api/cf/{tail}`
pub async fn proxy(
    req: HttpRequest,
    tail: web::Path<String>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let Some(pages_token) = header_value(&req, PAGES_TOKEN_HEADER) else {
        return Err(ApiError::MissingPagesToken);
    };
    let zone_token = header_value(&req, ZONE_TOKEN_HEADER).map(str::to_string);
    let tail = tail.into_inner();

    let route = CfRoute::classify(req.method().as_str(), &tail)
        .with_account_override(header_value(&req, ACCOUNT_ID_HEADER));
    tracing::debug!("{} /{tail} -> {route:?}", req.method());

    match route {
        CfRoute::AddDomain {
            account_id,
            project_name,
        } => {
            let AddDomainBody { name } = serde_json::from_slice(&body)
                .map_err(|e| ApiError::BadRequest(format!("invalid domain body: {e}")))?;
            let request = DomainBindingRequest {
                account_id,
                project_name,
                domain_name: name.trim().to_string(),
                pages_token: pages_token.to_string(),
                zone_token,
            };
            let outcome = state.binding.add_domain_binding(&request).await?;
            Ok(HttpResponse::Ok().json(outcome.into_envelope()))
        }
        CfRoute::RemoveDomain {
            account_id,
            project_name,
            domain_name,
        } => {
            let request = DomainBindingRequest {
                account_id,
                project_name,
                domain_name,
                pages_token: pages_token.to_string(),
                zone_token,
            };
            let outcome = state.binding.remove_domain_binding(&request).await?;
            Ok(HttpResponse::Ok().json(outcome.into_envelope()))
        }
        CfRoute::PassThrough => {
            let forward = ForwardRequest {
                method: req.method().to_string(),
                path: raw_tail(&req).to_string(),
                query: Some(req.query_string().to_string()).filter(|q| !q.is_empty()),
                body: (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned()),
            };
            let response = state.binding.pass_through(pages_token, &forward).await?;
            let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok(HttpResponse::build(status)
                .content_type("application/json")
                .body(response.body))
        }
    }
}
