//! Cloudflare HTTP 请求方法

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::{ApiEnvelope, ForwardRequest, ForwardResponse};

use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// 构造带 Bearer 认证的请求
    pub(crate) fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.api_base);
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.api_token))
    }

    /// 发送请求并解析强类型响应，`success == false` 时映射为 `ProviderError`
    async fn send_typed<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method_name: &str,
        path: &str,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let (_, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method_name, path).await?;

        let cf_response: CloudflareResponse<T> =
            HttpUtils::parse_json(&response_text, self.provider_name())?;

        if !cf_response.success {
            let (code, message) = cf_response
                .errors
                .and_then(|errors| {
                    errors
                        .first()
                        .map(|e| (e.code.to_string(), e.message.clone()))
                })
                .unwrap_or_else(|| (String::new(), "Unknown error".to_string()));
            log::error!("[cloudflare] API 错误: {message}");
            let raw = if code.is_empty() {
                RawApiError::new(message)
            } else {
                RawApiError::with_code(code, message)
            };
            return Err(self.map_error(raw, context));
        }

        Ok(cf_response)
    }

    /// 执行 GET 请求 (带分页)，返回 (items, total_count)
    pub(crate) async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<(Vec<T>, u32)> {
        let request = self.authorized(Method::GET, path);
        let cf_response: CloudflareResponse<Vec<T>> =
            self.send_typed(request, "GET", path, context).await?;
        let items = cf_response.result.unwrap_or_default();
        // result_info 缺失时以本页条数为准，视为没有下一页
        let total_count = cf_response.result_info.map_or_else(
            || u32::try_from(items.len()).unwrap_or(u32::MAX),
            |i| i.total_count,
        );
        Ok((items, total_count))
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let request = self.authorized(Method::POST, path).json(body);
        let cf_response = self.send_typed(request, "POST", path, context).await?;
        cf_response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        let request = self.authorized(Method::DELETE, path);
        let _: CloudflareResponse<serde_json::Value> =
            self.send_typed(request, "DELETE", path, context).await?;
        Ok(())
    }

    /// 发送请求并原样返回 envelope（Pages 调用）
    ///
    /// 不论 HTTP 状态码如何，只要响应是合法的 envelope 就返回 `Ok`。
    pub(crate) async fn send_envelope(
        &self,
        request: RequestBuilder,
        method_name: &str,
        path: &str,
    ) -> Result<ApiEnvelope> {
        let (_, response_text) =
            HttpUtils::execute_raw(request, self.provider_name(), method_name, path).await?;
        let envelope: ApiEnvelope = HttpUtils::parse_json(&response_text, self.provider_name())?;
        if !envelope.success {
            log::warn!(
                "[cloudflare] {method_name} {path} rejected: {}",
                envelope.first_error_message().unwrap_or("Unknown error")
            );
        }
        Ok(envelope)
    }

    /// Pass-through：原样转发，原样返回
    pub(crate) async fn forward_raw(&self, request: &ForwardRequest) -> Result<ForwardResponse> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "method".to_string(),
                detail: format!("unsupported HTTP method '{}'", request.method),
            }
        })?;

        let path = match request.query.as_deref() {
            Some(query) if !query.is_empty() => format!("/{}?{query}", request.path),
            _ => format!("/{}", request.path),
        };

        let mut builder = self
            .authorized(method.clone(), &path)
            .header("Content-Type", "application/json");
        if method != Method::GET
            && let Some(body) = &request.body
        {
            builder = builder.body(body.clone());
        }

        let (status, body) =
            HttpUtils::execute_raw(builder, self.provider_name(), method.as_str(), &path).await?;
        Ok(ForwardResponse { status, body })
    }
}
