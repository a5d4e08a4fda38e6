//! 共享测试工具和辅助函数

#![allow(dead_code, clippy::unwrap_used)]

use pages_orchestrator_provider::{CloudflareProvider, create_http_client};
use wiremock::MockServer;

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const TEST_TOKEN: &str = "test-token-0123456789";

/// Mock Cloudflare API 与指向它的 provider
pub struct TestContext {
    pub server: MockServer,
    pub provider: CloudflareProvider,
}

impl TestContext {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let client = create_http_client().unwrap();
        let provider = CloudflareProvider::with_client(client, server.uri(), TEST_TOKEN.to_string());
        Self { server, provider }
    }
}

/// Cloudflare 成功响应 envelope
pub fn ok_envelope(result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result
    })
}

/// Cloudflare 失败响应 envelope
pub fn error_envelope(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "errors": [{"code": code, "message": message}],
        "messages": [],
        "result": null
    })
}
