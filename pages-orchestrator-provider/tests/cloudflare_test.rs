//! Cloudflare provider 集成测试（wiremock 模拟 API）
//!
//! 运行方式:
//! ```bash
//! cargo test -p pages-orchestrator-provider --test cloudflare_test
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{TEST_TOKEN, TestContext, error_envelope, ok_envelope};
use pages_orchestrator_provider::{
    CreateDnsRecordRequest, ForwardRequest, PagesApi, PaginationParams, ProviderError,
    RecordQuery, ZoneApi,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// ============ Pages ============

#[tokio::test]
async fn add_project_domain_posts_name_with_bearer_token() {
    let ctx = TestContext::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc-1/pages/projects/shop/domains"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(body_json(json!({"name": "shop.example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "id": "dom-1",
            "name": "shop.example.com",
            "status": "initializing"
        }))))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let envelope = require_ok!(
        ctx.provider
            .add_project_domain("acc-1", "shop", "shop.example.com")
            .await
    );
    assert!(envelope.success);
    assert_eq!(envelope.result.unwrap()["status"], "initializing");
}

#[tokio::test]
async fn add_project_domain_rejection_is_returned_verbatim() {
    let ctx = TestContext::start().await;
    let body = json!({
        "success": false,
        "errors": [{
            "code": 8_000_018,
            "message": "You have already added this custom domain.",
            "documentation_url": "https://developers.cloudflare.com/pages"
        }],
        "messages": [],
        "result": null
    });
    Mock::given(method("POST"))
        .and(path("/accounts/acc-1/pages/projects/shop/domains"))
        .respond_with(ResponseTemplate::new(409).set_body_json(body.clone()))
        .mount(&ctx.server)
        .await;

    let envelope = require_ok!(
        ctx.provider
            .add_project_domain("acc-1", "shop", "shop.example.com")
            .await
    );
    assert!(!envelope.success);
    assert_eq!(envelope.errors()[0].code, Some(8_000_018));
    // 未知字段原样保留
    assert_eq!(serde_json::to_value(&envelope).unwrap(), body);
}

#[tokio::test]
async fn remove_project_domain_deletes_encoded_path() {
    let ctx = TestContext::start().await;
    Mock::given(method("DELETE"))
        .and(path("/accounts/acc-1/pages/projects/shop/domains/shop.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!(null))))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let envelope = require_ok!(
        ctx.provider
            .remove_project_domain("acc-1", "shop", "shop.example.com")
            .await
    );
    assert!(envelope.success);
}

#[tokio::test]
async fn non_json_pages_response_is_a_parse_error() {
    let ctx = TestContext::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&ctx.server)
        .await;

    let result = ctx
        .provider
        .add_project_domain("acc-1", "shop", "shop.example.com")
        .await;
    assert!(
        matches!(result, Err(ProviderError::ParseError { .. })),
        "unexpected result: {result:?}"
    );
}

// ============ Pass-through ============

#[tokio::test]
async fn forward_relays_status_and_body_verbatim() {
    let ctx = TestContext::start().await;
    let raw = r#"{"success":true,"result":[{"name":"shop"}],"result_info":{"page":1}}"#;
    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/pages/projects"))
        .and(query_param("page", "2"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(raw))
        .mount(&ctx.server)
        .await;

    let response = require_ok!(
        ctx.provider
            .forward(&ForwardRequest {
                method: "GET".to_string(),
                path: "accounts/acc-1/pages/projects".to_string(),
                query: Some("page=2".to_string()),
                body: Some("ignored for GET".to_string()),
            })
            .await
    );
    assert_eq!(response.status, 200);
    assert_eq!(response.body, raw);
}

#[tokio::test]
async fn forward_passes_error_statuses_through() {
    let ctx = TestContext::start().await;
    let raw = r#"{"success":false,"errors":[{"code":8000007,"message":"Project not found"}]}"#;
    Mock::given(method("PATCH"))
        .and(path("/accounts/acc-1/pages/projects/missing"))
        .and(body_string(r#"{"production_branch":"main"}"#))
        .respond_with(ResponseTemplate::new(404).set_body_string(raw))
        .mount(&ctx.server)
        .await;

    let response = require_ok!(
        ctx.provider
            .forward(&ForwardRequest {
                method: "PATCH".to_string(),
                path: "accounts/acc-1/pages/projects/missing".to_string(),
                query: None,
                body: Some(r#"{"production_branch":"main"}"#.to_string()),
            })
            .await
    );
    assert_eq!(response.status, 404);
    assert_eq!(response.body, raw);
}

// ============ Zones ============

#[tokio::test]
async fn list_zones_reads_result_info() {
    let ctx = TestContext::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": [
                {"id": "z1", "name": "example.com", "status": "active"},
                {"id": "z2", "name": "sub.example.com.", "status": "active"}
            ],
            "result_info": {"page": 1, "per_page": 50, "count": 2, "total_count": 120}
        })))
        .mount(&ctx.server)
        .await;

    let page = require_ok!(ctx.provider.list_zones(&PaginationParams::default()).await);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_count, 120);
    assert!(page.has_more);
    // 末尾的点被去掉
    assert_eq!(page.items[1].name, "sub.example.com");
}

#[tokio::test]
async fn list_zones_caps_page_size() {
    let ctx = TestContext::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let params = PaginationParams {
        page: 1,
        page_size: 500,
    };
    let page = require_ok!(ctx.provider.list_zones(&params).await);
    assert!(page.items.is_empty());
    assert!(!page.has_more);
}

#[tokio::test]
async fn list_zones_bad_token_is_invalid_credentials() {
    let ctx = TestContext::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(error_envelope(10000, "Authentication error")),
        )
        .mount(&ctx.server)
        .await;

    let result = ctx.provider.list_zones(&PaginationParams::default()).await;
    assert!(
        matches!(result, Err(ProviderError::InvalidCredentials { .. })),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_reported_with_retry_after() {
    let ctx = TestContext::start().await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&ctx.server)
        .await;

    let result = ctx.provider.list_zones(&PaginationParams::default()).await;
    assert!(
        matches!(
            result,
            Err(ProviderError::RateLimited {
                retry_after: Some(30),
                ..
            })
        ),
        "unexpected result: {result:?}"
    );
}

// ============ DNS Records ============

#[tokio::test]
async fn list_records_filters_by_type_and_name() {
    let ctx = TestContext::start().await;
    Mock::given(method("GET"))
        .and(path("/zones/z1/dns_records"))
        .and(query_param("type", "CNAME"))
        .and(query_param("name", "shop.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([{
            "id": "rec-1",
            "type": "CNAME",
            "name": "shop.example.com",
            "content": "shop.pages.dev",
            "ttl": 1,
            "proxied": true
        }]))))
        .mount(&ctx.server)
        .await;

    let records = require_ok!(
        ctx.provider
            .list_records("z1", &RecordQuery::cname("shop.example.com"))
            .await
    );
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "rec-1");
    assert_eq!(records[0].content, "shop.pages.dev");
    assert_eq!(records[0].proxied, Some(true));
}

#[tokio::test]
async fn create_record_sends_proxied_cname() {
    let ctx = TestContext::start().await;
    Mock::given(method("POST"))
        .and(path("/zones/z1/dns_records"))
        .and(body_json(json!({
            "type": "CNAME",
            "name": "shop.example.com",
            "content": "shop.pages.dev",
            "ttl": 1,
            "proxied": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "id": "rec-9",
            "type": "CNAME",
            "name": "shop.example.com",
            "content": "shop.pages.dev",
            "ttl": 1,
            "proxied": true
        }))))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let record = require_ok!(
        ctx.provider
            .create_record(
                "z1",
                &CreateDnsRecordRequest::proxied_cname("shop.example.com", "shop.pages.dev"),
            )
            .await
    );
    assert_eq!(record.id, "rec-9");
}

#[tokio::test]
async fn create_record_conflict_maps_to_record_exists() {
    let ctx = TestContext::start().await;
    Mock::given(method("POST"))
        .and(path("/zones/z1/dns_records"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_envelope(
            81053,
            "An A, AAAA, or CNAME record with that host already exists.",
        )))
        .mount(&ctx.server)
        .await;

    let result = ctx
        .provider
        .create_record(
            "z1",
            &CreateDnsRecordRequest::proxied_cname("shop.example.com", "shop.pages.dev"),
        )
        .await;
    assert!(
        matches!(&result, Err(ProviderError::RecordExists { record_name, .. }) if record_name == "shop.example.com"),
        "unexpected result: {result:?}"
    );
}

#[tokio::test]
async fn delete_record_hits_record_path() {
    let ctx = TestContext::start().await;
    Mock::given(method("DELETE"))
        .and(path("/zones/z1/dns_records/rec-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({"id": "rec-1"}))))
        .expect(1)
        .mount(&ctx.server)
        .await;

    require_ok!(ctx.provider.delete_record("z1", "rec-1").await);
}

#[tokio::test]
async fn delete_missing_record_maps_to_record_not_found() {
    let ctx = TestContext::start().await;
    Mock::given(method("DELETE"))
        .and(path("/zones/z1/dns_records/gone"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(error_envelope(81044, "Record does not exist.")),
        )
        .mount(&ctx.server)
        .await;

    let result = ctx.provider.delete_record("z1", "gone").await;
    assert!(
        matches!(&result, Err(ProviderError::RecordNotFound { record_id, .. }) if record_id == "gone"),
        "unexpected result: {result:?}"
    );
}
