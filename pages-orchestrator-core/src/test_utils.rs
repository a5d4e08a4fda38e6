//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pages_orchestrator_provider::{
    CreateDnsRecordRequest, PagesApi, PaginatedResponse, PaginationParams, ProviderError,
    RecordQuery, ZoneApi,
};
use serde_json::{Value, json};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ConfigService, ServiceContext};
use crate::traits::{ConfigRepository, ProviderFactory};
use crate::types::{
    ApiEnvelope, ApiMessage, DnsRecord, DomainBindingRequest, ForwardRequest, ForwardResponse,
    UserConfig, Zone,
};

type ProviderResult<T> = pages_orchestrator_provider::Result<T>;

// ===== MockConfigRepository =====

pub struct MockConfigRepository {
    config: RwLock<Option<UserConfig>>,
    /// 如果 Some，load 时返回此错误
    load_error: RwLock<Option<String>>,
    /// 如果 Some，save 时返回此错误
    save_error: RwLock<Option<String>>,
}

impl MockConfigRepository {
    pub fn new() -> Self {
        Self {
            config: RwLock::new(None),
            load_error: RwLock::new(None),
            save_error: RwLock::new(None),
        }
    }

    pub async fn set(&self, config: UserConfig) {
        *self.config.write().await = Some(config);
    }

    pub async fn fail_load(&self, msg: &str) {
        *self.load_error.write().await = Some(msg.to_string());
    }

    pub async fn fail_save(&self, msg: &str) {
        *self.save_error.write().await = Some(msg.to_string());
    }
}

#[async_trait]
impl ConfigRepository for MockConfigRepository {
    async fn load(&self) -> CoreResult<Option<UserConfig>> {
        if let Some(ref msg) = *self.load_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(self.config.read().await.clone())
    }

    async fn save(&self, config: &UserConfig) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        *self.config.write().await = Some(config.clone());
        Ok(())
    }
}

// ===== MockPagesApi =====

pub struct MockPagesApi {
    response: RwLock<ProviderResult<ApiEnvelope>>,
    forward_response: RwLock<ProviderResult<ForwardResponse>>,
    calls: RwLock<Vec<String>>,
}

impl MockPagesApi {
    pub fn new() -> Self {
        Self {
            response: RwLock::new(Ok(ok_envelope())),
            forward_response: RwLock::new(Ok(ForwardResponse {
                status: 200,
                body: ok_envelope_json().to_string(),
            })),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// add / remove 共用的返回值
    pub async fn set_response(&self, response: ProviderResult<ApiEnvelope>) {
        *self.response.write().await = response;
    }

    pub async fn set_forward_response(&self, response: ProviderResult<ForwardResponse>) {
        *self.forward_response.write().await = response;
    }

    /// 调用记录，如 `add acc/project/domain`
    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: String) {
        self.calls.write().await.push(call);
    }
}

#[async_trait]
impl PagesApi for MockPagesApi {
    async fn add_project_domain(
        &self,
        account_id: &str,
        project_name: &str,
        domain_name: &str,
    ) -> ProviderResult<ApiEnvelope> {
        self.record(format!("add {account_id}/{project_name}/{domain_name}"))
            .await;
        self.response.read().await.clone()
    }

    async fn remove_project_domain(
        &self,
        account_id: &str,
        project_name: &str,
        domain_name: &str,
    ) -> ProviderResult<ApiEnvelope> {
        self.record(format!("remove {account_id}/{project_name}/{domain_name}"))
            .await;
        self.response.read().await.clone()
    }

    async fn forward(&self, request: &ForwardRequest) -> ProviderResult<ForwardResponse> {
        self.record(format!("forward {} {}", request.method, request.path))
            .await;
        self.forward_response.read().await.clone()
    }
}

// ===== MockZoneApi =====

#[derive(Default)]
struct ZoneState {
    zones: Vec<Zone>,
    records: Vec<DnsRecord>,
    list_zones_error: Option<ProviderError>,
    list_records_error: Option<ProviderError>,
    create_error: Option<ProviderError>,
    delete_error: Option<ProviderError>,
    pages_requested: Vec<u32>,
    created: Vec<(String, CreateDnsRecordRequest)>,
    deleted: Vec<(String, String)>,
    calls: Vec<String>,
}

pub struct MockZoneApi {
    state: RwLock<ZoneState>,
}

impl MockZoneApi {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ZoneState::default()),
        }
    }

    pub async fn set_zones(&self, zones: Vec<Zone>) {
        self.state.write().await.zones = zones;
    }

    pub async fn set_records(&self, records: Vec<DnsRecord>) {
        self.state.write().await.records = records;
    }

    pub async fn fail_list_zones(&self, err: ProviderError) {
        self.state.write().await.list_zones_error = Some(err);
    }

    pub async fn fail_list_records(&self, err: ProviderError) {
        self.state.write().await.list_records_error = Some(err);
    }

    pub async fn fail_create(&self, err: ProviderError) {
        self.state.write().await.create_error = Some(err);
    }

    pub async fn fail_delete(&self, err: ProviderError) {
        self.state.write().await.delete_error = Some(err);
    }

    pub async fn zone_pages_requested(&self) -> Vec<u32> {
        self.state.read().await.pages_requested.clone()
    }

    pub async fn created(&self) -> Vec<(String, CreateDnsRecordRequest)> {
        self.state.read().await.created.clone()
    }

    pub async fn deleted(&self) -> Vec<(String, String)> {
        self.state.read().await.deleted.clone()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.state.read().await.calls.clone()
    }
}

#[async_trait]
impl ZoneApi for MockZoneApi {
    async fn list_zones(&self, params: &PaginationParams) -> ProviderResult<PaginatedResponse<Zone>> {
        let mut state = self.state.write().await;
        state.calls.push(format!("list_zones {}", params.page));
        state.pages_requested.push(params.page);
        if let Some(err) = state.list_zones_error.clone() {
            return Err(err);
        }

        let start = ((params.page.max(1) - 1) * params.page_size) as usize;
        let items: Vec<Zone> = state
            .zones
            .iter()
            .skip(start)
            .take(params.page_size as usize)
            .cloned()
            .collect();
        let total = u32::try_from(state.zones.len()).unwrap();
        Ok(PaginatedResponse::new(
            items,
            params.page,
            params.page_size,
            total,
        ))
    }

    async fn list_records(&self, zone_id: &str, query: &RecordQuery) -> ProviderResult<Vec<DnsRecord>> {
        let mut state = self.state.write().await;
        state.calls.push(format!("list_records {zone_id} {}", query.name));
        if let Some(err) = state.list_records_error.clone() {
            return Err(err);
        }
        Ok(state
            .records
            .iter()
            .filter(|r| r.name == query.name && r.record_type == query.record_type)
            .cloned()
            .collect())
    }

    async fn create_record(
        &self,
        zone_id: &str,
        req: &CreateDnsRecordRequest,
    ) -> ProviderResult<DnsRecord> {
        let mut state = self.state.write().await;
        state.calls.push(format!("create_record {zone_id} {}", req.name));
        if let Some(err) = state.create_error.clone() {
            return Err(err);
        }
        state.created.push((zone_id.to_string(), req.clone()));
        Ok(DnsRecord {
            id: format!("rec-new-{}", state.created.len()),
            record_type: req.record_type.clone(),
            name: req.name.clone(),
            content: req.content.clone(),
            ttl: req.ttl,
            proxied: Some(req.proxied),
        })
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> ProviderResult<()> {
        let mut state = self.state.write().await;
        state.calls.push(format!("delete_record {zone_id} {record_id}"));
        if let Some(err) = state.delete_error.clone() {
            return Err(err);
        }
        state
            .deleted
            .push((zone_id.to_string(), record_id.to_string()));
        Ok(())
    }
}

// ===== MockProviderFactory =====

/// 所有 token 共用同一组 mock，并记录收到的 token
pub struct MockProviderFactory {
    pub pages: Arc<MockPagesApi>,
    pub zone: Arc<MockZoneApi>,
    pages_tokens: Mutex<Vec<String>>,
    zone_tokens: Mutex<Vec<String>>,
}

impl MockProviderFactory {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(MockPagesApi::new()),
            zone: Arc::new(MockZoneApi::new()),
            pages_tokens: Mutex::new(Vec::new()),
            zone_tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn pages_tokens(&self) -> Vec<String> {
        self.pages_tokens.lock().unwrap().clone()
    }

    pub fn zone_tokens(&self) -> Vec<String> {
        self.zone_tokens.lock().unwrap().clone()
    }
}

impl ProviderFactory for MockProviderFactory {
    fn pages_api(&self, pages_token: &str) -> Arc<dyn PagesApi> {
        self.pages_tokens
            .lock()
            .unwrap()
            .push(pages_token.to_string());
        self.pages.clone()
    }

    fn zone_api(&self, zone_token: &str) -> Arc<dyn ZoneApi> {
        self.zone_tokens.lock().unwrap().push(zone_token.to_string());
        self.zone.clone()
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> (
    Arc<ServiceContext>,
    Arc<MockConfigRepository>,
    Arc<MockProviderFactory>,
) {
    let config_repo = Arc::new(MockConfigRepository::new());
    let factory = Arc::new(MockProviderFactory::new());
    let ctx = Arc::new(ServiceContext::new(config_repo.clone(), factory.clone()));
    (ctx, config_repo, factory)
}

/// 创建测试用 `ConfigService`
pub fn create_test_config_service() -> (ConfigService, Arc<MockConfigRepository>) {
    let (ctx, config_repo, _) = create_test_context();
    (ConfigService::new(ctx), config_repo)
}

pub fn zone(id: &str, name: &str) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn cname_record(id: &str, name: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        record_type: "CNAME".to_string(),
        name: name.to_string(),
        content: "shop.pages.dev".to_string(),
        ttl: 1,
        proxied: Some(true),
    }
}

/// `shop.example.com` 绑定到 `acc-1` 下的 `shop` 项目
pub fn binding_request(zone_token: Option<&str>) -> DomainBindingRequest {
    DomainBindingRequest {
        account_id: "acc-1".to_string(),
        project_name: "shop".to_string(),
        domain_name: "shop.example.com".to_string(),
        pages_token: "pages-token".to_string(),
        zone_token: zone_token.map(str::to_string),
    }
}

fn ok_envelope_json() -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": { "name": "shop.example.com", "status": "initializing" }
    })
}

pub fn ok_envelope() -> ApiEnvelope {
    serde_json::from_value(ok_envelope_json()).unwrap()
}

pub fn error_envelope(code: i64, message: &str) -> ApiEnvelope {
    ApiEnvelope {
        success: false,
        errors: Some(vec![ApiMessage {
            code: Some(code),
            ..ApiMessage::new(message)
        }]),
        messages: Some(Vec::new()),
        result: Some(Value::Null),
        extra: serde_json::Map::new(),
    }
}
