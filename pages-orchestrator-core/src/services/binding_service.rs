//! 自定义域名绑定编排
//!
//! 先执行 Pages 绑定/解绑（决定整体成败），成功后在提供了 Zone token 的情况下
//! 尽力创建/删除对应的 CNAME 记录。DNS 步骤失败不会回滚 Pages 操作。

use std::sync::Arc;

use pages_orchestrator_provider::{
    CreateDnsRecordRequest, ProviderError, RecordQuery, ZoneApi,
};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::services::zone_resolver::{ZoneResolution, resolve_with};
use crate::types::{
    ApiEnvelope, BindingOperation, BindingOutcome, BindingResult, DomainBindingRequest,
    ForwardRequest, ForwardResponse, PagesError, SkipReason, Zone,
};

/// 域名绑定服务
pub struct BindingService {
    ctx: Arc<ServiceContext>,
}

impl BindingService {
    /// 创建绑定服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 添加自定义域名，并尽力创建指向 `<project>.pages.dev` 的 CNAME
    pub async fn add_domain_binding(
        &self,
        request: &DomainBindingRequest,
    ) -> CoreResult<BindingOutcome> {
        request.validate()?;
        log::info!(
            "Adding domain {} to project {}",
            request.domain_name,
            request.project_name
        );

        let pages = self.ctx.provider_factory.pages_api(&request.pages_token);
        let primary = pages
            .add_project_domain(
                &request.account_id,
                &request.project_name,
                &request.domain_name,
            )
            .await;
        let envelope = match Self::check_primary(BindingOperation::Add, primary) {
            Ok(envelope) => envelope,
            Err(outcome) => return Ok(*outcome),
        };

        let result = match self.locate_zone(request).await {
            Err(reason) => BindingResult::dns_skipped(reason),
            Ok((zone_api, zone)) => self.create_cname(zone_api.as_ref(), &zone, request).await,
        };

        Ok(Self::finish(BindingOperation::Add, envelope, result, request))
    }

    /// 移除自定义域名，并尽力删除同名 CNAME
    pub async fn remove_domain_binding(
        &self,
        request: &DomainBindingRequest,
    ) -> CoreResult<BindingOutcome> {
        request.validate()?;
        log::info!(
            "Removing domain {} from project {}",
            request.domain_name,
            request.project_name
        );

        let pages = self.ctx.provider_factory.pages_api(&request.pages_token);
        let primary = pages
            .remove_project_domain(
                &request.account_id,
                &request.project_name,
                &request.domain_name,
            )
            .await;
        let envelope = match Self::check_primary(BindingOperation::Remove, primary) {
            Ok(envelope) => envelope,
            Err(outcome) => return Ok(*outcome),
        };

        let result = match self.locate_zone(request).await {
            Err(reason) => BindingResult::dns_skipped(reason),
            Ok((zone_api, zone)) => Self::delete_cname(zone_api.as_ref(), &zone, request).await,
        };

        Ok(Self::finish(BindingOperation::Remove, envelope, result, request))
    }

    /// 原样转发到 Provider API
    pub async fn pass_through(
        &self,
        pages_token: &str,
        request: &ForwardRequest,
    ) -> CoreResult<ForwardResponse> {
        if pages_token.trim().is_empty() {
            return Err(CoreError::MissingPagesToken);
        }
        let pages = self.ctx.provider_factory.pages_api(pages_token);
        match pages.forward(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                log::error!("Pass-through {} /{} failed: {e}", request.method, request.path);
                Err(e.into())
            }
        }
    }

    /// 检查 Pages 主操作结果；失败时直接给出最终结果
    fn check_primary(
        operation: BindingOperation,
        primary: Result<ApiEnvelope, ProviderError>,
    ) -> Result<ApiEnvelope, Box<BindingOutcome>> {
        match primary {
            Ok(envelope) if envelope.success => Ok(envelope),
            Ok(envelope) => {
                log::warn!(
                    "Pages {operation:?} rejected: {}",
                    envelope.first_error_message().unwrap_or("Unknown error")
                );
                let result = BindingResult::pages_failed(PagesError::Provider {
                    errors: envelope.errors().to_vec(),
                });
                Err(Box::new(BindingOutcome {
                    operation,
                    envelope,
                    result,
                }))
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Pages {operation:?} failed: {e}");
                } else {
                    log::error!("Pages {operation:?} failed: {e}");
                }
                let message = e.to_string();
                Err(Box::new(BindingOutcome {
                    operation,
                    envelope: ApiEnvelope::failure(message.clone()),
                    result: BindingResult::pages_failed(PagesError::Transport { message }),
                }))
            }
        }
    }

    /// 找到域名所在的 Zone；找不到时给出跳过原因
    async fn locate_zone(
        &self,
        request: &DomainBindingRequest,
    ) -> Result<(Arc<dyn ZoneApi>, Zone), SkipReason> {
        let Some(zone_token) = request.zone_credential() else {
            log::debug!("No zone token, skipping DNS for {}", request.domain_name);
            return Err(SkipReason::NoZoneCredential);
        };

        let zone_api = self.ctx.provider_factory.zone_api(zone_token);
        match resolve_with(zone_api.as_ref(), &request.domain_name).await {
            ZoneResolution::Matched(zone) => Ok((zone_api, zone)),
            ZoneResolution::NoMatch => Err(SkipReason::NoMatchingZone),
            ZoneResolution::LookupFailed { message } => {
                Err(SkipReason::ZoneLookupFailed { message })
            }
        }
    }

    async fn create_cname(
        &self,
        zone_api: &dyn ZoneApi,
        zone: &Zone,
        request: &DomainBindingRequest,
    ) -> BindingResult {
        let target = self.ctx.pages_target(&request.project_name);
        let record = CreateDnsRecordRequest::proxied_cname(&request.domain_name, &target);

        match zone_api.create_record(&zone.id, &record).await {
            Ok(created) => {
                log::info!(
                    "Created CNAME {} -> {target} in zone {}",
                    request.domain_name,
                    zone.name
                );
                BindingResult::dns_created(created.id)
            }
            Err(e) => {
                log_dns_error("create", &request.domain_name, &e);
                BindingResult::dns_failed(e.to_string())
            }
        }
    }

    async fn delete_cname(
        zone_api: &dyn ZoneApi,
        zone: &Zone,
        request: &DomainBindingRequest,
    ) -> BindingResult {
        let records = match zone_api
            .list_records(&zone.id, &RecordQuery::cname(&request.domain_name))
            .await
        {
            Ok(records) => records,
            Err(e) => {
                log_dns_error("lookup", &request.domain_name, &e);
                return BindingResult::dns_failed(e.to_string());
            }
        };

        let Some(record) = records.first() else {
            log::info!(
                "No CNAME for {} in zone {}, nothing to delete",
                request.domain_name,
                zone.name
            );
            return BindingResult::dns_already_clean();
        };
        if records.len() > 1 {
            log::warn!(
                "Found {} CNAME records named {}, deleting only {}",
                records.len(),
                request.domain_name,
                record.id
            );
        }

        match zone_api.delete_record(&zone.id, &record.id).await {
            Ok(()) => {
                log::info!(
                    "Deleted CNAME {} ({}) from zone {}",
                    request.domain_name,
                    record.id,
                    zone.name
                );
                BindingResult::dns_deleted(record.id.clone())
            }
            Err(e) => {
                log_dns_error("delete", &request.domain_name, &e);
                BindingResult::dns_failed(e.to_string())
            }
        }
    }

    fn finish(
        operation: BindingOperation,
        envelope: ApiEnvelope,
        result: BindingResult,
        request: &DomainBindingRequest,
    ) -> BindingOutcome {
        if result.requires_dns_follow_up() {
            log::warn!(
                "Pages {operation:?} for {} succeeded, DNS needs manual follow-up: {:?}",
                request.domain_name,
                result.dns_status()
            );
        }
        BindingOutcome {
            operation,
            envelope,
            result,
        }
    }
}

fn log_dns_error(step: &str, domain_name: &str, e: &ProviderError) {
    if e.is_expected() {
        log::warn!("DNS {step} for {domain_name} failed: {e}");
    } else {
        log::error!("DNS {step} for {domain_name} failed: {e}");
    }
}
