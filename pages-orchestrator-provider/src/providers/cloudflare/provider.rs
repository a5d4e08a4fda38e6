//! Cloudflare `PagesApi` / `ZoneApi` trait 实现

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::providers::common::{encode_segment, normalize_domain_name};
use crate::traits::{ErrorContext, PagesApi, ZoneApi};
use crate::types::{
    ApiEnvelope, CreateDnsRecordRequest, DnsRecord, ForwardRequest, ForwardResponse,
    PaginatedResponse, PaginationParams, RecordQuery, Zone,
};

use super::types::{CloudflareCreateRecordBody, CloudflarePagesDomainBody};
use super::{
    CloudflareDnsRecord, CloudflareProvider, CloudflareZone, MAX_PAGE_SIZE_RECORDS,
    MAX_PAGE_SIZE_ZONES,
};

impl CloudflareProvider {
    fn domains_path(account_id: &str, project_name: &str) -> String {
        format!(
            "/accounts/{}/pages/projects/{}/domains",
            encode_segment(account_id),
            encode_segment(project_name)
        )
    }

    fn zone_context(zone_id: &str) -> ErrorContext {
        ErrorContext {
            zone: Some(zone_id.to_string()),
            ..Default::default()
        }
    }
}

impl From<CloudflareZone> for Zone {
    fn from(z: CloudflareZone) -> Self {
        Self {
            id: z.id,
            name: normalize_domain_name(&z.name).to_string(),
        }
    }
}

impl From<CloudflareDnsRecord> for DnsRecord {
    fn from(r: CloudflareDnsRecord) -> Self {
        Self {
            id: r.id,
            record_type: r.record_type,
            name: r.name,
            content: r.content,
            ttl: r.ttl,
            proxied: r.proxied,
        }
    }
}

#[async_trait]
impl PagesApi for CloudflareProvider {
    async fn add_project_domain(
        &self,
        account_id: &str,
        project_name: &str,
        domain_name: &str,
    ) -> Result<ApiEnvelope> {
        let path = Self::domains_path(account_id, project_name);
        let request = self
            .authorized(Method::POST, &path)
            .json(&CloudflarePagesDomainBody { name: domain_name });
        self.send_envelope(request, "POST", &path).await
    }

    async fn remove_project_domain(
        &self,
        account_id: &str,
        project_name: &str,
        domain_name: &str,
    ) -> Result<ApiEnvelope> {
        let path = format!(
            "{}/{}",
            Self::domains_path(account_id, project_name),
            encode_segment(domain_name)
        );
        let request = self.authorized(Method::DELETE, &path);
        self.send_envelope(request, "DELETE", &path).await
    }

    async fn forward(&self, request: &ForwardRequest) -> Result<ForwardResponse> {
        self.forward_raw(request).await
    }
}

#[async_trait]
impl ZoneApi for CloudflareProvider {
    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<Zone>> {
        let params = params.validated(MAX_PAGE_SIZE_ZONES);
        let path = format!("/zones?page={}&per_page={}", params.page, params.page_size);
        let (zones, total_count): (Vec<CloudflareZone>, u32) =
            self.get_paginated(&path, ErrorContext::default()).await?;

        let items = zones.into_iter().map(Zone::from).collect();
        Ok(PaginatedResponse::new(
            items,
            params.page,
            params.page_size,
            total_count,
        ))
    }

    async fn list_records(&self, zone_id: &str, query: &RecordQuery) -> Result<Vec<DnsRecord>> {
        let path = format!(
            "/zones/{}/dns_records?type={}&name={}&per_page={MAX_PAGE_SIZE_RECORDS}",
            encode_segment(zone_id),
            encode_segment(&query.record_type),
            encode_segment(&query.name),
        );
        let (records, _): (Vec<CloudflareDnsRecord>, u32) = self
            .get_paginated(&path, Self::zone_context(zone_id))
            .await?;
        Ok(records.into_iter().map(DnsRecord::from).collect())
    }

    async fn create_record(
        &self,
        zone_id: &str,
        req: &CreateDnsRecordRequest,
    ) -> Result<DnsRecord> {
        let path = format!("/zones/{}/dns_records", encode_segment(zone_id));
        let body = CloudflareCreateRecordBody {
            record_type: &req.record_type,
            name: &req.name,
            content: &req.content,
            ttl: req.ttl,
            proxied: req.proxied,
        };
        let context = ErrorContext {
            record_name: Some(req.name.clone()),
            zone: Some(zone_id.to_string()),
            ..Default::default()
        };
        let record: CloudflareDnsRecord = self.post(&path, &body, context).await?;
        Ok(record.into())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let path = format!(
            "/zones/{}/dns_records/{}",
            encode_segment(zone_id),
            encode_segment(record_id)
        );
        let context = ErrorContext {
            record_id: Some(record_id.to_string()),
            zone: Some(zone_id.to_string()),
            ..Default::default()
        };
        self.delete(&path, context).await
    }
}
