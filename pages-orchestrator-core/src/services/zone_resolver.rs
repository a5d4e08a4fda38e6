//! Zone 解析：找出拥有某个域名的最长后缀 Zone

use std::sync::Arc;

use pages_orchestrator_provider::{PaginationParams, ProviderError, ZoneApi};

use crate::services::ServiceContext;
use crate::types::Zone;

/// 列 Zone 时的单页大小（Cloudflare 上限）
pub const ZONE_PAGE_SIZE: u32 = 50;
/// 最多拉取的页数，超出部分视为不存在
pub const MAX_ZONE_PAGES: u32 = 20;

/// Zone 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneResolution {
    /// 找到拥有该域名的 Zone
    Matched(Zone),
    /// token 可见的 Zone 中没有匹配项
    NoMatch,
    /// 列 Zone 失败，无法判断
    LookupFailed { message: String },
}

/// 在 `zones` 中查找 `domain_name` 的父 Zone
///
/// 按名称长度降序扫描，第一个满足 `domain == zone` 或 `domain` 以 `"." + zone`
/// 结尾的 Zone 即为结果。比较时忽略 ASCII 大小写与末尾的点。
pub fn find_parent_zone<'a>(domain_name: &str, zones: &'a [Zone]) -> Option<&'a Zone> {
    let domain = normalize(domain_name);
    if domain.is_empty() {
        return None;
    }

    let mut candidates: Vec<(String, &Zone)> = zones
        .iter()
        .map(|z| (normalize(&z.name), z))
        .filter(|(name, _)| !name.is_empty())
        .collect();
    candidates.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

    candidates
        .into_iter()
        .find(|(name, _)| {
            domain == *name
                || domain
                    .strip_suffix(name.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
        .map(|(_, zone)| zone)
}

fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// 拉取 token 可见的全部 Zone（分页，最多 [`MAX_ZONE_PAGES`] 页）
pub(crate) async fn list_all_zones(zone_api: &dyn ZoneApi) -> Result<Vec<Zone>, ProviderError> {
    let mut zones = Vec::new();
    let mut page = 1;
    loop {
        let params = PaginationParams {
            page,
            page_size: ZONE_PAGE_SIZE,
        };
        let response = zone_api.list_zones(&params).await?;
        let empty = response.items.is_empty();
        zones.extend(response.items);

        if empty || !response.has_more {
            break;
        }
        if page >= MAX_ZONE_PAGES {
            log::warn!(
                "Zone list truncated at {} of {} zones",
                zones.len(),
                response.total_count
            );
            break;
        }
        page += 1;
    }
    Ok(zones)
}

/// 用给定的 `ZoneApi` 解析域名
pub(crate) async fn resolve_with(zone_api: &dyn ZoneApi, domain_name: &str) -> ZoneResolution {
    let zones = match list_all_zones(zone_api).await {
        Ok(zones) => zones,
        Err(e) => {
            if e.is_expected() {
                log::warn!("Zone lookup for {domain_name} failed: {e}");
            } else {
                log::error!("Zone lookup for {domain_name} failed: {e}");
            }
            return ZoneResolution::LookupFailed {
                message: e.to_string(),
            };
        }
    };

    match find_parent_zone(domain_name, &zones) {
        Some(zone) => {
            log::debug!("Domain {domain_name} belongs to zone {} ({})", zone.name, zone.id);
            ZoneResolution::Matched(zone.clone())
        }
        None => {
            log::debug!("No zone among {} owns {domain_name}", zones.len());
            ZoneResolution::NoMatch
        }
    }
}

/// Zone 解析服务
pub struct ZoneResolver {
    ctx: Arc<ServiceContext>,
}

impl ZoneResolver {
    /// 创建 Zone 解析服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 用 `zone_token` 可见的 Zone 解析 `domain_name`
    pub async fn resolve_zone(&self, domain_name: &str, zone_token: &str) -> ZoneResolution {
        let zone_api = self.ctx.provider_factory.zone_api(zone_token);
        resolve_with(zone_api.as_ref(), domain_name).await
    }
}
