//! 子域名生成
//!
//! label = `R(2) + MM + R(2) + DD + R(2)`，`R(n)` 为 n 个随机小写字母，
//! 日期数字固定在第 2-3 位和第 6-7 位。

use std::sync::Arc;

use rand::Rng;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{GeneratedName, PathSlot};

/// 结果第一行的标签
pub const SUBDOMAIN_LABEL: &str = "Subdomain";

const LABEL_LEN: usize = 10;

/// 解析 `MM.DD`，返回补零后的 (月, 日)
fn parse_date(date: &str) -> CoreResult<(String, String)> {
    let invalid = || CoreError::ValidationError(format!("date must be MM.DD, got '{date}'"));

    let parts: Vec<&str> = date.trim().split('.').collect();
    let [month, day] = parts[..] else {
        return Err(invalid());
    };

    let valid_part = |p: &str| (1..=2).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit());
    if !valid_part(month) || !valid_part(day) {
        return Err(invalid());
    }

    Ok((format!("{month:0>2}"), format!("{day:0>2}")))
}

fn random_letters<R: Rng>(rng: &mut R, n: usize, out: &mut String) {
    for _ in 0..n {
        out.push(char::from(rng.random_range(b'a'..=b'z')));
    }
}

/// 用给定的随机源生成子域名与 URL 列表
///
/// 返回 `paths.len() + 1` 行：第一行为子域名本身，之后每个路径槽位一行，顺序不变。
pub fn generate_with_rng<R: Rng>(
    rng: &mut R,
    date: &str,
    parent_domain: &str,
    paths: &[PathSlot],
) -> CoreResult<Vec<GeneratedName>> {
    let (month, day) = parse_date(date)?;

    let parent = parent_domain.trim().trim_end_matches('.');
    if parent.is_empty() {
        return Err(CoreError::ValidationError(
            "parent domain is required".to_string(),
        ));
    }

    let mut label = String::with_capacity(LABEL_LEN);
    random_letters(rng, 2, &mut label);
    label.push_str(&month);
    random_letters(rng, 2, &mut label);
    label.push_str(&day);
    random_letters(rng, 2, &mut label);

    let full_name = format!("{label}.{parent}");

    let mut names = Vec::with_capacity(paths.len() + 1);
    names.push(GeneratedName::new(SUBDOMAIN_LABEL, full_name.clone()));
    names.extend(paths.iter().map(|slot| {
        GeneratedName::new(
            format!("URL ({})", slot.label),
            format!("https://{full_name}/{}", slot.path()),
        )
    }));
    Ok(names)
}

/// 生成子域名与 URL 列表（每次结果不同）
pub fn generate_names(
    date: &str,
    parent_domain: &str,
    paths: &[PathSlot],
) -> CoreResult<Vec<GeneratedName>> {
    generate_with_rng(&mut rand::rng(), date, parent_domain, paths)
}

/// 从生成的 label（或完整子域名）中还原 `MM.DD`
pub fn decode_date(label: &str) -> Option<String> {
    let label = label.trim().split('.').next()?;
    let bytes = label.as_bytes();
    if bytes.len() != LABEL_LEN {
        return None;
    }

    let letters_ok = [0, 1, 4, 5, 8, 9]
        .iter()
        .all(|&i| bytes[i].is_ascii_lowercase());
    let digits_ok = [2, 3, 6, 7].iter().all(|&i| bytes[i].is_ascii_digit());
    if !letters_ok || !digits_ok {
        return None;
    }

    Some(format!("{}.{}", &label[2..4], &label[6..8]))
}

/// 子域名生成服务
///
/// 请求中缺失的父域名或路径槽位从已保存的配置中补齐。
pub struct NameGeneratorService {
    ctx: Arc<ServiceContext>,
}

impl NameGeneratorService {
    /// 创建生成服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn generate(
        &self,
        date: &str,
        parent_domain: Option<String>,
        paths: Option<Vec<PathSlot>>,
    ) -> CoreResult<Vec<GeneratedName>> {
        // 先校验日期，避免无谓地读取配置
        parse_date(date)?;

        // 空白父域名按未填写处理
        let parent_domain = parent_domain.filter(|p| !p.trim().is_empty());
        let (parent_domain, paths) = match (parent_domain, paths) {
            (Some(parent), Some(paths)) => (parent, paths),
            (parent, paths) => {
                let config = self
                    .ctx
                    .config_repository
                    .load()
                    .await?
                    .unwrap_or_default();
                (
                    parent.unwrap_or(config.parent_domain),
                    paths.unwrap_or(config.paths),
                )
            }
        };

        generate_names(date, &parent_domain, &paths)
    }
}
