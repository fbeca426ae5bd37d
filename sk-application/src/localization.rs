//! 本地化消息查找
//!
//! 以注入的 key → 显示文本 函数表示，核心不依赖任何具体的资源加载机制。
//!
use crate::error::AppResult;
use sk_domain::error::DomainError;
use std::collections::HashMap;

pub trait Localizer: Send + Sync {
    fn localize(&self, key: &str) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn localize(&self, key: &str) -> String {
        self(key)
    }
}

/// 基于扁平资源表的本地化实现；未知 key 回退为 key 本身
#[derive(Clone, Debug, Default)]
pub struct ResourceLocalizer {
    resources: HashMap<String, String>,
}

impl ResourceLocalizer {
    /// 从 `{"Key": "Text", ...}` 形式的 JSON 资源加载
    pub fn from_json(json: &str) -> AppResult<Self> {
        let resources: HashMap<String, String> =
            serde_json::from_str(json).map_err(DomainError::from)?;
        Ok(Self { resources })
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ResourceLocalizer
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            resources: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Localizer for ResourceLocalizer {
    fn localize(&self, key: &str) -> String {
        self.resources
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
