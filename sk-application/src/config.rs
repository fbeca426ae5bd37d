//! 应用配置
//!
//! ```json
//! {
//!   "baseUri": "https://example.com/",
//!   "pagination": { "defaultPageSize": 10, "maxPageSize": 100 }
//! }
//! ```
//!
use crate::{
    error::AppResult,
    pagination::{PageLinks, PaginationConfig},
};
use serde::{Deserialize, Serialize};
use sk_domain::error::DomainError;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationConfig {
    /// 翻页链接的基础地址；路径前缀（如 `/v1/`）会保留在生成的链接中
    pub base_uri: Url,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl ApplicationConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json).map_err(DomainError::from)?)
    }

    pub fn page_links(&self) -> PageLinks {
        PageLinks::new(self.base_uri.clone())
    }
}
