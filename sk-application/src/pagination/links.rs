use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use url::Url;

/// 翻页链接构造器：`{base}{route}?pageNumber=N&pageSize=M`
///
/// 基础地址的路径前缀（如 `https://host/v1/`）始终保留，路由以 `/` 开头亦然。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Url", into = "Url")]
pub struct PageLinks {
    base: Url,
}

impl From<Url> for PageLinks {
    fn from(base: Url) -> Self {
        Self::new(base)
    }
}

impl From<PageLinks> for Url {
    fn from(links: PageLinks) -> Self {
        links.base
    }
}

impl PageLinks {
    pub fn new(mut base: Url) -> Self {
        // 末尾无 `/` 时 join 会丢掉最后一段路径
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base }
    }

    pub fn parse(base: &str) -> AppResult<Self> {
        Ok(Self::new(Url::parse(base)?))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// 构造指定页的链接；路由中原有的查询串会被替换
    pub fn page_uri(&self, route: &str, page_number: u64, page_size: u32) -> AppResult<Url> {
        let mut uri = self.base.join(route.trim_start_matches('/'))?;
        uri.query_pairs_mut()
            .clear()
            .append_pair("pageNumber", &page_number.to_string())
            .append_pair("pageSize", &page_size.to_string());
        Ok(uri)
    }
}
