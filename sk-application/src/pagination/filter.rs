use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// 分页策略配置
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationConfig {
    /// 页大小缺失或非正时使用的默认值
    pub default_page_size: u32,
    /// 页大小上限
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    fn max(&self) -> u32 {
        self.max_page_size.max(1)
    }

    fn default_size(&self) -> u32 {
        self.default_page_size.clamp(1, self.max())
    }
}

/// 请求中的原始分页参数，未经校正
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: i64::from(DEFAULT_PAGE_SIZE),
        }
    }
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number,
            page_size,
        }
    }
}

/// 规范化的分页过滤条件
///
/// 越界值不会报错：页码 < 1 取 1；页大小 < 1 取默认值；超过上限取上限。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationFilter {
    page_number: u32,
    page_size: u32,
}

impl Default for PaginationFilter {
    fn default() -> Self {
        Self::with_config(1, i64::from(DEFAULT_PAGE_SIZE), &PaginationConfig::default())
    }
}

impl PaginationFilter {
    /// 按默认策略校正
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self::with_config(page_number, page_size, &PaginationConfig::default())
    }

    pub fn with_config(page_number: i64, page_size: i64, config: &PaginationConfig) -> Self {
        let page_number = u32::try_from(page_number.max(1)).unwrap_or(u32::MAX);
        let page_size = if page_size < 1 {
            config.default_size()
        } else {
            u32::try_from(page_size)
                .unwrap_or(u32::MAX)
                .min(config.max())
        };

        Self {
            page_number,
            page_size,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 当前页之前需要跳过的条目数
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }
}

impl From<PageRequest> for PaginationFilter {
    fn from(request: PageRequest) -> Self {
        Self::new(request.page_number, request.page_size)
    }
}
