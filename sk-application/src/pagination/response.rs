use super::{PageLinks, PaginationFilter};
use crate::error::AppResult;
use serde::Serialize;
use url::Url;

/// 分页响应信封
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    data: T,
    page_number: u32,
    page_size: u32,
    total_records: u64,
    total_pages: u64,
    first_page: Url,
    last_page: Url,
    next_page: Option<Url>,
    previous_page: Option<Url>,
}

impl<T> PagedResponse<T> {
    /// 由当前页数据、过滤条件与总数构造信封及翻页链接
    pub fn build(
        data: T,
        filter: PaginationFilter,
        total_records: u64,
        route: &str,
        links: &PageLinks,
    ) -> AppResult<Self> {
        let page_number = filter.page_number();
        let page_size = filter.page_size();
        let total_pages = total_records.div_ceil(u64::from(page_size));
        let current = u64::from(page_number);

        let next_page = if current < total_pages {
            Some(links.page_uri(route, current + 1, page_size)?)
        } else {
            None
        };
        let previous_page = if current > 1 && current <= total_pages {
            Some(links.page_uri(route, current - 1, page_size)?)
        } else {
            None
        };

        Ok(Self {
            data,
            page_number,
            page_size,
            total_records,
            total_pages,
            first_page: links.page_uri(route, 1, page_size)?,
            last_page: links.page_uri(route, total_pages.max(1), page_size)?,
            next_page,
            previous_page,
        })
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn first_page(&self) -> &Url {
        &self.first_page
    }

    pub fn last_page(&self) -> &Url {
        &self.last_page
    }

    pub fn next_page(&self) -> Option<&Url> {
        self.next_page.as_ref()
    }

    pub fn previous_page(&self) -> Option<&Url> {
        self.previous_page.as_ref()
    }
}
