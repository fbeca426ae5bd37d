use super::ArticleDto;
use crate::{
    context::AppContext,
    error::AppResult,
    pagination::{PageRequest, PagedResponse, PaginationProvider},
    query::Query,
    query_handler::QueryHandler,
};
use async_trait::async_trait;
use std::sync::Arc;

/// 分页列出文章
///
/// `filter` 与 `path` 均原样透传给分页提供方：页码/页大小由提供方按自身配置校正，
/// `path` 用于构造翻页链接。
#[derive(Debug, Clone)]
pub struct ListArticles {
    pub filter: PageRequest,
    pub path: String,
}

impl Query for ListArticles {
    const NAME: &'static str = "articles.list";
    type Dto = PagedResponse<Vec<ArticleDto>>;
}

pub struct ListArticlesHandler {
    pagination: Arc<dyn PaginationProvider<ArticleDto>>,
}

impl ListArticlesHandler {
    pub fn new(pagination: Arc<dyn PaginationProvider<ArticleDto>>) -> Self {
        Self { pagination }
    }
}

#[async_trait]
impl QueryHandler<ListArticles> for ListArticlesHandler {
    async fn handle(
        &self,
        ctx: &AppContext,
        q: ListArticles,
    ) -> AppResult<PagedResponse<Vec<ArticleDto>>> {
        self.pagination
            .get_paged_data(q.filter, &q.path, ctx.cancellation())
            .await
    }
}
