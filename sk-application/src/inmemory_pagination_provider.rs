use crate::{
    context::ensure_active,
    error::AppResult,
    inmemory_store::InMemoryStore,
    pagination::{PageLinks, PageRequest, PagedResponse, PaginationConfig, PaginationFilter, PaginationProvider},
};
use async_trait::async_trait;
use sk_domain::entity::Entity;
use std::hash::Hash;
use std::marker::PhantomData;
use tokio_util::sync::CancellationToken;

/// 基于内存存储的分页提供方
///
/// - `E`：存储中的实体类型
/// - `D`：投影后的条目类型（通过 `From<&E>` 映射）
///
/// 每次请求都以自身的 [`PaginationConfig`] 校正原始分页参数。
pub struct InMemoryPaginationProvider<E: Entity, D> {
    store: InMemoryStore<E>,
    config: PaginationConfig,
    links: PageLinks,
    _marker: PhantomData<fn() -> D>,
}

impl<E: Entity, D> InMemoryPaginationProvider<E, D> {
    pub fn new(store: InMemoryStore<E>, config: PaginationConfig, links: PageLinks) -> Self {
        Self {
            store,
            config,
            links,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<E, D> PaginationProvider<D> for InMemoryPaginationProvider<E, D>
where
    E: Entity + Clone + 'static,
    E::Id: Eq + Hash + Ord + Send + Sync + 'static,
    D: for<'a> From<&'a E> + Send + 'static,
{
    async fn get_paged_data(
        &self,
        request: PageRequest,
        route: &str,
        cancel: &CancellationToken,
    ) -> AppResult<PagedResponse<Vec<D>>> {
        ensure_active(cancel)?;

        let filter =
            PaginationFilter::with_config(request.page_number, request.page_size, &self.config);
        let items = self.store.snapshot();
        let total_records = items.len() as u64;

        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        let data: Vec<D> = items
            .iter()
            .skip(offset)
            .take(filter.page_size() as usize)
            .map(D::from)
            .collect();

        tracing::debug!(
            route,
            page_number = filter.page_number(),
            page_size = filter.page_size(),
            total_records,
            returned = data.len(),
            "paged data read"
        );

        PagedResponse::build(data, filter, total_records, route, &self.links)
    }
}
