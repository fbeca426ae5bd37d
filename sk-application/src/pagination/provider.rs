use super::{PageRequest, PagedResponse};
use crate::error::AppResult;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// 分页数据提供方
///
/// 约定：
/// - 以自身的分页策略校正原始请求（页码、页大小），越界值不报错；
/// - 返回的条目数不超过校正后的页大小；
/// - 页码超出范围时返回空页而非错误；
/// - `route` 原样用于构造翻页链接；
/// - 须响应 `cancel` 取消信号。
#[async_trait]
pub trait PaginationProvider<T>: Send + Sync
where
    T: Send,
{
    async fn get_paged_data(
        &self,
        request: PageRequest,
        route: &str,
        cancel: &CancellationToken,
    ) -> AppResult<PagedResponse<Vec<T>>>;
}
