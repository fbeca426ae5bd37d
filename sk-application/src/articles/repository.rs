use crate::error::AppResult;
use async_trait::async_trait;
use sk_domain::article::Article;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// 文章仓储（外部协作者）
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn get(&self, id: &Uuid, cancel: &CancellationToken) -> AppResult<Option<Article>>;

    /// 写入（新增或覆盖）
    async fn save(&self, article: Article, cancel: &CancellationToken) -> AppResult<()>;
}
