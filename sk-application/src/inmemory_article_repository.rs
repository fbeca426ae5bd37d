use crate::{
    articles::ArticleRepository,
    context::ensure_active,
    error::AppResult,
    inmemory_store::InMemoryStore,
};
use async_trait::async_trait;
use sk_domain::article::Article;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// 基于内存的文章仓储
#[derive(Clone, Default)]
pub struct InMemoryArticleRepository {
    store: InMemoryStore<Article>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 底层存储（可与分页提供方共享）
    pub fn store(&self) -> InMemoryStore<Article> {
        self.store.clone()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn get(&self, id: &Uuid, cancel: &CancellationToken) -> AppResult<Option<Article>> {
        ensure_active(cancel)?;
        Ok(self.store.get(id))
    }

    async fn save(&self, article: Article, cancel: &CancellationToken) -> AppResult<()> {
        ensure_active(cancel)?;
        self.store.upsert(article);
        Ok(())
    }
}
