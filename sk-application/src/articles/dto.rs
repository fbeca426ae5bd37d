use crate::dto::Dto;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sk_domain::{article::Article, auditable::Auditable, entity::Entity};
use uuid::Uuid;

/// 文章列表条目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDto {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub content: String,
    pub author: String,
    pub created: DateTime<Utc>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Dto for ArticleDto {}

impl From<&Article> for ArticleDto {
    fn from(article: &Article) -> Self {
        Self {
            id: *article.id(),
            title: article.title().to_string(),
            summary: article.summary().to_string(),
            content: article.content().to_string(),
            author: article.author().to_string(),
            created: article.audit().created(),
            last_modified: article.audit().last_modified(),
        }
    }
}
