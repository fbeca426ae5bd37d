//! 文章实体（Article）
//!
use crate::auditable::{AuditInfo, Auditable};
use crate::error::DomainResult;
use chrono::{DateTime, Utc};
use sk_macros::entity;
use uuid::Uuid;

#[entity(id = Uuid, auditable = true)]
#[derive(Clone, PartialEq)]
pub struct Article {
    title: String,
    #[serde(rename = "abstract")]
    summary: String,
    content: String,
}

impl Article {
    pub const ENTITY_NAME: &'static str = "Article";

    /// 创建一篇新文章，并记录创建者
    pub fn create(
        id: Uuid,
        title: impl Into<String>,
        summary: impl Into<String>,
        content: impl Into<String>,
        created_by: &str,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            summary: summary.into(),
            content: content.into(),
            audit: AuditInfo::new(created_by, at),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// 作者：即创建者
    pub fn author(&self) -> &str {
        self.audit.created_by()
    }

    /// 修改标题、摘要与正文，并记录修改者
    ///
    /// 审计时间校验失败时不修改任何字段。
    pub fn edit(
        &mut self,
        title: impl Into<String>,
        summary: impl Into<String>,
        content: impl Into<String>,
        modified_by: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.mark_modified(modified_by, at)?;
        self.title = title.into();
        self.summary = summary.into();
        self.content = content.into();
        Ok(())
    }
}
