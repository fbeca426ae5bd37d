use super::ArticleRepository;
use crate::{
    command::Command,
    command_handler::CommandHandler,
    context::AppContext,
    error::{AppError, AppResult},
    localization::Localizer,
    result::CommandResult,
    validation::RuleSet,
};
use async_trait::async_trait;
use chrono::Utc;
use sk_domain::article::Article;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const NOT_AUTHORIZED_EDIT: &str = "Not authorized to edit this article.";

/// 编辑文章
#[derive(Debug, Clone)]
pub struct EditArticle {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub content: String,
}

impl Command for EditArticle {
    const NAME: &'static str = "articles.edit";
    type Output = CommandResult;
}

/// 编辑文章的校验规则：标题、摘要与正文均不能为空
pub fn edit_article_rules(localizer: Arc<dyn Localizer>) -> RuleSet<EditArticle> {
    RuleSet::new(localizer)
        .not_empty("Title", "ArticleValidatorTitleEmpty", |a: &EditArticle| {
            a.title.as_str()
        })
        .not_empty("Abstract", "ArticleValidatorAbstractEmpty", |a: &EditArticle| {
            a.summary.as_str()
        })
        .not_empty("Content", "ArticleValidatorContentEmpty", |a: &EditArticle| {
            a.content.as_str()
        })
}

/// 只有作者本人可以编辑文章
pub struct EditArticleHandler {
    articles: Arc<dyn ArticleRepository>,
}

impl EditArticleHandler {
    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }
}

#[async_trait]
impl CommandHandler<EditArticle> for EditArticleHandler {
    async fn handle(&self, ctx: &AppContext, cmd: EditArticle) -> AppResult<CommandResult> {
        let cancel = ctx.cancellation();

        let Some(mut article) = self.articles.get(&cmd.id, cancel).await? else {
            warn!(article_id = %cmd.id, "article not found");
            return Err(AppError::not_found(Article::ENTITY_NAME, cmd.id.to_string()));
        };

        let actor = match ctx.actor_username() {
            Some(actor) if actor == article.author() => actor,
            other => {
                warn!(
                    article_id = %cmd.id,
                    author = article.author(),
                    actor = ?other,
                    "article edit rejected"
                );
                return Err(AppError::forbidden("Article", NOT_AUTHORIZED_EDIT));
            }
        };

        article.edit(cmd.title, cmd.summary, cmd.content, actor, Utc::now())?;
        self.articles.save(article, cancel).await?;

        debug!(article_id = %cmd.id, "article edited");
        Ok(CommandResult::success())
    }
}
