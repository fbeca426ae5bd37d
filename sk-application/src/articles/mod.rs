//! 文章用例：编辑（命令）与分页列表（查询）
//!
mod dto;
mod edit_article;
mod list_articles;
mod repository;

pub use dto::ArticleDto;
pub use edit_article::{EditArticle, EditArticleHandler, edit_article_rules};
pub use list_articles::{ListArticles, ListArticlesHandler};
pub use repository::ArticleRepository;
