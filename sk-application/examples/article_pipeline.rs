use chrono::Utc;
use sk_application::articles::{
    ArticleDto, EditArticle, EditArticleHandler, ListArticles, ListArticlesHandler,
    edit_article_rules,
};
use sk_application::command_bus::CommandBus;
use sk_application::config::ApplicationConfig;
use sk_application::error::AppError;
use sk_application::inmemory_article_repository::InMemoryArticleRepository;
use sk_application::inmemory_identity_service::InMemoryIdentityService;
use sk_application::inmemory_pagination_provider::InMemoryPaginationProvider;
use sk_application::localization::ResourceLocalizer;
use sk_application::pagination::PageRequest;
use sk_application::query_bus::QueryBus;
use sk_application::users::{DeleteUser, DeleteUserHandler};
use sk_application::validation::ValidatingHandler;
use sk_application::{AppContext, InMemoryCommandBus, InMemoryQueryBus};
use sk_domain::article::Article;
use sk_domain::user::AppUser;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug 可查看处理器日志
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ApplicationConfig::from_json(r#"{"baseUri": "https://example.com/"}"#)?;
    let localizer = Arc::new(ResourceLocalizer::from_json(
        r#"{"ArticleValidatorTitleEmpty": "Title must not be empty."}"#,
    )?);

    let identity = Arc::new(InMemoryIdentityService::with_users([
        AppUser::registered("u-1", "User"),
        AppUser::registered("u-2", "OtherUser"),
    ]));

    let articles = InMemoryArticleRepository::new();
    let id = Uuid::new_v4();
    articles.store().upsert(Article::create(
        id,
        "Hello",
        "First post",
        "Lorem ipsum",
        "User",
        Utc::now(),
    ));

    let commands = InMemoryCommandBus::new();
    commands.register::<DeleteUser, _>(Arc::new(DeleteUserHandler::new(identity.clone())))?;
    commands.register::<EditArticle, _>(Arc::new(ValidatingHandler::new(
        EditArticleHandler::new(Arc::new(articles.clone())),
        edit_article_rules(localizer),
    )))?;

    let queries = InMemoryQueryBus::new();
    let provider = InMemoryPaginationProvider::<Article, ArticleDto>::new(
        articles.store(),
        config.pagination,
        config.page_links(),
    );
    queries.register::<ListArticles, _>(Arc::new(ListArticlesHandler::new(Arc::new(provider))))?;

    let ctx = AppContext::for_actor("User");

    // 校验失败 -> 处理器不执行
    if let Err(AppError::Validation(violations)) = commands
        .dispatch(
            &ctx,
            EditArticle {
                id,
                title: String::new(),
                summary: "First post".into(),
                content: "Lorem ipsum".into(),
            },
        )
        .await
    {
        for v in violations {
            eprintln!("rejected: {v}");
        }
    }

    let page = queries
        .dispatch(
            &ctx,
            ListArticles {
                filter: PageRequest::new(1, 10),
                path: "/api/articles".into(),
            },
        )
        .await?;
    println!("{}", serde_json::to_string_pretty(&page)?);

    // 删除他人账户 -> Forbidden
    if let Err(err) = commands.dispatch(&ctx, DeleteUser::new("OtherUser")).await {
        eprintln!("{err}");
    }

    let result = commands.dispatch(&ctx, DeleteUser::new("User")).await?;
    println!("deleted self: {}", result.succeeded());

    Ok(())
}
