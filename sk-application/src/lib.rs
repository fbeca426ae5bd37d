//! 应用层（sk-application）
//!
//! 以命令/查询处理器模式组织用例：每个用例是一个请求值与其处理器的配对。
//! 一次命令的执行流程为：校验（`validation`）→ 基于当前操作者授权（`context`）→
//! 通过协作者抽象（`identity`、`articles::ArticleRepository`、`pagination`）执行 →
//! 归约为统一的成功/失败结果（`result`）或类型化错误（`error`）。
//!
pub mod articles;
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod identity;
pub mod inmemory_article_repository;
pub mod inmemory_command_bus;
pub mod inmemory_identity_service;
pub mod inmemory_pagination_provider;
pub mod inmemory_query_bus;
pub mod inmemory_store;
pub mod localization;
pub mod pagination;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod result;
pub mod users;
pub mod validation;

pub use context::{AppContext, CurrentActor};
pub use error::{AppError, AppResult, ErrorKind};
pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
pub use result::CommandResult;
