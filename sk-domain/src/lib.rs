//! 领域层基础库（sk-domain）
//!
//! 提供应用核心共享的领域构件：
//! - 实体（`entity`）标识抽象与审计信息（`auditable`）
//! - 身份实体 `AppUser`（`user`）与文章实体 `Article`（`article`）
//! - 统一错误类型（`error`）
//!
//! 本 crate 不依赖任何存储或传输实现，仅定义领域模型与最小必要的错误类型。
//!
pub mod article;
pub mod auditable;
pub mod entity;
pub mod error;
pub mod user;

pub use article::Article;
pub use auditable::{AuditInfo, Auditable};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use user::AppUser;

// 允许在本 crate 内部通过 ::sk_domain 进行自引用，
// 以便过程宏生成的路径在本 crate 中也能解析。
extern crate self as sk_domain;
