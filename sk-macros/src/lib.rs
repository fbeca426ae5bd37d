//! 领域建模过程宏（sk-macros）
//!
//! - `#[entity]`：为具名字段结构体追加标识字段并实现 `::sk_domain::entity::Entity`；
//!   可选 `auditable = true` 追加审计字段并实现 `::sk_domain::auditable::Auditable`。
//!
use proc_macro::TokenStream;

mod derive_utils;
mod entity;
mod field_utils;

/// 实体宏
///
/// - 追加字段：`id: IdType`（若缺失，置于字段最前）
/// - 自动派生 `Default`、`Serialize`、`Deserialize`（以及可关闭的 `Debug`）
/// - 支持参数：`#[entity(id = IdType, debug = true|false, auditable = true|false)]`
///   - `id` 默认 `String`
///   - `auditable = true` 时在末尾追加 `audit: AuditInfo` 字段
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}
