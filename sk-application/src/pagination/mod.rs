//! 分页
//!
//! - `PageRequest`：请求携带的原始页码/页大小（可能越界）；
//! - `PaginationFilter`：规范化后的过滤条件（页码 ≥ 1，1 ≤ 页大小 ≤ 上限）；
//! - `PagedResponse<T>`：数据页与分页元数据、翻页链接；
//! - `PaginationProvider<T>`：按条目类型参数化的分页能力，每种后端存储实现一次。
//!
mod filter;
mod links;
mod provider;
mod response;

pub use filter::{PageRequest, PaginationConfig, PaginationFilter};
pub use links::PageLinks;
pub use provider::PaginationProvider;
pub use response::PagedResponse;
