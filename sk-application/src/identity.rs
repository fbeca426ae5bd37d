use crate::{error::AppResult, result::CommandResult};
use async_trait::async_trait;
use sk_domain::user::AppUser;
use tokio_util::sync::CancellationToken;

/// 身份服务（外部协作者）
///
/// 命令处理器通过它按用户名查找并删除账户；并发删除同一账户时，
/// 实现需保证后到者观察到“不存在”，而不是半删除状态下的其它错误。
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn get_user_by_username(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<AppUser>>;

    async fn delete_user(&self, username: &str, cancel: &CancellationToken)
    -> AppResult<CommandResult>;
}
