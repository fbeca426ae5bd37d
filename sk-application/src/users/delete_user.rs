use crate::{
    command::Command,
    command_handler::CommandHandler,
    context::AppContext,
    error::{AppError, AppResult},
    identity::IdentityService,
    result::CommandResult,
};
use async_trait::async_trait;
use sk_domain::user::AppUser;
use std::sync::Arc;
use tracing::{debug, warn};

pub const NOT_AUTHORIZED_USERNAME: &str = "Not authorized username.";

/// 删除用户账户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteUser {
    pub username: String,
}

impl DeleteUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl Command for DeleteUser {
    const NAME: &'static str = "users.delete";
    type Output = CommandResult;
}

/// 删除用户：用户只能删除自己
///
/// 步骤顺序固定：存在性检查 → 授权检查 → 删除。删除结果原样返回，不做二次解释。
pub struct DeleteUserHandler {
    identity: Arc<dyn IdentityService>,
}

impl DeleteUserHandler {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl CommandHandler<DeleteUser> for DeleteUserHandler {
    async fn handle(&self, ctx: &AppContext, cmd: DeleteUser) -> AppResult<CommandResult> {
        let cancel = ctx.cancellation();

        let Some(user) = self
            .identity
            .get_user_by_username(&cmd.username, cancel)
            .await?
        else {
            warn!(username = %cmd.username, "user not found");
            return Err(AppError::not_found(AppUser::ENTITY_NAME, cmd.username));
        };

        if ctx.actor_username() != Some(user.username()) {
            warn!(
                username = user.username(),
                actor = ?ctx.actor_username(),
                "user deletion rejected"
            );
            return Err(AppError::forbidden("Username", NOT_AUTHORIZED_USERNAME));
        }

        let result = self.identity.delete_user(user.username(), cancel).await?;
        debug!(
            username = user.username(),
            succeeded = result.succeeded(),
            "user deletion finished"
        );
        Ok(result)
    }
}
