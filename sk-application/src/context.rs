use crate::error::{AppError, AppResult};
use bon::Builder;
use tokio_util::sync::CancellationToken;

/// 当前操作者（Current Actor）
///
/// 一次请求内已认证调用方的只读视图，由认证上下文解析一次后放入 [`AppContext`]，不做持久化。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrentActor {
    username: String,
    user_id: Option<String>,
}

impl CurrentActor {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// 应用层上下文（Application Context）
///
/// 承载一次应用层调用（命令/查询）所需的横切信息，例如：
/// - 当前操作者（`actor`）：授权比对的依据，匿名请求为空；
/// - 关联追踪 `correlation_id`；
/// - 幂等键（`idempotency_key`）：用于在基础设施层实现请求幂等；
/// - 取消信号（`cancellation`）：处理器将其透传给所有协作者调用。
///
/// 典型用法：
/// ```rust
/// use sk_application::context::{AppContext, CurrentActor};
///
/// let ctx = AppContext::builder()
///     .actor(CurrentActor::new("User"))
///     .correlation_id("cor-123".to_string())
///     .build();
/// assert_eq!(ctx.actor_username(), Some("User"));
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    actor: Option<CurrentActor>,
    correlation_id: Option<String>,
    idempotency_key: Option<String>,
    #[builder(default)]
    cancellation: CancellationToken,
}

impl AppContext {
    /// 以指定用户名作为当前操作者的上下文
    pub fn for_actor(username: impl Into<String>) -> Self {
        Self::builder().actor(CurrentActor::new(username)).build()
    }

    pub fn actor(&self) -> Option<&CurrentActor> {
        self.actor.as_ref()
    }

    pub fn actor_username(&self) -> Option<&str> {
        self.actor.as_ref().map(CurrentActor::username)
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

/// 协作者在开始工作前调用：请求已取消则返回 `AppError::Cancelled`
pub(crate) fn ensure_active(cancel: &CancellationToken) -> AppResult<()> {
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }
    Ok(())
}
