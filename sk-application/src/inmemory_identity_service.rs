use crate::{
    context::ensure_active,
    error::{AppError, AppResult},
    identity::IdentityService,
    result::CommandResult,
};
use async_trait::async_trait;
use dashmap::DashMap;
use sk_domain::user::AppUser;
use tokio_util::sync::CancellationToken;

/// 基于内存的身份服务
///
/// - 以用户名为键保存用户；
/// - 删除为原子移除：并发删除同一用户时，仅一个调用成功，其余得到 `NotFound`。
#[derive(Default)]
pub struct InMemoryIdentityService {
    users: DashMap<String, AppUser>,
}

impl InMemoryIdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = AppUser>) -> Self {
        let service = Self::new();
        for user in users {
            service.insert(user);
        }
        service
    }

    /// 注册（或覆盖）用户
    pub fn insert(&self, user: AppUser) {
        self.users.insert(user.username().to_string(), user);
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityService for InMemoryIdentityService {
    async fn get_user_by_username(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<AppUser>> {
        ensure_active(cancel)?;
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }

    async fn delete_user(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> AppResult<CommandResult> {
        ensure_active(cancel)?;
        match self.users.remove(username) {
            Some(_) => Ok(CommandResult::success()),
            None => Err(AppError::not_found(AppUser::ENTITY_NAME, username)),
        }
    }
}
