//! 身份用户（AppUser）
//!
//! 由外部身份服务管理；`username` 既是查找键，也是授权比对依据。
//!
use sk_macros::entity;

#[entity]
#[derive(Clone, PartialEq, Eq)]
pub struct AppUser {
    username: String,
    email: Option<String>,
}

impl AppUser {
    /// 错误信息中引用的实体名
    pub const ENTITY_NAME: &'static str = "AppUser";

    pub fn registered(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
