use crate::validation::Violation;
use sk_domain::error::DomainError;
use std::collections::BTreeMap;

/// 应用层错误
///
/// 前三个变体构成终止性的业务失败分类（不存在 / 无权限 / 校验失败），由边界层映射为各自的响应状态；
/// 其余变体原样向上传播，保留根因。
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Entity \"{entity}\" ({key}) was not found.")]
    NotFound { entity: &'static str, key: String },

    #[error("forbidden: {}", join_pairs(.0))]
    Forbidden(BTreeMap<String, String>),

    #[error("validation failed: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    /// 协作者（身份服务、存储等）自身的失败
    #[error("infra: {0}")]
    Infra(String),

    #[error("invalid route: {0}")]
    Route(#[from] url::ParseError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("handler already registered: query={query}")]
    AlreadyRegisteredQuery { query: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

pub type AppResult<T> = Result<T, AppError>;

/// 错误分类，供边界层选择响应状态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Validation,
    Other,
}

impl AppError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn infra(reason: impl std::fmt::Display) -> Self {
        Self::Infra(reason.to_string())
    }

    /// 携带单个字段原因的 Forbidden
    pub fn forbidden(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Forbidden(BTreeMap::from([(field.into(), message.into())]))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Other,
        }
    }

    /// 校验错误按字段分组后的消息；非校验错误返回 `None`
    pub fn violations_by_field(&self) -> Option<BTreeMap<&str, Vec<&str>>> {
        match self {
            Self::Validation(violations) => {
                let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
                for v in violations {
                    grouped.entry(v.field()).or_default().push(v.message());
                }
                Some(grouped)
            }
            _ => None,
        }
    }
}

fn join_pairs(reasons: &BTreeMap<String, String>) -> String {
    reasons
        .iter()
        .map(|(field, message)| format!("{field}={message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
