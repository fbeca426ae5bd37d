use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 统一的命令执行结果
///
/// 调用方必须先检查 [`succeeded`](Self::succeeded) 再信任伴随数据；失败时携带 字段 → 消息 映射。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    succeeded: bool,
    errors: BTreeMap<String, String>,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            errors: BTreeMap::new(),
        }
    }

    pub fn failure<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            succeeded: false,
            errors: errors
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_errors() {
        let r = CommandResult::success();
        assert!(r.succeeded());
        assert!(r.errors().is_empty());
    }

    #[test]
    fn failure_keeps_field_messages() {
        let r = CommandResult::failure([("Password", "too weak")]);
        assert!(!r.succeeded());
        assert_eq!(r.errors()["Password"], "too weak");
    }

    #[test]
    fn serializes_flag_and_errors() {
        let json = serde_json::to_value(CommandResult::failure([("Email", "taken")])).unwrap();
        assert_eq!(json["succeeded"], false);
        assert_eq!(json["errors"]["Email"], "taken");
    }
}
