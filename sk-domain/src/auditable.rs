//! 审计信息（Auditable）
//!
//! 所有持久化实体都携带创建者、创建时间、最后修改者与最后修改时间。
//! `last_modified` 在首次修改前为空；一旦设置只能向前推进。
//!
use crate::error::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 实体审计字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditInfo {
    created_by: String,
    created: DateTime<Utc>,
    last_modified_by: Option<String>,
    last_modified: Option<DateTime<Utc>>,
}

impl AuditInfo {
    /// 记录创建信息（尚未被修改）
    pub fn new(created_by: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            created_by: created_by.into(),
            created,
            last_modified_by: None,
            last_modified: None,
        }
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_modified_by(&self) -> Option<&str> {
        self.last_modified_by.as_deref()
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// 记录一次修改
    ///
    /// 修改时间不得早于创建时间或上一次修改时间，否则返回 `InvalidState` 且不改变状态。
    pub fn record_modification(
        &mut self,
        modified_by: impl Into<String>,
        at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let floor = self.last_modified.unwrap_or(self.created);
        if at < floor {
            return Err(DomainError::InvalidState {
                reason: format!("modification time {at} precedes {floor}"),
            });
        }

        self.last_modified_by = Some(modified_by.into());
        self.last_modified = Some(at);
        Ok(())
    }
}

/// 具备审计信息的实体
pub trait Auditable {
    fn audit(&self) -> &AuditInfo;

    fn audit_mut(&mut self) -> &mut AuditInfo;

    /// 以新的创建信息覆盖审计字段
    fn mark_created(&mut self, created_by: &str, at: DateTime<Utc>) {
        *self.audit_mut() = AuditInfo::new(created_by, at);
    }

    fn mark_modified(&mut self, modified_by: &str, at: DateTime<Utc>) -> DomainResult<()> {
        self.audit_mut().record_modification(modified_by, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn last_modified_is_empty_until_first_modification() {
        let now = Utc::now();
        let audit = AuditInfo::new("alice", now);
        assert_eq!(audit.created_by(), "alice");
        assert_eq!(audit.created(), now);
        assert!(audit.last_modified().is_none());
        assert!(audit.last_modified_by().is_none());
    }

    #[test]
    fn modification_moves_forward() {
        let now = Utc::now();
        let mut audit = AuditInfo::new("alice", now);

        audit
            .record_modification("bob", now + Duration::seconds(1))
            .unwrap();
        assert_eq!(audit.last_modified_by(), Some("bob"));
        assert_eq!(audit.last_modified(), Some(now + Duration::seconds(1)));

        // 相同时间允许（不倒退）
        audit
            .record_modification("carol", now + Duration::seconds(1))
            .unwrap();
        assert_eq!(audit.last_modified_by(), Some("carol"));
    }

    #[test]
    fn modification_in_the_past_is_rejected() {
        let now = Utc::now();
        let mut audit = AuditInfo::new("alice", now);
        audit
            .record_modification("bob", now + Duration::seconds(10))
            .unwrap();

        let err = audit
            .record_modification("eve", now + Duration::seconds(5))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
        assert_eq!(audit.last_modified_by(), Some("bob"));
        assert_eq!(audit.last_modified(), Some(now + Duration::seconds(10)));
    }

    #[test]
    fn modification_before_creation_is_rejected() {
        let now = Utc::now();
        let mut audit = AuditInfo::new("alice", now);
        assert!(
            audit
                .record_modification("bob", now - Duration::seconds(1))
                .is_err()
        );
        assert!(audit.last_modified().is_none());
    }
}
