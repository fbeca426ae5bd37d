//! 命令校验
//!
//! 规则集是有序的“谓词 + 消息 key”列表，对命令值逐条求值并收集全部违规（不短路），
//! 以便所有问题一并返回。存在任何违规时处理器不会执行。
//!
use crate::{
    command::Command,
    command_handler::CommandHandler,
    context::AppContext,
    error::{AppError, AppResult},
    localization::Localizer,
};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// 字段级违规
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    field: String,
    message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// 校验器：只读检查候选值，返回零个或多个违规
pub trait Validator<C>: Send + Sync {
    fn validate(&self, candidate: &C) -> Vec<Violation>;
}

type Predicate<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

struct Rule<C> {
    field: &'static str,
    message_key: &'static str,
    is_valid: Predicate<C>,
}

/// 声明式规则集
pub struct RuleSet<C> {
    rules: Vec<Rule<C>>,
    localizer: Arc<dyn Localizer>,
}

impl<C: 'static> RuleSet<C> {
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        Self {
            rules: Vec::new(),
            localizer,
        }
    }

    /// 追加规则：`is_valid` 返回 false 时产生 `field` 上的违规，消息由 `message_key` 本地化
    pub fn rule<P>(mut self, field: &'static str, message_key: &'static str, is_valid: P) -> Self
    where
        P: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            field,
            message_key,
            is_valid: Box::new(is_valid),
        });
        self
    }

    /// 字段不能为空（仅含空白也视为空）
    pub fn not_empty<S>(self, field: &'static str, message_key: &'static str, select: S) -> Self
    where
        S: Fn(&C) -> &str + Send + Sync + 'static,
    {
        self.rule(field, message_key, move |c: &C| !select(c).trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<C> Validator<C> for RuleSet<C>
where
    C: Send + Sync,
{
    fn validate(&self, candidate: &C) -> Vec<Violation> {
        self.rules
            .iter()
            .filter(|rule| !(rule.is_valid)(candidate))
            .map(|rule| Violation::new(rule.field, self.localizer.localize(rule.message_key)))
            .collect()
    }
}

/// 在处理器之前执行校验的装饰器
pub struct ValidatingHandler<H, V> {
    inner: H,
    validator: V,
}

impl<H, V> ValidatingHandler<H, V> {
    pub fn new(inner: H, validator: V) -> Self {
        Self { inner, validator }
    }
}

#[async_trait]
impl<C, H, V> CommandHandler<C> for ValidatingHandler<H, V>
where
    C: Command,
    H: CommandHandler<C>,
    V: Validator<C>,
{
    async fn handle(&self, ctx: &AppContext, cmd: C) -> AppResult<C::Output> {
        let violations = self.validator.validate(&cmd);
        if !violations.is_empty() {
            tracing::warn!(
                command = C::NAME,
                violations = violations.len(),
                "command rejected by validation"
            );
            return Err(AppError::Validation(violations));
        }

        self.inner.handle(ctx, cmd).await
    }
}
