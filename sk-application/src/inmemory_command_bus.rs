use crate::{
    command::Command,
    command_bus::CommandBus,
    command_handler::CommandHandler,
    context::AppContext,
    error::{AppError, AppResult},
};
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use std::any::{Any, TypeId, type_name_of_val};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::Instrument;

type BoxAnySend = Box<dyn Any + Send>;

type CmdHandlerFuture<'a> = Pin<Box<dyn Future<Output = AppResult<BoxAnySend>> + Send + 'a>>;

type CmdHandlerFn =
    Arc<dyn for<'a> Fn(BoxAnySend, &'a AppContext) -> CmdHandlerFuture<'a> + Send + Sync>;

/// 基于内存的 CommandBus 实现
/// - 通过 TypeId 注册不同 Command 对应的 Handler（每种命令仅允许一个处理器）
/// - 运行时以类型擦除（Any）方式进行调度，并在调用端还原 `C::Output`
pub struct InMemoryCommandBus {
    handlers: DashMap<TypeId, (&'static str, CmdHandlerFn)>,
}

impl Default for InMemoryCommandBus {
    fn default() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }
}

impl InMemoryCommandBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令处理器；重复注册同一命令返回错误
    pub fn register<C, H>(&self, handler: Arc<H>) -> AppResult<()>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let f: CmdHandlerFn = Arc::new(move |boxed_cmd, ctx| {
            let handler = handler.clone();

            Box::pin(async move {
                // 键与闭包同一泛型 C，正常情况下 downcast 不会失败
                match boxed_cmd.downcast::<C>() {
                    Ok(cmd) => {
                        let out = handler.handle(ctx, *cmd).await?;
                        Ok(Box::new(out) as BoxAnySend)
                    }
                    Err(e) => Err(AppError::TypeMismatch {
                        expected: C::NAME,
                        found: type_name_of_val(&e),
                    }),
                }
            })
        });

        match self.handlers.entry(TypeId::of::<C>()) {
            Entry::Occupied(_) => Err(AppError::AlreadyRegisteredCommand { command: C::NAME }),
            Entry::Vacant(slot) => {
                slot.insert((C::NAME, f));
                Ok(())
            }
        }
    }

    /// 获取已注册的命令名列表（只读视图）
    pub fn registered_commands(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|e| e.value().0).collect()
    }
}

#[async_trait]
impl CommandBus for InMemoryCommandBus {
    async fn dispatch<C>(&self, ctx: &AppContext, cmd: C) -> AppResult<C::Output>
    where
        C: Command,
    {
        let Some(f) = self
            .handlers
            .get(&TypeId::of::<C>())
            .map(|h| h.value().1.clone())
        else {
            return Err(AppError::HandlerNotFound(C::NAME));
        };

        let span = tracing::info_span!(
            "command",
            name = C::NAME,
            correlation_id = ctx.correlation_id()
        );

        async move {
            let out = (f)(Box::new(cmd), ctx).await?;
            match out.downcast::<C::Output>() {
                Ok(output) => Ok(*output),
                Err(e) => Err(AppError::TypeMismatch {
                    expected: std::any::type_name::<C::Output>(),
                    found: type_name_of_val(&e),
                }),
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CommandResult;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::task::JoinSet;

    #[derive(Debug)]
    struct Touch;

    impl Command for Touch {
        const NAME: &'static str = "test.touch";
        type Output = CommandResult;
    }

    struct TouchHandler {
        counter: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CommandHandler<Touch> for TouchHandler {
        async fn handle(&self, _ctx: &AppContext, _cmd: Touch) -> AppResult<CommandResult> {
            self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(CommandResult::success())
        }
    }

    #[derive(Debug)]
    struct Reject;

    impl Command for Reject {
        const NAME: &'static str = "test.reject";
        type Output = ();
    }

    struct RejectHandler;

    #[async_trait]
    impl CommandHandler<Reject> for RejectHandler {
        async fn handle(&self, _ctx: &AppContext, _cmd: Reject) -> AppResult<()> {
            Err(AppError::forbidden("Username", "nope"))
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn register_and_dispatch_works() {
        let bus = InMemoryCommandBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.register::<Touch, _>(Arc::new(TouchHandler {
            counter: counter.clone(),
        }))
        .unwrap();

        let result = bus.dispatch(&AppContext::default(), Touch).await.unwrap();
        assert!(result.succeeded());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(bus.registered_commands(), vec!["test.touch"]);
    }

    #[tokio::test]
    async fn handler_errors_propagate_unchanged() {
        let bus = InMemoryCommandBus::new();
        bus.register::<Reject, _>(Arc::new(RejectHandler)).unwrap();

        let err = bus.dispatch(&AppContext::default(), Reject).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn not_found_error_when_unregistered() {
        let bus = InMemoryCommandBus::new();
        let err = bus.dispatch(&AppContext::default(), Touch).await.unwrap_err();
        match err {
            AppError::HandlerNotFound(name) => assert_eq!(name, "test.touch"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let bus = InMemoryCommandBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.register::<Touch, _>(Arc::new(TouchHandler {
            counter: counter.clone(),
        }))
        .unwrap();
        let err = bus
            .register::<Touch, _>(Arc::new(TouchHandler { counter }))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::AlreadyRegisteredCommand {
                command: "test.touch"
            }
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_dispatch_is_safe() {
        let bus = Arc::new(InMemoryCommandBus::new());
        let counter = Arc::new(AtomicUsize::new(0));
        bus.register::<Touch, _>(Arc::new(TouchHandler {
            counter: counter.clone(),
        }))
        .unwrap();

        let mut set = JoinSet::new();
        for _ in 0..100 {
            let bus = bus.clone();
            set.spawn(async move {
                let ctx = AppContext::default();
                bus.dispatch(&ctx, Touch).await.unwrap()
            });
        }
        while let Some(res) = set.join_next().await {
            assert!(res.unwrap().succeeded());
        }
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }
}
