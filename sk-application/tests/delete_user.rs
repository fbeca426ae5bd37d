use async_trait::async_trait;
use sk_application::command_handler::CommandHandler;
use sk_application::error::{AppError, AppResult, ErrorKind};
use sk_application::identity::IdentityService;
use sk_application::inmemory_identity_service::InMemoryIdentityService;
use sk_application::users::{DeleteUser, DeleteUserHandler, NOT_AUTHORIZED_USERNAME};
use sk_application::{AppContext, CommandResult};
use sk_domain::user::AppUser;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

const USER_NAME: &str = "User";

/// 记录调用次数的身份服务替身
struct FakeIdentity {
    user: Option<AppUser>,
    delete_result: CommandResult,
    lookups: AtomicUsize,
    deletes: AtomicUsize,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeIdentity {
    fn returning(user: Option<AppUser>) -> Arc<Self> {
        Arc::new(Self {
            user,
            delete_result: CommandResult::success(),
            lookups: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl IdentityService for FakeIdentity {
    async fn get_user_by_username(
        &self,
        _username: &str,
        _cancel: &CancellationToken,
    ) -> AppResult<Option<AppUser>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push("lookup");
        Ok(self.user.clone())
    }

    async fn delete_user(
        &self,
        _username: &str,
        _cancel: &CancellationToken,
    ) -> AppResult<CommandResult> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push("delete");
        Ok(self.delete_result.clone())
    }
}

/// 查询即失败的身份服务
struct UnavailableIdentity {
    deletes: AtomicUsize,
}

#[async_trait]
impl IdentityService for UnavailableIdentity {
    async fn get_user_by_username(
        &self,
        _username: &str,
        _cancel: &CancellationToken,
    ) -> AppResult<Option<AppUser>> {
        Err(AppError::infra("identity store unavailable"))
    }

    async fn delete_user(
        &self,
        _username: &str,
        _cancel: &CancellationToken,
    ) -> AppResult<CommandResult> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(CommandResult::success())
    }
}

#[tokio::test]
async fn owner_deletes_themself() {
    let identity = FakeIdentity::returning(Some(AppUser::registered("u-1", USER_NAME)));
    let handler = DeleteUserHandler::new(identity.clone());

    let result = handler
        .handle(&AppContext::for_actor(USER_NAME), DeleteUser::new(USER_NAME))
        .await
        .unwrap();

    assert!(result.succeeded());
    assert_eq!(identity.deletes.load(Ordering::SeqCst), 1);
    assert_eq!(*identity.calls.lock().unwrap(), vec!["lookup", "delete"]);
}

#[tokio::test]
async fn downstream_failure_is_returned_unchanged() {
    let identity = Arc::new(FakeIdentity {
        user: Some(AppUser::registered("u-1", USER_NAME)),
        delete_result: CommandResult::failure([("Identity", "store unavailable")]),
        lookups: AtomicUsize::new(0),
        deletes: AtomicUsize::new(0),
        calls: Mutex::new(Vec::new()),
    });
    let handler = DeleteUserHandler::new(identity.clone());

    let result = handler
        .handle(&AppContext::for_actor(USER_NAME), DeleteUser::new(USER_NAME))
        .await
        .unwrap();

    assert_eq!(result, CommandResult::failure([("Identity", "store unavailable")]));
    assert_eq!(identity.deletes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn lookup_failure_propagates_unchanged() {
    let identity = Arc::new(UnavailableIdentity {
        deletes: AtomicUsize::new(0),
    });
    let handler = DeleteUserHandler::new(identity.clone());

    let err = handler
        .handle(&AppContext::for_actor(USER_NAME), DeleteUser::new(USER_NAME))
        .await
        .unwrap_err();

    match &err {
        AppError::Infra(reason) => assert_eq!(reason, "identity store unavailable"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Other);
    assert_eq!(identity.deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_user_is_not_found_and_never_deleted() {
    let identity = FakeIdentity::returning(None);
    let handler = DeleteUserHandler::new(identity.clone());

    let err = handler
        .handle(&AppContext::for_actor(USER_NAME), DeleteUser::new("ghost"))
        .await
        .unwrap_err();

    match &err {
        AppError::NotFound { entity, key } => {
            assert_eq!(*entity, "AppUser");
            assert_eq!(key, "ghost");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(identity.deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn other_users_account_is_forbidden() {
    let identity = FakeIdentity::returning(Some(AppUser::registered("u-2", "OtherUser")));
    let handler = DeleteUserHandler::new(identity.clone());

    let err = handler
        .handle(&AppContext::for_actor(USER_NAME), DeleteUser::new("OtherUser"))
        .await
        .unwrap_err();

    match &err {
        AppError::Forbidden(reasons) => {
            assert_eq!(reasons.len(), 1);
            assert_eq!(reasons["Username"], NOT_AUTHORIZED_USERNAME);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(identity.lookups.load(Ordering::SeqCst), 1);
    assert_eq!(identity.deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn anonymous_actor_is_forbidden() {
    let identity = FakeIdentity::returning(Some(AppUser::registered("u-1", USER_NAME)));
    let handler = DeleteUserHandler::new(identity.clone());

    let err = handler
        .handle(&AppContext::default(), DeleteUser::new(USER_NAME))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(identity.deletes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn existence_is_checked_before_ownership() {
    // 目标不存在且操作者也不是目标：报告 NotFound
    let identity = FakeIdentity::returning(None);
    let handler = DeleteUserHandler::new(identity);

    let err = handler
        .handle(&AppContext::for_actor("Someone"), DeleteUser::new("OtherUser"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn repeated_delete_reaches_not_found() {
    let identity = Arc::new(InMemoryIdentityService::with_users([AppUser::registered(
        "u-1", USER_NAME,
    )]));
    let handler = DeleteUserHandler::new(identity.clone());
    let ctx = AppContext::for_actor(USER_NAME);

    let first = handler.handle(&ctx, DeleteUser::new(USER_NAME)).await.unwrap();
    assert!(first.succeeded());
    assert!(!identity.contains(USER_NAME));

    let err = handler
        .handle(&ctx, DeleteUser::new(USER_NAME))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn cancelled_request_propagates_cancellation() {
    let identity = Arc::new(InMemoryIdentityService::with_users([AppUser::registered(
        "u-1", USER_NAME,
    )]));
    let handler = DeleteUserHandler::new(identity.clone());

    let token = CancellationToken::new();
    token.cancel();
    let ctx = AppContext::builder()
        .actor(sk_application::CurrentActor::new(USER_NAME))
        .cancellation(token)
        .build();

    let err = handler
        .handle(&ctx, DeleteUser::new(USER_NAME))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Cancelled));
    assert!(identity.contains(USER_NAME));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deletes_leave_one_winner() {
    let identity = Arc::new(InMemoryIdentityService::with_users([AppUser::registered(
        "u-1", USER_NAME,
    )]));
    let handler = Arc::new(DeleteUserHandler::new(identity));

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let handler = handler.clone();
        tasks.spawn(async move {
            handler
                .handle(&AppContext::for_actor(USER_NAME), DeleteUser::new(USER_NAME))
                .await
        });
    }

    let mut successes = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap() {
            Ok(result) => {
                assert!(result.succeeded());
                successes += 1;
            }
            Err(err) => assert_eq!(err.kind(), ErrorKind::NotFound),
        }
    }
    assert_eq!(successes, 1);
}
