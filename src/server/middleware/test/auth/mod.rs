use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::AuthSession,
        test::StaticPermissionChecker,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod require;
