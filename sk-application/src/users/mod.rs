//! 用户用例
//!
mod delete_user;

pub use delete_user::{DeleteUser, DeleteUserHandler, NOT_AUTHORIZED_USERNAME};
