use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Пользователь текущей сессии
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
}

/// Ошибки входа и регистрации
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("User \"{0}\" already exists")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,
}
