use crate::system::auth::{AuthError, LoginRequest, UserInfo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Учётная запись. Пароль хранится как есть: локальное приложение без сервера.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub is_admin: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            username: self.username.clone(),
            is_admin: self.is_admin,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
}

/// Учётная запись администратора для первого запуска
pub fn seed_users() -> Vec<User> {
    vec![User {
        id: Uuid::new_v4().to_string(),
        username: "admin".to_string(),
        password: "admin".to_string(),
        is_admin: true,
        created_at: chrono::Utc::now(),
    }]
}

/// Реестр зарегистрированных пользователей
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl UserRegistry {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn find(&self, username: &str) -> Option<&User> {
        let username = username.trim().to_lowercase();
        self.users
            .iter()
            .find(|u| u.username.to_lowercase() == username)
    }

    /// Регистрация обычного (не администратора) пользователя
    pub fn register(&mut self, dto: &CreateUserDto) -> Result<UserInfo, AuthError> {
        let username = dto.username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if dto.password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        if let Some(existing) = self.find(username) {
            return Err(AuthError::UsernameTaken(existing.username.clone()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: dto.password.clone(),
            is_admin: false,
            created_at: chrono::Utc::now(),
        };
        let info = user.info();
        self.users.push(user);
        log::info!("user registered: {}", info.username);
        Ok(info)
    }

    pub fn authenticate(&self, request: &LoginRequest) -> Result<UserInfo, AuthError> {
        match self.find(&request.username) {
            Some(user) if user.password == request.password => Ok(user.info()),
            _ => {
                log::warn!("failed login attempt for '{}'", request.username.trim());
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_seeded_admin_can_login() {
        let registry = UserRegistry::new(seed_users());
        let info = registry.authenticate(&login("admin", "admin")).unwrap();
        assert!(info.is_admin);
        assert_eq!(
            registry.authenticate(&login("admin", "wrong")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_register_creates_regular_user() {
        let mut registry = UserRegistry::new(seed_users());
        let info = registry
            .register(&CreateUserDto {
                username: " clerk ".into(),
                password: "secret".into(),
            })
            .unwrap();
        assert_eq!(info.username, "clerk");
        assert!(!info.is_admin);
        assert!(registry.authenticate(&login("CLERK", "secret")).is_ok());
    }

    #[test]
    fn test_register_rejections() {
        let mut registry = UserRegistry::new(seed_users());
        let dto = |u: &str, p: &str| CreateUserDto {
            username: u.into(),
            password: p.into(),
        };
        assert_eq!(registry.register(&dto("", "x")), Err(AuthError::EmptyUsername));
        assert_eq!(registry.register(&dto("bob", "")), Err(AuthError::EmptyPassword));
        assert_eq!(
            registry.register(&dto("Admin", "x")),
            Err(AuthError::UsernameTaken("admin".into()))
        );
        assert_eq!(registry.users().len(), 1);
    }
}
