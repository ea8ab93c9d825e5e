use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::info;

use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 32;
const PASSWORD_MIN_LEN: usize = 8;

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        UserService { repository }
    }

    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, UserServiceError> {
        let username = username.trim();
        if username.len() < USERNAME_MIN_LEN || username.len() > USERNAME_MAX_LEN {
            return Err(UserServiceError::ValidationError(format!(
                "Username must be between {} and {} characters",
                USERNAME_MIN_LEN, USERNAME_MAX_LEN
            )));
        }
        if password.len() < PASSWORD_MIN_LEN {
            return Err(UserServiceError::ValidationError(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_LEN
            )));
        }
        if self
            .repository
            .username_exists(username)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::UserAlreadyExists);
        }

        let user = User::new(username.to_string(), hash_password(password)?);
        self.repository
            .create_user(&user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::AlreadyExists => UserServiceError::UserAlreadyExists,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })?;
        info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    /// Looks the user up and checks the password. Unknown usernames and wrong
    /// passwords are indistinguishable to the caller.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, UserServiceError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username or password cannot be empty".to_string(),
            ));
        }
        let user = match self.repository.get_user_by_username(username.trim()).await {
            Ok(user) => user,
            Err(UserRepositoryError::NotFound) => return Err(UserServiceError::InvalidCredentials),
            Err(e) => return Err(UserServiceError::RepositoryError(e.to_string())),
        };
        if verify_password(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(UserServiceError::InvalidCredentials)
        }
    }
}

fn hash_password(password: &str) -> Result<String, UserServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserServiceError::PasswordHashError(e.to_string()))
}

fn verify_password(password: &str, password_hash: &str) -> Result<bool, UserServiceError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| UserServiceError::PasswordHashError(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_create_user()
            .withf(|user| user.username == "draft_king" && user.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|_| Ok(()));
        let service = UserService::new(Arc::new(repo));

        let user = service.create_user("  draft_king ", "hunter2hunter2").await.unwrap();
        assert_eq!(user.username, "draft_king");
        assert_ne!(user.password_hash, "hunter2hunter2");
    }

    #[tokio::test]
    async fn test_create_user_validation() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let err = service.create_user("ab", "longenough").await.unwrap_err();
        assert!(matches!(err, UserServiceError::ValidationError(_)));

        let err = service.create_user("draft_king", "short").await.unwrap_err();
        assert!(matches!(err, UserServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_user_duplicate() {
        let mut repo = MockUserRepository::new();
        repo.expect_username_exists().returning(|_| Ok(true));
        let service = UserService::new(Arc::new(repo));

        let err = service.create_user("draft_king", "longenough").await.unwrap_err();
        assert_eq!(err, UserServiceError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let stored = User::new("draft_king".to_string(), hash_password("correct horse").unwrap());
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_username()
            .returning(move |_| Ok(stored.clone()));
        let service = UserService::new(Arc::new(repo));

        assert!(service.verify_credentials("draft_king", "correct horse").await.is_ok());
        assert_eq!(
            service
                .verify_credentials("draft_king", "wrong horse")
                .await
                .unwrap_err(),
            UserServiceError::InvalidCredentials
        );
    }

    #[tokio::test]
    async fn test_unknown_user_is_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_username()
            .returning(|_| Err(UserRepositoryError::NotFound));
        let service = UserService::new(Arc::new(repo));

        let err = service.verify_credentials("nobody", "whatever1").await.unwrap_err();
        assert_eq!(err, UserServiceError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_get_user_by_id_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_id()
            .returning(|_| Err(UserRepositoryError::NotFound));
        let service = UserService::new(Arc::new(repo));

        let err = service.get_user_by_id("missing").await.unwrap_err();
        assert_eq!(err, UserServiceError::UserNotFound);
    }
}
