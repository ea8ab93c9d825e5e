use crate::services::errors::error_kind::ErrorKind;

#[derive(Debug, PartialEq)]
pub enum UserServiceError {
    UserAlreadyExists,
    UserNotFound,
    InvalidCredentials,
    ValidationError(String),
    PasswordHashError(String),
    RepositoryError(String),
}

impl UserServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserServiceError::UserAlreadyExists => ErrorKind::Conflict,
            UserServiceError::UserNotFound => ErrorKind::NotFound,
            UserServiceError::InvalidCredentials => ErrorKind::Unauthenticated,
            UserServiceError::ValidationError(_) => ErrorKind::Validation,
            UserServiceError::PasswordHashError(_) | UserServiceError::RepositoryError(_) => {
                ErrorKind::Internal
            }
        }
    }
}

impl std::fmt::Display for UserServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserServiceError::UserAlreadyExists => write!(f, "Username already taken"),
            UserServiceError::UserNotFound => write!(f, "User not found"),
            UserServiceError::InvalidCredentials => write!(f, "Invalid username or password"),
            UserServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UserServiceError::PasswordHashError(msg) => write!(f, "Password hash error: {}", msg),
            UserServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UserServiceError {}
