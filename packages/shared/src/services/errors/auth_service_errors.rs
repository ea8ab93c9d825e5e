use crate::services::errors::error_kind::ErrorKind;
use crate::services::errors::user_service_errors::UserServiceError;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum AuthServiceError {
    UserServiceError(UserServiceError),
    MissingToken,
    InvalidToken,
    ExpiredToken,
    JwtError(String),
}

impl AuthServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthServiceError::UserServiceError(err) => err.kind(),
            AuthServiceError::MissingToken
            | AuthServiceError::InvalidToken
            | AuthServiceError::ExpiredToken => ErrorKind::Unauthenticated,
            AuthServiceError::JwtError(_) => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthServiceError::UserServiceError(err) => write!(f, "{}", err),
            AuthServiceError::MissingToken => write!(f, "Missing bearer token"),
            AuthServiceError::InvalidToken => write!(f, "Invalid JWT token"),
            AuthServiceError::ExpiredToken => write!(f, "JWT token has expired"),
            AuthServiceError::JwtError(msg) => write!(f, "JWT error: {}", msg),
        }
    }
}

impl std::error::Error for AuthServiceError {}

impl From<UserServiceError> for AuthServiceError {
    fn from(err: UserServiceError) -> Self {
        AuthServiceError::UserServiceError(err)
    }
}
