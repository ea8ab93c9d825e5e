use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use draft_shared::models::draft::responses::ErrorResponse;
use draft_shared::services::errors::{
    auth_service_errors::AuthServiceError, error_kind::ErrorKind,
    game_service_errors::GameServiceError, invite_service_errors::InviteServiceError,
    user_service_errors::UserServiceError,
};
use lambda_http::tracing::error;

#[derive(Debug)]
pub enum ApiError {
    AuthService(AuthServiceError),
    UserService(UserServiceError),
    GameService(GameServiceError),
    InviteService(InviteServiceError),
    Unauthorized,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::AuthService(err) => err.kind(),
            ApiError::UserService(err) => err.kind(),
            ApiError::GameService(err) => err.kind(),
            ApiError::InviteService(err) => err.kind(),
            ApiError::Unauthorized => ErrorKind::Unauthenticated,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::AuthService(err) => err.to_string(),
            ApiError::UserService(err) => err.to_string(),
            ApiError::GameService(err) => err.to_string(),
            ApiError::InviteService(err) => err.to_string(),
            ApiError::Unauthorized => "Unauthorized".to_string(),
        }
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl From<InviteServiceError> for ApiError {
    fn from(error: InviteServiceError) -> Self {
        ApiError::InviteService(error)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::InvalidState | ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = status_for(kind);

        // Internal details stay in the logs.
        let message = if kind == ErrorKind::Internal {
            error!("internal error: {}", self.message());
            "Server error".to_string()
        } else {
            self.message()
        };

        let body = ErrorResponse {
            error: message,
            kind: kind.as_str().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draft_shared::services::errors::draft_errors::DraftError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(GameServiceError::Draft(DraftError::NotYourTurn)),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::from(GameServiceError::Draft(DraftError::NoSkipsRemaining)),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(GameServiceError::GameNotFound),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(AuthServiceError::ExpiredToken),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(UserServiceError::ValidationError("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(InviteServiceError::NotInvitee),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::from(InviteServiceError::Game(GameServiceError::Draft(
                    DraftError::GameFull,
                ))),
                StatusCode::CONFLICT,
            ),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
