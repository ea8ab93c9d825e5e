use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::DEFAULT_TOKEN_TTL_HOURS;
use crate::models::auth::responses::{LoginResponse, TokenClaims};
use crate::models::user::{User, UserProfile};
use crate::services::errors::auth_service_errors::AuthServiceError;
use crate::services::user_service::UserService;

/// Issues bearer tokens and resolves them back to a caller identity.
///
/// This is the session adapter the game service relies on: every game
/// operation takes the user id returned by [`AuthService::resolve_caller`].
pub struct AuthService {
    user_service: Arc<UserService>,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthService {
    pub fn new(user_service: Arc<UserService>, jwt_secret: &str, token_ttl_hours: i64) -> Self {
        AuthService {
            user_service,
            jwt_secret: jwt_secret.to_string(),
            token_ttl_hours,
        }
    }

    pub fn with_jwt_secret(user_service: Arc<UserService>, jwt_secret: &str) -> Self {
        Self::new(user_service, jwt_secret, DEFAULT_TOKEN_TTL_HOURS)
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<UserProfile, AuthServiceError> {
        let user = self.user_service.create_user(username, password).await?;
        Ok(UserProfile::from(&user))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthServiceError> {
        let user = self.user_service.verify_credentials(username, password).await?;
        info!(user_id = %user.id, "user logged in");
        self.generate_token(&user)
    }

    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, AuthServiceError> {
        let user = self.user_service.get_user_by_id(user_id).await?;
        Ok(UserProfile::from(&user))
    }

    pub fn generate_token(&self, user: &User) -> Result<LoginResponse, AuthServiceError> {
        let now = Utc::now();
        let ttl = Duration::hours(self.token_ttl_hours);

        let claims = TokenClaims {
            sub: user.id.clone(),
            username: user.username.clone(),
            exp: (now + ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| AuthServiceError::JwtError(format!("{:#?}", e)))?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: ttl.num_seconds(),
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let validation = Validation::default();

        match decode::<TokenClaims>(token, &decoding_key, &validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Err(AuthServiceError::ExpiredToken)
                }
                _ => {
                    debug!("rejected token: {}", err);
                    Err(AuthServiceError::InvalidToken)
                }
            },
        }
    }

    /// Resolves a bearer token to the caller's user id. Fails closed.
    pub fn resolve_caller(&self, token: &str) -> Result<String, AuthServiceError> {
        if token.trim().is_empty() {
            return Err(AuthServiceError::MissingToken);
        }
        let claims = self.verify_token(token)?;
        if claims.sub.is_empty() {
            return Err(AuthServiceError::InvalidToken);
        }
        Ok(claims.sub)
    }
}
