use lambda_http::{run, Error};
use std::env::set_var;
use std::sync::Arc;

use draft_api::state::AppState;
use draft_shared::config::AppConfig;
use draft_shared::repositories::game_repository::DynamoDbGameRepository;
use draft_shared::repositories::invite_repository::DynamoDbInviteRepository;
use draft_shared::repositories::user_repository::DynamoDbUserRepository;
use draft_shared::services::auth_service::AuthService;
use draft_shared::services::draft_engine::DraftRules;
use draft_shared::services::game_service::GameService;
use draft_shared::services::invite_service::InviteService;
use draft_shared::services::user_service::UserService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        games_table = %config.games_table,
        max_skips = config.max_skips,
        "starting draft api"
    );

    let aws_config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&aws_config);

    let user_repository = Arc::new(DynamoDbUserRepository::new(
        client.clone(),
        &config.users_table,
    ));
    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let auth_service = Arc::new(AuthService::new(
        user_service,
        &config.jwt_secret,
        config.token_ttl_hours,
    ));

    let game_repository = Arc::new(DynamoDbGameRepository::new(
        client.clone(),
        &config.games_table,
    ));
    let game_service = Arc::new(GameService::new(
        game_repository,
        DraftRules {
            max_skips: config.max_skips,
        },
    ));

    let invite_repository = Arc::new(DynamoDbInviteRepository::new(
        client,
        &config.invites_table,
    ));
    let invite_service = Arc::new(InviteService::new(
        invite_repository,
        user_repository,
        game_service.clone(),
    ));

    let app = draft_api::app(AppState {
        auth_service,
        game_service,
        invite_service,
    });

    run(app).await
}
