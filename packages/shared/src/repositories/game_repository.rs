use crate::models::game::Game;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, from_items, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbGameRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbGameRepository {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    /// Reads every page of a GSI query. The participant indexes carry no sort
    /// key, so ordering has to happen after all pages are in.
    async fn query_index(
        &self,
        index_name: &str,
        key_attribute: &str,
        key_value: &str,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(index_name)
                .key_condition_expression("#k = :v")
                .expression_attribute_names("#k", key_attribute)
                .expression_attribute_values(":v", AttributeValue::S(key_value.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(items) = output.items {
                let page: Vec<Game> = from_items(items)
                    .map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
                games.extend(page);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        Ok(games)
    }
}

/// Orders games newest-update first and keeps the first `limit`.
pub fn most_recent(mut games: Vec<Game>, limit: usize) -> Vec<Game> {
    games.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    games.truncate(limit);
    games
}

/// Storage for games. `commit_game` is the only write path after creation and
/// must be an atomic compare-and-set on `Game::version`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError>;

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError>;

    async fn find_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<Game>, GameRepositoryError>;

    /// Games the participant sits in, most recently updated first, at most
    /// `limit` of them.
    async fn list_games_for_participant(
        &self,
        participant_id: &str,
        limit: usize,
    ) -> Result<Vec<Game>, GameRepositoryError>;

    /// Replaces the stored game with `game` if and only if the stored version
    /// still equals `expected_version`.
    async fn commit_game(
        &self,
        game: &Game,
        expected_version: u64,
    ) -> Result<(), GameRepositoryError>;
}

#[async_trait]
impl GameRepository for DynamoDbGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let item =
            to_item(game).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(game_id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let conditional_failed = e
                    .as_service_error()
                    .map(|err| err.is_conditional_check_failed_exception())
                    .unwrap_or(false);
                if conditional_failed {
                    Err(GameRepositoryError::AlreadyExists)
                } else {
                    Err(GameRepositoryError::DynamoDb(e.to_string()))
                }
            }
        }
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("game_id", AttributeValue::S(game_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| GameRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let game: Game =
                from_item(item).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(game))
        } else {
            Ok(None)
        }
    }

    async fn find_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<Game>, GameRepositoryError> {
        let matches = self
            .query_index("GSI_GameByInviteCode", "invite_code", invite_code)
            .await?;

        // Index reads are eventually consistent, re-read the base item.
        match matches.into_iter().next() {
            Some(game) => self.get_game(&game.game_id).await,
            None => Ok(None),
        }
    }

    async fn list_games_for_participant(
        &self,
        participant_id: &str,
        limit: usize,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let mut games = self
            .query_index("GSI_GameByParticipantA", "participant_a", participant_id)
            .await?;
        let joined = self
            .query_index("GSI_GameByParticipantB", "participant_b", participant_id)
            .await?;

        for game in joined {
            if !games.iter().any(|g| g.game_id == game.game_id) {
                games.push(game);
            }
        }
        Ok(most_recent(games, limit))
    }

    async fn commit_game(
        &self,
        game: &Game,
        expected_version: u64,
    ) -> Result<(), GameRepositoryError> {
        let item =
            to_item(game).map_err(|e| GameRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(game_id) AND #version = :expected")
            .expression_attribute_names("#version", "version")
            .expression_attribute_values(
                ":expected",
                AttributeValue::N(expected_version.to_string()),
            )
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let conditional_failed = e
                    .as_service_error()
                    .map(|err| err.is_conditional_check_failed_exception())
                    .unwrap_or(false);
                if conditional_failed {
                    Err(GameRepositoryError::VersionConflict)
                } else {
                    Err(GameRepositoryError::DynamoDb(e.to_string()))
                }
            }
        }
    }
}
