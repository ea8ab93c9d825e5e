//! Process-local repositories honouring the same contracts as the DynamoDB
//! ones. Used by tests and for running the API without AWS.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::game::Game;
use crate::models::invite::{Invite, InviteStatus};
use crate::models::user::User;
use crate::repositories::errors::game_repository_errors::GameRepositoryError;
use crate::repositories::errors::invite_repository_errors::InviteRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::game_repository::{most_recent, GameRepository};
use crate::repositories::invite_repository::InviteRepository;
use crate::repositories::user_repository::UserRepository;

#[derive(Default)]
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<String, Game>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn create_game(&self, game: &Game) -> Result<(), GameRepositoryError> {
        let mut games = self.games.write().await;
        if games.contains_key(&game.game_id) {
            return Err(GameRepositoryError::AlreadyExists);
        }
        games.insert(game.game_id.clone(), game.clone());
        Ok(())
    }

    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameRepositoryError> {
        let games = self.games.read().await;
        Ok(games.get(game_id).cloned())
    }

    async fn find_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<Game>, GameRepositoryError> {
        let games = self.games.read().await;
        Ok(games
            .values()
            .find(|game| game.invite_code == invite_code)
            .cloned())
    }

    async fn list_games_for_participant(
        &self,
        participant_id: &str,
        limit: usize,
    ) -> Result<Vec<Game>, GameRepositoryError> {
        let games = self.games.read().await;
        let mine = games
            .values()
            .filter(|game| game.is_participant(participant_id))
            .cloned()
            .collect();
        Ok(most_recent(mine, limit))
    }

    async fn commit_game(
        &self,
        game: &Game,
        expected_version: u64,
    ) -> Result<(), GameRepositoryError> {
        // Check and write under the same write guard.
        let mut games = self.games.write().await;
        let stored = games
            .get_mut(&game.game_id)
            .ok_or(GameRepositoryError::NotFound)?;
        if stored.version != expected_version {
            return Err(GameRepositoryError::VersionConflict);
        }
        *stored = game.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.username == user.username) {
            return Err(UserRepositoryError::AlreadyExists);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        let users = self.users.read().await;
        users.get(user_id).cloned().ok_or(UserRepositoryError::NotFound)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepositoryError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| user.username == username)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.values().any(|user| user.username == username))
    }
}

#[derive(Default)]
pub struct InMemoryInviteRepository {
    invites: RwLock<HashMap<String, Invite>>,
}

impl InMemoryInviteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InviteRepository for InMemoryInviteRepository {
    async fn create_invite(&self, invite: &Invite) -> Result<(), InviteRepositoryError> {
        let mut invites = self.invites.write().await;
        if invites.contains_key(&invite.invite_id) {
            return Err(InviteRepositoryError::AlreadyExists);
        }
        invites.insert(invite.invite_id.clone(), invite.clone());
        Ok(())
    }

    async fn get_invite(&self, invite_id: &str) -> Result<Option<Invite>, InviteRepositoryError> {
        let invites = self.invites.read().await;
        Ok(invites.get(invite_id).cloned())
    }

    async fn list_pending_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Invite>, InviteRepositoryError> {
        let invites = self.invites.read().await;
        let mut pending: Vec<Invite> = invites
            .values()
            .filter(|invite| invite.status == InviteStatus::Pending && invite.involves(user_id))
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pending)
    }

    async fn transition_status(
        &self,
        invite_id: &str,
        expected: InviteStatus,
        next: InviteStatus,
        at: DateTime<Utc>,
    ) -> Result<(), InviteRepositoryError> {
        let mut invites = self.invites.write().await;
        let stored = invites
            .get_mut(invite_id)
            .ok_or(InviteRepositoryError::StatusConflict)?;
        if stored.status != expected {
            return Err(InviteRepositoryError::StatusConflict);
        }
        stored.status = next;
        stored.updated_at = at;
        Ok(())
    }
}
