use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::models::game::Game;
use crate::models::invite::{Invite, InviteStatus};
use crate::repositories::errors::invite_repository_errors::InviteRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::invite_repository::InviteRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::invite_service_errors::InviteServiceError;
use crate::services::game_service::GameService;

/// Direct invites between two users.
///
/// Sending creates the game straight away. Accepting first claims the invite
/// (PENDING to ACCEPTED, compare-and-set) and then seats the receiver through
/// [`GameService::join_game`], so the draft engine stays the only thing that
/// binds a second participant.
pub struct InviteService {
    invites: Arc<dyn InviteRepository + Send + Sync>,
    users: Arc<dyn UserRepository + Send + Sync>,
    game_service: Arc<GameService>,
}

impl InviteService {
    pub fn new(
        invites: Arc<dyn InviteRepository + Send + Sync>,
        users: Arc<dyn UserRepository + Send + Sync>,
        game_service: Arc<GameService>,
    ) -> Self {
        InviteService {
            invites,
            users,
            game_service,
        }
    }

    pub async fn send_invite(
        &self,
        sender_id: &str,
        receiver_username: &str,
    ) -> Result<(Invite, Game), InviteServiceError> {
        let username = receiver_username.trim();
        if username.is_empty() {
            return Err(InviteServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }

        let receiver = self
            .users
            .get_user_by_username(username)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => InviteServiceError::ReceiverNotFound,
                _ => InviteServiceError::RepositoryError(e.to_string()),
            })?;
        if receiver.id == sender_id {
            return Err(InviteServiceError::SelfInvite);
        }

        let game = self.game_service.create_game(sender_id).await?;
        let invite = Invite::new(&game.game_id, sender_id, &receiver.id);
        self.invites.create_invite(&invite).await?;

        info!(
            invite_id = %invite.invite_id,
            game_id = %game.game_id,
            sender = sender_id,
            receiver = %receiver.id,
            "invite sent"
        );
        Ok((invite, game))
    }

    pub async fn accept_invite(
        &self,
        invite_id: &str,
        caller_id: &str,
    ) -> Result<Game, InviteServiceError> {
        let invite = self.pending_for_receiver(invite_id, caller_id).await?;
        self.transition(&invite, InviteStatus::Accepted).await?;

        match self.game_service.join_game(&invite.game_id, caller_id).await {
            Ok(game) => {
                info!(invite_id, game_id = %game.game_id, "invite accepted");
                Ok(game)
            }
            Err(err) => {
                warn!(invite_id, error = %err, "join failed, reopening invite");
                if let Err(reopen) = self
                    .invites
                    .transition_status(
                        invite_id,
                        InviteStatus::Accepted,
                        InviteStatus::Pending,
                        Utc::now(),
                    )
                    .await
                {
                    warn!(invite_id, error = %reopen, "could not reopen invite");
                }
                Err(err.into())
            }
        }
    }

    pub async fn decline_invite(
        &self,
        invite_id: &str,
        caller_id: &str,
    ) -> Result<Invite, InviteServiceError> {
        let mut invite = self.pending_for_receiver(invite_id, caller_id).await?;
        invite.updated_at = self.transition(&invite, InviteStatus::Declined).await?;
        invite.status = InviteStatus::Declined;
        info!(invite_id, "invite declined");
        Ok(invite)
    }

    /// Pending invites the caller sent or received, newest first.
    pub async fn list_pending(&self, user_id: &str) -> Result<Vec<Invite>, InviteServiceError> {
        Ok(self.invites.list_pending_for_user(user_id).await?)
    }

    async fn load(&self, invite_id: &str) -> Result<Invite, InviteServiceError> {
        self.invites
            .get_invite(invite_id)
            .await?
            .ok_or(InviteServiceError::InviteNotFound)
    }

    async fn pending_for_receiver(
        &self,
        invite_id: &str,
        caller_id: &str,
    ) -> Result<Invite, InviteServiceError> {
        let invite = self.load(invite_id).await?;
        if invite.receiver_id != caller_id {
            return Err(InviteServiceError::NotInvitee);
        }
        if invite.status != InviteStatus::Pending {
            return Err(InviteServiceError::InviteNotPending(invite.status));
        }
        Ok(invite)
    }

    /// Resolves a pending invite. A lost race reports the status that won.
    async fn transition(
        &self,
        invite: &Invite,
        next: InviteStatus,
    ) -> Result<chrono::DateTime<Utc>, InviteServiceError> {
        let now = Utc::now();
        match self
            .invites
            .transition_status(&invite.invite_id, InviteStatus::Pending, next, now)
            .await
        {
            Ok(()) => Ok(now),
            Err(InviteRepositoryError::StatusConflict) => {
                let current = self.load(&invite.invite_id).await?;
                Err(InviteServiceError::InviteNotPending(current.status))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::GameStatus;
    use crate::models::user::User;
    use crate::repositories::in_memory::{
        InMemoryGameRepository, InMemoryInviteRepository, InMemoryUserRepository,
    };
    use crate::repositories::invite_repository::MockInviteRepository;
    use crate::services::draft_engine::DraftRules;
    use crate::services::errors::error_kind::ErrorKind;

    struct Fixture {
        service: InviteService,
        games: Arc<GameService>,
        alice: String,
        bob: String,
        carol: String,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let mut ids = Vec::new();
        for name in ["alice", "bob", "carol"] {
            let user = User::new(name.to_string(), "$argon2id$hash".to_string());
            users.create_user(&user).await.unwrap();
            ids.push(user.id);
        }
        let games = Arc::new(GameService::new(
            Arc::new(InMemoryGameRepository::new()),
            DraftRules::default(),
        ));
        let service = InviteService::new(
            Arc::new(InMemoryInviteRepository::new()),
            users,
            games.clone(),
        );

        Fixture {
            service,
            games,
            alice: ids[0].clone(),
            bob: ids[1].clone(),
            carol: ids[2].clone(),
        }
    }

    #[tokio::test]
    async fn test_send_and_accept_starts_draft() {
        let f = fixture().await;

        let (invite, game) = f.service.send_invite(&f.alice, " bob ").await.unwrap();
        assert_eq!(invite.receiver_id, f.bob);
        assert_eq!(invite.game_id, game.game_id);
        assert_eq!(game.status, GameStatus::Pending);
        assert_eq!(f.service.list_pending(&f.bob).await.unwrap().len(), 1);
        assert_eq!(f.service.list_pending(&f.alice).await.unwrap().len(), 1);

        let started = f.service.accept_invite(&invite.invite_id, &f.bob).await.unwrap();
        assert_eq!(started.status, GameStatus::Drafting);
        assert_eq!(started.participant_b.as_deref(), Some(f.bob.as_str()));
        assert_eq!(started.current_turn.as_deref(), Some(f.alice.as_str()));
        assert!(f.service.list_pending(&f.bob).await.unwrap().is_empty());

        let err = f
            .service
            .accept_invite(&invite.invite_id, &f.bob)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            InviteServiceError::InviteNotPending(InviteStatus::Accepted)
        );
    }

    #[tokio::test]
    async fn test_send_rejections() {
        let f = fixture().await;

        let err = f.service.send_invite(&f.alice, "alice").await.unwrap_err();
        assert_eq!(err, InviteServiceError::SelfInvite);
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = f.service.send_invite(&f.alice, "nobody").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = f.service.send_invite(&f.alice, "   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(f.games.list_games(&f.alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_only_receiver_answers() {
        let f = fixture().await;
        let (invite, _) = f.service.send_invite(&f.alice, "bob").await.unwrap();

        for outsider in [&f.alice, &f.carol] {
            let err = f
                .service
                .accept_invite(&invite.invite_id, outsider)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Forbidden);
            let err = f
                .service
                .decline_invite(&invite.invite_id, outsider)
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Forbidden);
        }

        let err = f.service.accept_invite("missing", &f.bob).await.unwrap_err();
        assert_eq!(err, InviteServiceError::InviteNotFound);
    }

    #[tokio::test]
    async fn test_declined_invite_cannot_be_accepted() {
        let f = fixture().await;
        let (invite, game) = f.service.send_invite(&f.alice, "bob").await.unwrap();

        let declined = f.service.decline_invite(&invite.invite_id, &f.bob).await.unwrap();
        assert_eq!(declined.status, InviteStatus::Declined);

        let err = f
            .service
            .accept_invite(&invite.invite_id, &f.bob)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        let untouched = f.games.get_game(&game.game_id, &f.alice).await.unwrap();
        assert_eq!(untouched.status, GameStatus::Pending);
        assert!(untouched.participant_b.is_none());
    }

    #[tokio::test]
    async fn test_failed_join_reopens_invite() {
        let f = fixture().await;
        let (invite, game) = f.service.send_invite(&f.alice, "bob").await.unwrap();
        f.games
            .join_game_by_code(&game.invite_code, &f.carol)
            .await
            .unwrap();

        let err = f
            .service
            .accept_invite(&invite.invite_id, &f.bob)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let pending = f.service.list_pending(&f.bob).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].status, InviteStatus::Pending);
        f.service.decline_invite(&invite.invite_id, &f.bob).await.unwrap();
    }

    #[tokio::test]
    async fn test_lost_race_reports_winning_status() {
        let pending = Invite::new("game-1", "alice", "bob");
        let mut declined = pending.clone();
        declined.status = InviteStatus::Declined;

        let mut repo = MockInviteRepository::new();
        let mut reads = vec![declined, pending];
        repo.expect_get_invite()
            .times(2)
            .returning(move |_| Ok(reads.pop()));
        repo.expect_transition_status()
            .times(1)
            .returning(|_, _, _, _| Err(InviteRepositoryError::StatusConflict));
        let games = Arc::new(GameService::new(
            Arc::new(InMemoryGameRepository::new()),
            DraftRules::default(),
        ));
        let service = InviteService::new(
            Arc::new(repo),
            Arc::new(InMemoryUserRepository::new()),
            games,
        );

        let err = service.accept_invite("any", "bob").await.unwrap_err();
        assert_eq!(
            err,
            InviteServiceError::InviteNotPending(InviteStatus::Declined)
        );
    }
}
