use crate::models::invite::{Invite, InviteStatus};
use crate::repositories::errors::invite_repository_errors::InviteRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use serde_dynamo::{from_item, from_items, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbInviteRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbInviteRepository {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    async fn pending_on_index(
        &self,
        index_name: &str,
        key_attribute: &str,
        user_id: &str,
    ) -> Result<Vec<Invite>, InviteRepositoryError> {
        let mut invites = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(index_name)
                .key_condition_expression("#k = :v")
                .filter_expression("#status = :pending")
                .expression_attribute_names("#k", key_attribute)
                .expression_attribute_names("#status", "status")
                .expression_attribute_values(":v", AttributeValue::S(user_id.to_string()))
                .expression_attribute_values(":pending", status_value(InviteStatus::Pending)?)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| InviteRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(items) = output.items {
                let page: Vec<Invite> = from_items(items)
                    .map_err(|e| InviteRepositoryError::Serialization(e.to_string()))?;
                invites.extend(page);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        Ok(invites)
    }
}

fn status_value(status: InviteStatus) -> Result<AttributeValue, InviteRepositoryError> {
    to_attribute_value(status).map_err(|e| InviteRepositoryError::Serialization(e.to_string()))
}

/// Storage for direct invites. Status changes are compare-and-set on the
/// current status so an invite is resolved exactly once.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InviteRepository: Send + Sync {
    async fn create_invite(&self, invite: &Invite) -> Result<(), InviteRepositoryError>;

    async fn get_invite(&self, invite_id: &str) -> Result<Option<Invite>, InviteRepositoryError>;

    /// Pending invites the user sent or received, newest first.
    async fn list_pending_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Invite>, InviteRepositoryError>;

    /// Moves the invite from `expected` to `next`. Fails with `StatusConflict`
    /// when the stored status is no longer `expected`.
    async fn transition_status(
        &self,
        invite_id: &str,
        expected: InviteStatus,
        next: InviteStatus,
        at: DateTime<Utc>,
    ) -> Result<(), InviteRepositoryError>;
}

#[async_trait]
impl InviteRepository for DynamoDbInviteRepository {
    async fn create_invite(&self, invite: &Invite) -> Result<(), InviteRepositoryError> {
        let item =
            to_item(invite).map_err(|e| InviteRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(invite_id)")
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
                    Err(InviteRepositoryError::AlreadyExists)
                } else {
                    Err(InviteRepositoryError::DynamoDb(e.to_string()))
                }
            }
        }
    }

    async fn get_invite(&self, invite_id: &str) -> Result<Option<Invite>, InviteRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("invite_id", AttributeValue::S(invite_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| InviteRepositoryError::DynamoDb(e.to_string()))?;

        match result.item {
            Some(item) => from_item(item)
                .map(Some)
                .map_err(|e| InviteRepositoryError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn list_pending_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Invite>, InviteRepositoryError> {
        let mut invites = self
            .pending_on_index("GSI_InviteBySender", "sender_id", user_id)
            .await?;
        let received = self
            .pending_on_index("GSI_InviteByReceiver", "receiver_id", user_id)
            .await?;

        for invite in received {
            if !invites.iter().any(|i| i.invite_id == invite.invite_id) {
                invites.push(invite);
            }
        }
        invites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invites)
    }

    async fn transition_status(
        &self,
        invite_id: &str,
        expected: InviteStatus,
        next: InviteStatus,
        at: DateTime<Utc>,
    ) -> Result<(), InviteRepositoryError> {
        let updated_at: AttributeValue = to_attribute_value(at)
            .map_err(|e| InviteRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("invite_id", AttributeValue::S(invite_id.to_string()))
            .update_expression("SET #status = :next, updated_at = :updated_at")
            .condition_expression("attribute_exists(invite_id) AND #status = :expected")
            .expression_attribute_names("#status", "status")
            .expression_attribute_values(":next", status_value(next)?)
            .expression_attribute_values(":expected", status_value(expected)?)
            .expression_attribute_values(":updated_at", updated_at)
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
                    Err(InviteRepositoryError::StatusConflict)
                } else {
                    Err(InviteRepositoryError::DynamoDb(e.to_string()))
                }
            }
        }
    }
}
