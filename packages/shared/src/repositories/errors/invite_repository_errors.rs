#[derive(Debug, PartialEq)]
pub enum InviteRepositoryError {
    NotFound,
    AlreadyExists,
    /// The stored invite was no longer in the status the caller expected.
    StatusConflict,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for InviteRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InviteRepositoryError::NotFound => write!(f, "Invite not found"),
            InviteRepositoryError::AlreadyExists => write!(f, "Invite already exists"),
            InviteRepositoryError::StatusConflict => write!(f, "Invite status changed"),
            InviteRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            InviteRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for InviteRepositoryError {}
