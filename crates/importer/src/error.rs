use reqwest::StatusCode;
use storage::error::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Competition '{0}' not found upstream")]
    CompetitionNotFound(String),

    #[error("Failed to fetch teams of competition {competition_id}: upstream answered {status}")]
    TeamsFetchError {
        competition_id: i64,
        status: StatusCode,
    },

    #[error("Failed to fetch squad of team {team_id}: upstream answered {status}")]
    TeamFetchError { team_id: i64, status: StatusCode },

    #[error("Upstream answered {status} for {url}")]
    UpstreamStatus { url: String, status: StatusCode },

    #[error("Still rate limited after {attempts} attempts")]
    RetryExhausted { attempts: u32 },

    #[error("Data transformation error: {0}")]
    TransformationError(String),
}

impl ImporterError {
    /// Upstream says the competition, its teams or one of its squads does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CompetitionNotFound(_) | Self::TeamsFetchError { .. } | Self::TeamFetchError { .. }
        )
    }

    /// The competition code was stored by someone else first.
    pub fn is_already_imported(&self) -> bool {
        matches!(self, Self::StorageError(StorageError::AlreadyExists(_)))
    }
}
