use std::fmt;
use std::sync::Arc;

use storage::LeagueStore;

pub struct ImportContext {
    pub store: Arc<dyn LeagueStore>,
    /// Upstream API token supplied by the caller; never persisted.
    pub auth_token: Option<String>,
}

/// Terminal state of one import request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported,
    AlreadyImported,
    NotFound,
    ServerError,
}

impl ImportOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Imported => "Successfully imported",
            Self::AlreadyImported => "League already imported",
            Self::NotFound => "Not found",
            Self::ServerError => "Server Error",
        }
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[async_trait::async_trait]
pub trait CompetitionImporter: Send + Sync {
    async fn import(&self, code: &str, context: &ImportContext) -> ImportOutcome;

    fn name(&self) -> &'static str;
}
