use crate::Database;
use crate::dto::league::{ImportedLeague, NewLeague};
use crate::error::Result;
use crate::repository::competition::CompetitionRepository;
use crate::repository::league::LeagueRepository;

/// Storage operations the import and query paths depend on.
#[async_trait::async_trait]
pub trait LeagueStore: Send + Sync {
    async fn competition_exists(&self, code: &str) -> Result<bool>;

    /// Persists the whole hierarchy atomically. A competition code that is
    /// already stored fails with `StorageError::AlreadyExists`.
    async fn insert_league(&self, league: &NewLeague) -> Result<ImportedLeague>;

    /// Fails with `StorageError::NotFound` when the code is not stored.
    async fn count_players(&self, code: &str) -> Result<i64>;
}

#[async_trait::async_trait]
impl LeagueStore for Database {
    async fn competition_exists(&self, code: &str) -> Result<bool> {
        CompetitionRepository::new(self.pool())
            .exists_by_code(code)
            .await
    }

    async fn insert_league(&self, league: &NewLeague) -> Result<ImportedLeague> {
        LeagueRepository::new(self.pool()).insert(league).await
    }

    async fn count_players(&self, code: &str) -> Result<i64> {
        CompetitionRepository::new(self.pool())
            .count_players(code)
            .await
    }
}
