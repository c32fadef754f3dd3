use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::Competition;

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether a competition with this code has already been imported
    pub async fn exists_by_code(&self, code: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM competitions WHERE code = $1)
            "#,
        )
        .bind(code)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Get a competition by its code
    pub async fn find_by_code(&self, code: &str) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            SELECT competition_id, name, code, area_name, created_at
            FROM competitions
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Count the players of every team in the competition
    pub async fn count_players(&self, code: &str) -> Result<i64> {
        let competition = self.find_by_code(code).await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(p.player_id)
            FROM players p
            INNER JOIN teams t ON t.team_id = p.team_id
            WHERE t.competition_id = $1
            "#,
        )
        .bind(competition.competition_id)
        .fetch_one(self.pool)
        .await?;

        Ok(total)
    }

    /// Delete a competition by code, cascading to its teams and players
    pub async fn delete_by_code(&self, code: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM competitions
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
