use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::league::{ImportedLeague, NewCompetition, NewLeague, NewPlayer, NewTeam};
use crate::error::{Result, StorageError};

type Tx<'c> = sqlx::Transaction<'c, sqlx::Postgres>;

/// Writes a whole imported league in one transaction.
///
/// Nothing is visible to other connections until the commit. Any failure
/// drops the transaction, which rolls every row of the import back.
pub struct LeagueRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeagueRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, league: &NewLeague) -> Result<ImportedLeague> {
        let mut tx = self.pool.begin().await?;

        let competition_id = self.insert_competition(&league.competition, &mut tx).await?;

        let team_ids = self
            .insert_teams(competition_id, &league.competition.code, &league.teams, &mut tx)
            .await?;

        let players = self.insert_players(&team_ids, &league.players, &mut tx).await?;

        tx.commit().await?;

        info!(
            "Stored competition '{}' with {} teams and {} players",
            league.competition.code,
            team_ids.len(),
            players
        );

        Ok(ImportedLeague {
            competition_id,
            teams: team_ids.len(),
            players,
        })
    }

    async fn insert_competition(
        &self,
        competition: &NewCompetition,
        tx: &mut Tx<'_>,
    ) -> Result<Uuid> {
        let competition_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO competitions (name, code, area_name)
            VALUES ($1, $2, $3)
            RETURNING competition_id
            "#,
        )
        .bind(&competition.name)
        .bind(&competition.code)
        .bind(&competition.area_name)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            // The unique code constraint settles concurrent imports of one league
            let err = StorageError::from(e);
            if err.is_unique_violation() {
                return StorageError::AlreadyExists(format!(
                    "Competition '{}' already imported",
                    competition.code
                ));
            }
            err
        })?;

        Ok(competition_id)
    }

    /// Bulk-inserts the teams and returns their ids keyed by tla.
    async fn insert_teams(
        &self,
        competition_id: Uuid,
        competition_code: &str,
        teams: &[NewTeam],
        tx: &mut Tx<'_>,
    ) -> Result<HashMap<String, Uuid>> {
        if let Some(stray) = teams
            .iter()
            .find(|t| t.competition_code != competition_code)
        {
            return Err(StorageError::ConstraintViolation(format!(
                "Team '{}' belongs to competition '{}', not '{}'",
                stray.tla, stray.competition_code, competition_code
            )));
        }

        let names: Vec<String> = teams.iter().map(|t| t.name.clone()).collect();
        let tlas: Vec<String> = teams.iter().map(|t| t.tla.clone()).collect();
        let short_names: Vec<String> = teams.iter().map(|t| t.short_name.clone()).collect();
        let area_names: Vec<String> = teams.iter().map(|t| t.area_name.clone()).collect();
        let emails: Vec<Option<String>> = teams.iter().map(|t| t.email.clone()).collect();

        let rows = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            INSERT INTO teams (competition_id, name, tla, short_name, area_name, email)
            SELECT $1, t.name, t.tla, t.short_name, t.area_name, t.email
            FROM UNNEST($2::text[], $3::text[], $4::text[], $5::text[], $6::text[])
                AS t(name, tla, short_name, area_name, email)
            RETURNING team_id, tla
            "#,
        )
        .bind(competition_id)
        .bind(&names)
        .bind(&tlas)
        .bind(&short_names)
        .bind(&area_names)
        .bind(&emails)
        .fetch_all(&mut **tx)
        .await?;

        debug!("Inserted {} teams for competition {}", rows.len(), competition_id);

        Ok(rows.into_iter().map(|(id, tla)| (tla, id)).collect())
    }

    async fn insert_players(
        &self,
        team_ids: &HashMap<String, Uuid>,
        players: &[NewPlayer],
        tx: &mut Tx<'_>,
    ) -> Result<usize> {
        let mut owners = Vec::with_capacity(players.len());
        for player in players {
            let team_id = team_ids.get(&player.team_tla).ok_or_else(|| {
                StorageError::ConstraintViolation(format!(
                    "Player '{}' references unknown team '{}'",
                    player.name, player.team_tla
                ))
            })?;
            owners.push(*team_id);
        }

        let names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
        let positions: Vec<Option<String>> = players.iter().map(|p| p.position.clone()).collect();
        let birth_dates: Vec<Option<chrono::NaiveDate>> =
            players.iter().map(|p| p.date_of_birth).collect();
        let birth_countries: Vec<Option<String>> = players
            .iter()
            .map(|p| p.country_of_birth.clone())
            .collect();
        let nationalities: Vec<Option<String>> =
            players.iter().map(|p| p.nationality.clone()).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO players (team_id, name, position, date_of_birth, country_of_birth, nationality)
            SELECT p.team_id, p.name, p.position, p.date_of_birth, p.country_of_birth, p.nationality
            FROM UNNEST($1::uuid[], $2::text[], $3::text[], $4::date[], $5::text[], $6::text[])
                AS p(team_id, name, position, date_of_birth, country_of_birth, nationality)
            "#,
        )
        .bind(&owners)
        .bind(&names)
        .bind(&positions)
        .bind(&birth_dates)
        .bind(&birth_countries)
        .bind(&nationalities)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() as usize)
    }
}
