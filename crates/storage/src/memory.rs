//! In-process `LeagueStore` used by tests across the workspace.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::LeagueStore;
use crate::dto::league::{ImportedLeague, NewCompetition, NewLeague, NewPlayer, NewTeam};
use crate::error::{Result, StorageError};
use crate::models::{Competition, Player, Team};

#[derive(Debug, Default)]
struct Tables {
    competitions: Vec<Competition>,
    teams: Vec<Team>,
    players: Vec<Player>,
}

/// Keeps rows in memory with the same uniqueness and all-or-nothing rules
/// as the PostgreSQL repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `insert_league` fail like a lost connection.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn competitions(&self) -> Vec<Competition> {
        self.lock().competitions.clone()
    }

    pub fn teams(&self) -> Vec<Team> {
        self.lock().teams.clone()
    }

    pub fn players(&self) -> Vec<Player> {
        self.lock().players.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl LeagueStore for MemoryStore {
    async fn competition_exists(&self, code: &str) -> Result<bool> {
        Ok(self.lock().competitions.iter().any(|c| c.code == code))
    }

    async fn insert_league(&self, league: &NewLeague) -> Result<ImportedLeague> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }

        let now = Utc::now().naive_utc();
        let mut tables = self.lock();

        if tables
            .competitions
            .iter()
            .any(|c| c.code == league.competition.code)
        {
            return Err(StorageError::AlreadyExists(format!(
                "Competition '{}' already imported",
                league.competition.code
            )));
        }

        // Rows are staged first so a failure leaves the tables untouched
        let competition = Competition {
            competition_id: Uuid::new_v4(),
            name: league.competition.name.clone(),
            code: league.competition.code.clone(),
            area_name: league.competition.area_name.clone(),
            created_at: now,
        };

        let mut team_ids: HashMap<&str, Uuid> = HashMap::new();
        let mut teams = Vec::with_capacity(league.teams.len());
        for team in &league.teams {
            if team.competition_code != competition.code {
                return Err(StorageError::ConstraintViolation(format!(
                    "Team '{}' belongs to competition '{}'",
                    team.tla, team.competition_code
                )));
            }
            if team_ids.contains_key(team.tla.as_str()) {
                return Err(StorageError::ConstraintViolation(format!(
                    "Duplicate team tla '{}'",
                    team.tla
                )));
            }
            let team_id = Uuid::new_v4();
            team_ids.insert(team.tla.as_str(), team_id);
            teams.push(Team {
                team_id,
                competition_id: competition.competition_id,
                name: team.name.clone(),
                tla: team.tla.clone(),
                short_name: team.short_name.clone(),
                area_name: team.area_name.clone(),
                email: team.email.clone(),
                created_at: now,
            });
        }

        let mut players = Vec::with_capacity(league.players.len());
        for player in &league.players {
            let team_id = team_ids.get(player.team_tla.as_str()).ok_or_else(|| {
                StorageError::ConstraintViolation(format!(
                    "Player '{}' references unknown team '{}'",
                    player.name, player.team_tla
                ))
            })?;
            players.push(Player {
                player_id: Uuid::new_v4(),
                team_id: *team_id,
                name: player.name.clone(),
                position: player.position.clone(),
                date_of_birth: player.date_of_birth,
                country_of_birth: player.country_of_birth.clone(),
                nationality: player.nationality.clone(),
                created_at: now,
            });
        }

        let imported = ImportedLeague {
            competition_id: competition.competition_id,
            teams: teams.len(),
            players: players.len(),
        };

        tables.competitions.push(competition);
        tables.teams.extend(teams);
        tables.players.extend(players);

        Ok(imported)
    }

    async fn count_players(&self, code: &str) -> Result<i64> {
        let tables = self.lock();
        let competition = tables
            .competitions
            .iter()
            .find(|c| c.code == code)
            .ok_or(StorageError::NotFound)?;

        let total = tables
            .teams
            .iter()
            .filter(|t| t.competition_id == competition.competition_id)
            .map(|t| tables.players.iter().filter(|p| p.team_id == t.team_id).count())
            .sum::<usize>();

        Ok(total as i64)
    }
}

/// Builds a league whose teams hold `squad_sizes[i]` players each.
pub fn sample_league(code: &str, squad_sizes: &[usize]) -> NewLeague {
    let competition = NewCompetition {
        name: format!("{code} League"),
        code: code.to_string(),
        area_name: "England".to_string(),
    };

    let mut teams = Vec::new();
    let mut players = Vec::new();
    for (index, size) in squad_sizes.iter().enumerate() {
        let tla = format!("T{index:02}");
        for number in 0..*size {
            players.push(NewPlayer {
                team_tla: tla.clone(),
                name: format!("Player {number} of {tla}"),
                position: Some("Midfielder".to_string()),
                date_of_birth: NaiveDate::from_ymd_opt(1995, 3, 2),
                country_of_birth: Some("England".to_string()),
                nationality: Some("England".to_string()),
            });
        }
        teams.push(NewTeam {
            competition_code: code.to_string(),
            name: format!("Team {index}"),
            tla,
            short_name: format!("Team {index}"),
            area_name: "England".to_string(),
            email: None,
        });
    }

    NewLeague {
        competition,
        teams,
        players,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_players_across_all_teams_of_a_competition() {
        let store = MemoryStore::new();
        store.insert_league(&sample_league("ELC", &[3, 2])).await.unwrap();
        store.insert_league(&sample_league("PL", &[4])).await.unwrap();

        assert_eq!(store.count_players("ELC").await.unwrap(), 5);
        assert_eq!(store.count_players("PL").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let store = MemoryStore::new();

        assert!(matches!(
            store.count_players("XYZ").await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn second_insert_of_a_code_is_rejected() {
        let store = MemoryStore::new();
        store.insert_league(&sample_league("ELC", &[1])).await.unwrap();

        let err = store
            .insert_league(&sample_league("ELC", &[2]))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::AlreadyExists(_)));
        assert_eq!(store.players().len(), 1);
    }

    #[tokio::test]
    async fn dangling_player_leaves_nothing_behind() {
        let store = MemoryStore::new();
        let mut league = sample_league("ELC", &[2]);
        league.players[1].team_tla = "NOPE".to_string();

        let err = store.insert_league(&league).await.unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(_)));
        assert!(store.competitions().is_empty());
        assert!(store.teams().is_empty());
        assert!(store.players().is_empty());
    }
}
