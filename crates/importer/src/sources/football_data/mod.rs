mod client;
pub mod mapper;
mod models;

pub use client::{AUTH_HEADER, DEFAULT_BASE_URL, FootballDataClient};
pub use models::*;

use storage::dto::league::{ImportedLeague, NewLeague, normalize_code};
use tracing::{error, info, warn};

use crate::traits::{CompetitionImporter, ImportContext, ImportOutcome};
use crate::Result;

/// Imports a competition, its teams and their players from football-data.org.
///
/// Every upstream resource is fetched before anything is mapped, and the
/// mapped hierarchy is written in a single storage transaction.
pub struct FootballDataImporter {
    client: FootballDataClient,
}

struct FetchedLeague {
    competition: CompetitionRecord,
    teams: Vec<TeamRecord>,
    squads: Vec<Vec<SquadMember>>,
}

impl FootballDataImporter {
    pub fn new(client: FootballDataClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, code: &str, token: Option<&str>) -> Result<FetchedLeague> {
        let competition = self.client.fetch_competition(code, token).await?;
        info!(
            "Fetched competition '{}' (id {})",
            competition.name, competition.id
        );

        let teams = self.client.fetch_teams(competition.id, token).await?;
        info!("Fetching squads of {} teams", teams.len());

        let mut squads = Vec::with_capacity(teams.len());
        for team in &teams {
            squads.push(self.client.fetch_squad(team.id, token).await?);
        }

        Ok(FetchedLeague {
            competition,
            teams,
            squads,
        })
    }

    fn map(fetched: &FetchedLeague) -> Result<NewLeague> {
        let competition = mapper::to_competition(&fetched.competition)?;
        let teams = mapper::to_teams(&fetched.teams, &competition)?;

        let mut players = Vec::new();
        for (team, squad) in teams.iter().zip(&fetched.squads) {
            players.extend(mapper::to_players(squad, team)?);
        }

        Ok(NewLeague {
            competition,
            teams,
            players,
        })
    }

    async fn run(&self, code: &str, context: &ImportContext) -> Result<ImportedLeague> {
        let fetched = self.fetch(code, context.auth_token.as_deref()).await?;
        let league = Self::map(&fetched)?;
        Ok(context.store.insert_league(&league).await?)
    }
}

#[async_trait::async_trait]
impl CompetitionImporter for FootballDataImporter {
    async fn import(&self, code: &str, context: &ImportContext) -> ImportOutcome {
        let code = normalize_code(code);
        let code = code.as_str();

        match context.store.competition_exists(code).await {
            Ok(true) => {
                warn!("League '{}' already imported", code);
                return ImportOutcome::AlreadyImported;
            }
            Ok(false) => {}
            Err(e) => {
                error!("Could not check whether '{}' was imported: {}", code, e);
                return ImportOutcome::ServerError;
            }
        }

        info!("Importing league '{}' from {}", code, self.name());
        match self.run(code, context).await {
            Ok(imported) => {
                info!(
                    "Imported league '{}': {} teams, {} players",
                    code, imported.teams, imported.players
                );
                ImportOutcome::Imported
            }
            Err(e) if e.is_already_imported() => {
                warn!("League '{}' was imported concurrently", code);
                ImportOutcome::AlreadyImported
            }
            Err(e) if e.is_not_found() => {
                warn!("League '{}' not found upstream: {}", code, e);
                ImportOutcome::NotFound
            }
            Err(e) => {
                error!("Import of league '{}' failed: {}", code, e);
                ImportOutcome::ServerError
            }
        }
    }

    fn name(&self) -> &'static str {
        "football-data.org"
    }
}
