use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Competition row about to be written by an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompetition {
    pub name: String,
    pub code: String,
    pub area_name: String,
}

/// Team row about to be written, owned by the competition named by `competition_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub competition_code: String,
    pub name: String,
    pub tla: String,
    pub short_name: String,
    pub area_name: String,
    pub email: Option<String>,
}

/// Player row about to be written, owned by the team whose tla is `team_tla`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub team_tla: String,
    pub name: String,
    pub position: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub country_of_birth: Option<String>,
    pub nationality: Option<String>,
}

/// The full competition -> teams -> players hierarchy of one import.
///
/// Teams reference their competition by code and players reference their
/// team by tla; the repository resolves both to row ids inside the
/// persisting transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeague {
    pub competition: NewCompetition,
    pub teams: Vec<NewTeam>,
    pub players: Vec<NewPlayer>,
}

/// Summary of a committed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportedLeague {
    pub competition_id: Uuid,
    pub teams: usize,
    pub players: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TotalPlayersResponse {
    pub total: i64,
}

/// Canonical form of a competition code, the single key used for the
/// existence check, the stored row and the player count.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
