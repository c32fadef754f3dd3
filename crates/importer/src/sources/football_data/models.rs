use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Area {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CompetitionRecord {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub area: Option<Area>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TeamRecord {
    pub id: i64,
    pub name: String,
    pub tla: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub area: Option<Area>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SquadResponse {
    #[serde(default)]
    pub squad: Vec<SquadMember>,
}

/// One roster entry; squads mix players with coaching staff.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SquadMember {
    pub name: String,
    pub position: Option<String>,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "countryOfBirth")]
    pub country_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub role: Option<String>,
}
