use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub position: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub country_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
