use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub competition_id: Uuid,
    pub name: String,
    pub tla: String,
    pub short_name: String,
    pub area_name: String,
    pub email: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}
