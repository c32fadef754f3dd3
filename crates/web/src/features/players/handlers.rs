use axum::{
    Json,
    extract::{Path, State},
};
use storage::dto::{common::MessageResponse, league::TotalPlayersResponse};

use crate::error::WebResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/total-players/{league_code}",
    params(
        ("league_code" = String, Path, description = "Competition code, e.g. ELC")
    ),
    responses(
        (status = 200, description = "Number of stored players in the league", body = TotalPlayersResponse),
        (status = 404, description = "League not imported", body = MessageResponse)
    ),
    tag = "players"
)]
pub async fn total_players(
    State(state): State<AppState>,
    Path(league_code): Path<String>,
) -> WebResult<Json<TotalPlayersResponse>> {
    let total = services::total_players(state.store.as_ref(), &league_code).await?;

    Ok(Json(total))
}
