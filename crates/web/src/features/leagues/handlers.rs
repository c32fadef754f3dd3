use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use importer::{ImportOutcome, sources::football_data::AUTH_HEADER};
use serde::Deserialize;
use storage::dto::common::MessageResponse;
use utoipa::IntoParams;

use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImportLeagueQuery {
    /// football-data.org API token, read from the `X-Auth-Token` header when absent
    #[serde(rename = "X-Auth-Token")]
    pub token: Option<String>,
}

#[utoipa::path(
    get,
    path = "/import-league/{league_code}",
    params(
        ("league_code" = String, Path, description = "Competition code, e.g. ELC"),
        ImportLeagueQuery
    ),
    responses(
        (status = 201, description = "Successfully imported", body = MessageResponse),
        (status = 404, description = "Competition unknown upstream", body = MessageResponse),
        (status = 409, description = "League already imported", body = MessageResponse),
        (status = 504, description = "Upstream or database failure", body = MessageResponse)
    ),
    tag = "leagues"
)]
pub async fn import_league(
    State(state): State<AppState>,
    Path(league_code): Path<String>,
    Query(query): Query<ImportLeagueQuery>,
    headers: HeaderMap,
) -> Response {
    let token = query.token.or_else(|| {
        headers
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    });

    let outcome = services::import_league(&state, &league_code, token).await;

    (
        status_for(outcome),
        Json(MessageResponse::new(outcome.message())),
    )
        .into_response()
}

pub fn status_for(outcome: ImportOutcome) -> StatusCode {
    match outcome {
        ImportOutcome::Imported => StatusCode::CREATED,
        ImportOutcome::AlreadyImported => StatusCode::CONFLICT,
        ImportOutcome::NotFound => StatusCode::NOT_FOUND,
        ImportOutcome::ServerError => StatusCode::GATEWAY_TIMEOUT,
    }
}
