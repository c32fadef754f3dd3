use axum::{Router, routing::get};

use super::handlers::total_players;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/total-players/:league_code", get(total_players))
}
