use axum::{Router, routing::get};

use super::handlers::import_league;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/import-league/:league_code", get(import_league))
}
