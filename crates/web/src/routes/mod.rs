use axum::Router;

use crate::features::{leagues, players};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(leagues::routes::routes())
        .merge(players::routes::routes())
        .with_state(state)
}
