use storage::{
    LeagueStore,
    dto::league::{TotalPlayersResponse, normalize_code},
    error::Result,
};

/// Count the stored players of every team in a league
pub async fn total_players(store: &dyn LeagueStore, code: &str) -> Result<TotalPlayersResponse> {
    let total = store.count_players(&normalize_code(code)).await?;

    Ok(TotalPlayersResponse { total })
}
