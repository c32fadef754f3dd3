use importer::{CompetitionImporter, ImportContext, ImportOutcome};

use crate::state::AppState;

/// Run one import with the caller's upstream token
pub async fn import_league(
    state: &AppState,
    code: &str,
    auth_token: Option<String>,
) -> ImportOutcome {
    let context = ImportContext {
        store: state.store.clone(),
        auth_token,
    };

    state.importer.import(code, &context).await
}
