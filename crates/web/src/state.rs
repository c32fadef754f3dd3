use std::sync::Arc;

use importer::CompetitionImporter;
use storage::LeagueStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LeagueStore>,
    pub importer: Arc<dyn CompetitionImporter>,
}

impl AppState {
    pub fn new(store: Arc<dyn LeagueStore>, importer: Arc<dyn CompetitionImporter>) -> Self {
        Self { store, importer }
    }
}
