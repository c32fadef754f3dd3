use std::sync::Arc;

use importer::{CompetitionImporter, FootballDataClient, FootballDataImporter, ImportContext};
use storage::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/leagues".to_string());

    let db = Database::new(&database_url).await?;
    db.run_migrations().await?;

    let context = ImportContext {
        store: Arc::new(db),
        auth_token: std::env::var("FOOTBALL_DATA_TOKEN").ok(),
    };

    let importer = FootballDataImporter::new(FootballDataClient::new()?);

    let code = std::env::args().nth(1).unwrap_or_else(|| "ELC".to_string());

    println!("Importing league: {}", code);

    let outcome = importer.import(&code, &context).await;

    println!("{}", outcome);

    Ok(())
}
