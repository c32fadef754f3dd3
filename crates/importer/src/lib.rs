pub mod error;
pub mod retry;
pub mod sources;
pub mod traits;

pub use error::{ImporterError, Result};
pub use retry::RetryPolicy;
pub use traits::{CompetitionImporter, ImportContext, ImportOutcome};

pub use sources::football_data::{FootballDataClient, FootballDataImporter};
