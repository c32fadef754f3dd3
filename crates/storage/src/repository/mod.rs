pub mod competition;
pub mod league;
