pub mod common;
pub mod league;
