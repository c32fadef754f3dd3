pub mod leagues;
pub mod players;
