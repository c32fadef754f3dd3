mod competition;
mod player;
mod team;

pub use competition::Competition;
pub use player::Player;
pub use team::Team;
