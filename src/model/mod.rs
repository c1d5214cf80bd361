mod history;
mod match_stats;
mod player;
mod season;
mod team;

pub use history::*;
pub use match_stats::*;
pub use player::*;
pub use season::*;
pub use team::*;
