mod agent;
mod averaging;
mod random;

pub use agent::Agent;
pub use averaging::{choose_move, scored_children, AveragingOpponent};
pub use random::RandomAgent;
