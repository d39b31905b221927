use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::{GameError, Precondition};
use crate::game::{GameTree, Line, NodeId};

use super::agent::Agent;

/// An agent that selects uniformly at random from the undrawn lines.
pub struct RandomAgent {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Reproducible agent for tests and headless matches.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_line(&mut self, tree: &mut GameTree, node: NodeId) -> Result<Line, GameError> {
        let lines = tree.board(node).legal_lines();
        if lines.is_empty() {
            return Err(Precondition::GameOver.into());
        }
        let idx = self.rng.random_range(0..lines.len());
        Ok(lines[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn clone_agent(&self) -> Box<dyn Agent> {
        match self.seed {
            Some(seed) => Box::new(RandomAgent::with_seed(seed)),
            None => Box::new(RandomAgent::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Grid, Side};

    fn tree() -> GameTree {
        GameTree::new(Board::new(Grid::new(3, 3).unwrap(), Side::Player, false))
    }

    #[test]
    fn test_random_agent_selects_legal_line() {
        let mut agent = RandomAgent::new();
        let mut tree = tree();
        let root = tree.root();

        for _ in 0..100 {
            let line = agent.select_line(&mut tree, root).unwrap();
            assert!(tree.board(root).check_legal(line).is_ok(), "{line} is not legal");
        }
    }

    #[test]
    fn test_random_agent_plays_full_game() {
        let mut agent = RandomAgent::with_seed(3);
        let mut tree = tree();
        let mut node = tree.root();

        while !tree.board(node).is_terminal() {
            let line = agent.select_line(&mut tree, node).unwrap();
            node = tree.child_for(node, line).unwrap();
        }
        assert_eq!(tree.board(node).moves_made(), 12);
        assert_eq!(
            agent.select_line(&mut tree, node),
            Err(GameError::PreconditionViolation(Precondition::GameOver))
        );
    }

    #[test]
    fn test_seeded_agents_agree() {
        let mut a = RandomAgent::with_seed(11);
        let mut b = RandomAgent::with_seed(11);
        let mut tree = tree();
        let root = tree.root();
        for _ in 0..20 {
            assert_eq!(
                a.select_line(&mut tree, root).unwrap(),
                b.select_line(&mut tree, root).unwrap()
            );
        }
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
