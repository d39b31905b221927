use crate::error::GameError;
use crate::game::{GameTree, Line, NodeId};

/// Universal interface for anything that picks lines: the look-ahead opponent,
/// or a stand-in for the human side in headless games.
pub trait Agent {
    /// Select a line to draw on the board at `node`. The tree is shared so an
    /// agent can expand and score nodes that the game will later reuse.
    fn select_line(&mut self, tree: &mut GameTree, node: NodeId) -> Result<Line, GameError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Clone the agent into a boxed trait object.
    fn clone_agent(&self) -> Box<dyn Agent>;
}
