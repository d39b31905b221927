use std::collections::VecDeque;

use super::board::Board;
use super::grid::Line;

/// Index of a node in a [`GameTree`].
pub type NodeId = usize;

/// Build state of a node's children list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    NotBuilt,
    Building,
    Built(Vec<NodeId>),
}

#[derive(Debug, Clone)]
struct TreeNode {
    board: Board,
    children: Children,
}

/// Arena of boards. Each node's children (one per legal move) are built at
/// most once, appended to the arena and referenced by index from the parent.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
}

impl GameTree {
    /// Create a tree holding a single root board at index 0.
    pub fn new(root: Board) -> Self {
        GameTree {
            nodes: vec![TreeNode {
                board: root,
                children: Children::NotBuilt,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn board(&self, id: NodeId) -> &Board {
        &self.nodes[id].board
    }

    pub fn children_state(&self, id: NodeId) -> &Children {
        &self.nodes[id].children
    }

    /// Children of `id` if already built.
    pub fn built_children(&self, id: NodeId) -> Option<&[NodeId]> {
        match &self.nodes[id].children {
            Children::Built(ids) => Some(ids.as_slice()),
            _ => None,
        }
    }

    /// Build the children of `id` on first call; later calls return the cached list.
    pub fn expand(&mut self, id: NodeId) -> &[NodeId] {
        if matches!(self.nodes[id].children, Children::NotBuilt) {
            self.nodes[id].children = Children::Building;

            let successors = self.nodes[id].board.successors();
            let mut ids = Vec::with_capacity(successors.len());
            for board in successors {
                ids.push(self.nodes.len());
                self.nodes.push(TreeNode {
                    board,
                    children: Children::NotBuilt,
                });
            }
            self.nodes[id].children = Children::Built(ids);
        }

        match &self.nodes[id].children {
            Children::Built(ids) => ids.as_slice(),
            Children::NotBuilt | Children::Building => {
                unreachable!("children of node {id} are built above")
            }
        }
    }

    /// The child of `id` reached by drawing `line`, building children if needed.
    pub fn child_for(&mut self, id: NodeId, line: Line) -> Option<NodeId> {
        let children = self.expand(id).to_vec();
        children
            .into_iter()
            .find(|&child| self.nodes[child].board.last_move().map(|m| m.line) == Some(line))
    }

    /// Average of the simple score over every continuation down to the absolute
    /// move count `horizon`, or to the end of the game if that comes first.
    pub fn score(&mut self, id: NodeId, horizon: usize) -> f64 {
        let board = &self.nodes[id].board;
        if board.moves_made() >= horizon || board.is_terminal() {
            return f64::from(board.simple_score());
        }

        let children = self.expand(id).to_vec();
        let total: f64 = children
            .iter()
            .map(|&child| self.score(child, horizon))
            .sum();
        total / children.len() as f64
    }

    /// Copy the subtree under `id` into a fresh arena and return its new index
    /// (always the root, 0). Built children lists are carried over as built.
    pub fn retain_subtree(&mut self, id: NodeId) -> NodeId {
        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut queue: VecDeque<(NodeId, NodeId)> = VecDeque::new();

        nodes.push(TreeNode {
            board: self.nodes[id].board.clone(),
            children: Children::NotBuilt,
        });
        queue.push_back((id, 0));

        while let Some((old, new)) = queue.pop_front() {
            if let Children::Built(old_children) = &self.nodes[old].children {
                let mut new_children = Vec::with_capacity(old_children.len());
                for &old_child in old_children {
                    let new_child = nodes.len();
                    nodes.push(TreeNode {
                        board: self.nodes[old_child].board.clone(),
                        children: Children::NotBuilt,
                    });
                    new_children.push(new_child);
                    queue.push_back((old_child, new_child));
                }
                nodes[new].children = Children::Built(new_children);
            }
        }

        self.nodes = nodes;
        0
    }
}
