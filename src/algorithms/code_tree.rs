//! The Huffman code tree.
//!
//! Nodes live in an arena owned by [`CodeTree`] and refer to each other by [`NodeId`]. Every
//! leaf also remembers its parent, so encoding a symbol walks from its leaf up to the root and
//! never searches the tree.
use std::io;

use thiserror::Error;

use crate::algorithms::{
    bitio::{BitSink, BitSource},
    frequency::{FrequencyTable, SYMBOLS},
    priority::MergeQueue,
};

if_tracing! {
    use tracing::debug;
}

#[derive(Debug, Error)]
pub enum CodeTreeError {
    #[error("code tree is empty, build it from a frequency table with at least one nonzero count")]
    EmptyTree,

    #[error("symbol {0:#04x} has no leaf in the code tree")]
    AbsentSymbol(u8),

    #[error("bit I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeNode {
    /// Sum of the counts of every leaf below this node.
    pub count: u64,
    /// The leaf's symbol. Internal nodes carry the symbol of their left child, which only
    /// matters for ordering merges.
    pub symbol: u8,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl CodeNode {
    const fn leaf(symbol: u8, count: u64) -> Self {
        Self {
            count,
            symbol,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTree {
    nodes: Vec<CodeNode>,
    root: Option<NodeId>,
    leaves: [Option<NodeId>; SYMBOLS],
}

impl Default for CodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeTree {
    /// An empty tree. Encoding or decoding with it fails until [`build`](Self::build) is called.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            leaves: [None; SYMBOLS],
        }
    }

    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        let mut tree = Self::new();
        tree.build(freqs);
        tree
    }

    /// Replaces the tree with one built from `freqs`.
    ///
    /// Symbols with a zero count get no leaf. An all-zero table leaves the tree empty.
    pub fn build(&mut self, freqs: &FrequencyTable) {
        self.nodes.clear();
        self.root = None;
        self.leaves = [None; SYMBOLS];

        let mut queue = MergeQueue::with_capacity(SYMBOLS);
        for (symbol, count) in freqs.iter_present() {
            let id = self.push_node(CodeNode::leaf(symbol, count));
            self.leaves[symbol as usize] = Some(id);
            queue.push(count, symbol, id);
        }

        while queue.len() > 1 {
            let (Some((left_count, symbol, left)), Some((right_count, _, right))) = (queue.pop(), queue.pop()) else {
                break;
            };
            let count = left_count.saturating_add(right_count);
            let parent = self.push_node(CodeNode {
                count,
                symbol,
                left: Some(left),
                right: Some(right),
                parent: None,
            });
            self.nodes[left.0].parent = Some(parent);
            self.nodes[right.0].parent = Some(parent);
            queue.push(count, symbol, parent);
        }

        self.root = queue.pop().map(|(_, _, id)| id);
        debug_assert!(queue.is_empty());

        if_tracing! {
            debug!(target = "code_tree", leaves = self.leaf_count(), nodes = self.nodes.len(), max_depth = self.max_depth(), "built code tree");
        }
    }

    fn push_node(&mut self, node: CodeNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &CodeNode {
        &self.nodes[id.0]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.iter().flatten().count()
    }

    /// Length of the longest code. A single-leaf tree reports 1, matching the bit it emits.
    pub fn max_depth(&self) -> usize {
        self.leaves
            .iter()
            .flatten()
            .map(|&leaf| self.depth_of(leaf).max(1))
            .max()
            .unwrap_or(0)
    }

    fn depth_of(&self, mut node: NodeId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.nodes[node.0].parent {
            depth += 1;
            node = parent;
        }
        depth
    }

    /// Fills `path` with the leaf-to-root bits of `leaf` and returns how many were written.
    fn reverse_path(&self, leaf: NodeId, path: &mut [bool; SYMBOLS]) -> usize {
        let mut depth = 0;
        let mut node = leaf;
        while let Some(parent) = self.nodes[node.0].parent {
            path[depth] = self.nodes[parent.0].right == Some(node);
            depth += 1;
            node = parent;
        }
        depth
    }

    fn leaf_for(&self, symbol: u8) -> Result<NodeId, CodeTreeError> {
        if self.is_empty() {
            return Err(CodeTreeError::EmptyTree);
        }
        self.leaves[symbol as usize].ok_or(CodeTreeError::AbsentSymbol(symbol))
    }

    /// The code of `symbol`, root to leaf, or `None` if it has no leaf.
    pub fn code(&self, symbol: u8) -> Option<Vec<bool>> {
        let leaf = self.leaf_for(symbol).ok()?;
        let mut path = [false; SYMBOLS];
        match self.reverse_path(leaf, &mut path) {
            0 => Some(vec![false]),
            depth => Some(path[..depth].iter().rev().copied().collect()),
        }
    }

    /// Writes the code of `symbol` to `out`, left edges as `0` and right edges as `1`.
    ///
    /// A tree with a single leaf encodes its symbol as the one-bit code `0`.
    pub fn encode<S: BitSink + ?Sized>(&self, symbol: u8, out: &mut S) -> Result<(), CodeTreeError> {
        let leaf = self.leaf_for(symbol)?;
        let mut path = [false; SYMBOLS];
        let depth = self.reverse_path(leaf, &mut path);
        if depth == 0 {
            out.write_bit(false)?;
            return Ok(());
        }
        for &bit in path[..depth].iter().rev() {
            out.write_bit(bit)?;
        }
        Ok(())
    }

    /// Reads bits from `input` until a leaf is reached and returns its symbol.
    pub fn decode<S: BitSource + ?Sized>(&self, input: &mut S) -> Result<u8, CodeTreeError> {
        let mut node = self.root().ok_or(CodeTreeError::EmptyTree)?;
        let root = self.node(node);
        if root.is_leaf() {
            input.read_bit()?;
            return Ok(root.symbol);
        }

        loop {
            let current = self.node(node);
            match (current.left, current.right) {
                (Some(left), Some(right)) => {
                    node = if input.read_bit()? { right } else { left };
                }
                _ => return Ok(current.symbol),
            }
        }
    }
}
