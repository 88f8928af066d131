//! Huffman tree construction and code assignment.
//!
//! The tree lives in an arena (`Vec<Node>`) and nodes refer to their
//! children by index. Dropping the tree frees the arena in one step, so
//! deep or skewed trees never recurse on drop, and the code-table walk uses
//! an explicit stack for the same reason.
//!
//! # Construction
//!
//! Leaves are seeded into a `PriorityQueue` in ascending symbol order. The
//! two minimum-frequency nodes are popped, merged into an internal node with
//! (first popped, second popped) as (left, right), and the merge is pushed
//! back until one node remains. Equal frequencies pop in insertion order,
//! so the same frequency table always yields the same tree.
//!
//! # Codes
//!
//! A left edge appends bit 0 and a right edge appends bit 1. A tree whose
//! root is a leaf (one distinct symbol) assigns that symbol the one-bit
//! code `1`, so zero padding never reads as another copy of it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::heap::PriorityQueue;

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count per byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create a table with every count at zero.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Symbols with a positive count, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Number of symbols with a positive count.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Sum of all counts (the input length).
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |sum, &count| sum.saturating_add(count))
    }

    pub fn is_empty(&self) -> bool {
        self.distinct_symbols() == 0
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// A node of the Huffman tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Queue entry during construction. Compares by frequency only so that
/// the queue's insertion-order tie-break decides between equal weights.
#[derive(Debug, Clone, Copy)]
struct Pending {
    freq: u64,
    id: NodeId,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.freq.cmp(&other.freq)
    }
}

/// Huffman tree stored as an arena of nodes.
///
/// # Invariants
/// - A tree over N distinct symbols has N leaves and N-1 internal nodes
/// - Every internal node has exactly two children
/// - Every node except the root has exactly one parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a tree from symbol frequencies.
    ///
    /// # Errors
    /// Returns `HuffmanError::EmptyInput` if no symbol has a positive count.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let distinct = frequencies.distinct_symbols();
        if distinct == 0 {
            return Err(HuffmanError::EmptyInput.into());
        }

        let mut nodes = Vec::with_capacity(2 * distinct - 1);
        let mut queue = PriorityQueue::new();

        for (symbol, freq) in frequencies.iter() {
            queue.push(Pending {
                freq,
                id: nodes.len(),
            });
            nodes.push(Node::Leaf { symbol, freq });
        }

        while queue.size() > 1 {
            let left = queue.pop()?;
            let right = queue.pop()?;

            let freq = left.freq.saturating_add(right.freq);
            queue.push(Pending {
                freq,
                id: nodes.len(),
            });
            nodes.push(Node::Internal {
                freq,
                left: left.id,
                right: right.id,
            });
        }

        let root = queue.pop()?.id;
        let tree = Self { nodes, root };

        tracing::trace!(
            symbols = distinct,
            nodes = tree.nodes.len(),
            depth = tree.depth(),
            "built huffman tree"
        );

        Ok(tree)
    }

    /// Build a tree from the byte frequencies of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::build(&FrequencyTable::from_bytes(data))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    ///
    /// Returns `None` when `id` is a leaf (there is no edge to follow).
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    /// Symbol stored at `id`, if it is a leaf.
    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.nodes[id] {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Recover the frequency table from the leaves.
    pub fn frequencies(&self) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for node in &self.nodes {
            if let Node::Leaf { symbol, freq } = *node {
                table.set(symbol, freq);
            }
        }
        table
    }

    /// Assign every leaf its root-to-leaf path as a code.
    ///
    /// Traversal is depth-first, left before right.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = BTreeMap::new();

        if let Node::Leaf { symbol, .. } = self.nodes[self.root] {
            codes.insert(symbol, Code(vec![true]));
            return CodeTable { codes };
        }

        let mut stack = vec![(self.root, Code::default())];
        while let Some((id, path)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => {
                    codes.insert(symbol, path);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.0.push(true);
                    let mut left_path = path;
                    left_path.0.push(false);

                    stack.push((right, right_path));
                    stack.push((left, left_path));
                }
            }
        }

        CodeTable { codes }
    }
}

/// One symbol's code: the root-to-leaf path, `false` = 0 = left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a `HuffmanTree`. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Exact length of the encoded bitstream for these frequencies.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, freq)| {
                self.get(symbol)
                    .map(|code| freq.saturating_mul(code.len() as u64))
            })
            .fold(0u64, u64::saturating_add)
    }
}
