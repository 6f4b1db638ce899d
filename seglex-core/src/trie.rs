//! Segment trie for affix and compound matching
//!
//! Nodes live in one contiguous arena and are addressed by [`NodeId`]. A
//! node's identity is its index, so walkers can key state by node without
//! holding references into the trie.
//!
//! Construction is two-phase: a [`SegmentTrieBuilder`] collects patterns and
//! [`SegmentTrieBuilder::build`] freezes them into an immutable
//! [`SegmentTrie`] that can be shared across threads.

use std::collections::HashMap;
use std::fmt;

/// Index of a node inside a [`SegmentTrie`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node of every trie
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Case folding applied to both dictionary patterns and text
///
/// Only the first character of the lowercase mapping is kept so that one
/// text character always consumes exactly one trie edge.
#[inline]
pub fn fold(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes: char -> node index
    children: HashMap<char, u32>,
    /// Whether some pattern ends exactly here
    terminal: bool,
}

/// Mutable trie under construction
#[derive(Debug, Clone)]
pub struct SegmentTrieBuilder {
    nodes: Vec<TrieNode>,
    patterns: usize,
}

impl Default for SegmentTrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentTrieBuilder {
    /// Create a builder holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            patterns: 0,
        }
    }

    /// Insert a pattern, optionally reversed, case-folded char by char
    ///
    /// Inserting an empty pattern is a no-op: the root is never terminal.
    pub fn insert(&mut self, pattern: &str, reversed: bool) {
        if pattern.is_empty() {
            return;
        }
        if reversed {
            self.insert_chars(pattern.chars().rev());
        } else {
            self.insert_chars(pattern.chars());
        }
        self.patterns += 1;
    }

    fn insert_chars(&mut self, chars: impl Iterator<Item = char>) {
        let mut current_idx = 0u32;

        for ch in chars.map(fold) {
            let next_idx = match self.nodes[current_idx as usize].children.get(&ch) {
                Some(&child_idx) => child_idx,
                None => {
                    let new_idx = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[current_idx as usize]
                        .children
                        .insert(ch, new_idx);
                    new_idx
                }
            };
            current_idx = next_idx;
        }

        self.nodes[current_idx as usize].terminal = true;
    }

    /// Number of patterns inserted so far
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// Freeze the builder into a read-only trie
    pub fn build(mut self) -> SegmentTrie {
        self.nodes.shrink_to_fit();
        SegmentTrie {
            nodes: self.nodes,
            patterns: self.patterns,
        }
    }
}

/// Immutable prefix tree over case-folded characters
#[derive(Debug, Clone)]
pub struct SegmentTrie {
    nodes: Vec<TrieNode>,
    patterns: usize,
}

impl SegmentTrie {
    /// Build a trie directly from `(pattern, reversed)` pairs
    pub fn from_patterns<'a, I>(patterns: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut builder = SegmentTrieBuilder::new();
        for (pattern, reversed) in patterns {
            builder.insert(pattern, reversed);
        }
        builder.build()
    }

    /// The root node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Follow the edge labelled `ch` (already folded) from `node`
    #[inline]
    pub fn get(&self, node: NodeId, ch: char) -> Option<NodeId> {
        self.nodes[node.index()].children.get(&ch).copied().map(NodeId)
    }

    /// True if a pattern ends exactly at `node`
    #[inline]
    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.nodes[node.index()].terminal
    }

    /// Exact, case-insensitive membership test for a whole pattern
    pub fn contains<I>(&self, chars: I) -> bool
    where
        I: IntoIterator<Item = char>,
    {
        let mut node = self.root();
        for ch in chars {
            match self.get(node, fold(ch)) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.is_terminal(node)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no pattern was inserted
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of patterns the trie was built from (duplicates included)
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    fn render(&self, node: NodeId, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut children: Vec<(&char, &u32)> = self.nodes[node.index()].children.iter().collect();
        children.sort_unstable_by_key(|(ch, _)| **ch);

        for (ch, &child) in children {
            let child = NodeId(child);
            write!(f, "{:indent$}{}", "", ch, indent = depth * 2)?;
            if self.is_terminal(child) {
                write!(f, " *")?;
            }
            writeln!(f)?;
            self.render(child, depth + 1, f)?;
        }
        Ok(())
    }
}

/// Indented dump of the tree, terminal nodes marked with `*`
impl fmt::Display for SegmentTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(self.root(), 0, f)
    }
}
