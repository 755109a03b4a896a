//! Traversal-scoped graph index
//!
//! Arena of discovered nodes keyed by actor id, plus the FIFO frontier. Back-edges name
//! their predecessor by id instead of holding a reference, so the whole structure is
//! plain data and can be dumped with serde for debugging.
//!
//! An index lives for exactly one search.

use crate::model::{ActorId, TitleId};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::collections::VecDeque;

/// Back-edge recorded when a node is first discovered:
/// `predecessor` co-starred with the node in `title`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub title: TitleId,
    pub predecessor: ActorId,
}

/// A traversal node
///
/// Equality and hashing use the actor id only.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: ActorId,
    pub visited: bool,
    /// `None` only for the start node
    pub back_edge: Option<Edge>,
    /// Hops from the start node
    pub depth: usize,
}

impl Node {
    pub fn new(id: ActorId) -> Self {
        Node {
            id,
            visited: false,
            back_edge: None,
            depth: 0,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Discovered nodes and the frontier of one search
#[derive(Debug, Clone, Serialize)]
pub struct GraphIndex {
    start: ActorId,
    nodes: IndexMap<ActorId, Node, FxBuildHasher>,
    frontier: VecDeque<ActorId>,
}

impl GraphIndex {
    /// Fresh index whose frontier holds only the start node, already visited
    pub fn new(start: ActorId) -> Self {
        let mut nodes = IndexMap::with_hasher(FxBuildHasher);
        let mut root = Node::new(start.clone());
        root.visited = true;
        nodes.insert(start.clone(), root);

        let mut frontier = VecDeque::new();
        frontier.push_back(start.clone());

        GraphIndex {
            start,
            nodes,
            frontier,
        }
    }

    pub fn start(&self) -> &ActorId {
        &self.start
    }

    /// Take the oldest frontier entry
    pub fn pop_front(&mut self) -> Option<ActorId> {
        self.frontier.pop_front()
    }

    pub fn get(&self, id: &ActorId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn is_visited(&self, id: &ActorId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visited)
    }

    /// Record `id` as reached through `via`
    ///
    /// Returns `false` without touching anything when `id` was already visited.
    /// Otherwise the node (new, or an unvisited entry reused) gets its back-edge and
    /// depth, is marked visited and appended to the frontier.
    pub fn discover(&mut self, id: ActorId, via: Edge) -> bool {
        if self.is_visited(&id) {
            return false;
        }

        let depth = self
            .nodes
            .get(&via.predecessor)
            .map(|p| p.depth + 1)
            .unwrap_or(1);

        let node = self
            .nodes
            .entry(id.clone())
            .or_insert_with(|| Node::new(id.clone()));
        node.back_edge = Some(via);
        node.depth = depth;
        node.visited = true;

        self.frontier.push_back(id);
        true
    }

    /// Number of discovered nodes, start included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Nodes in discovery order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Insert a node verbatim, bypassing discovery bookkeeping
    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(title: &str, predecessor: &str) -> Edge {
        Edge {
            title: TitleId::new(title),
            predecessor: ActorId::new(predecessor),
        }
    }

    #[test]
    fn test_new_index_holds_start() {
        let mut index = GraphIndex::new(ActorId::new("nm0000246"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.frontier_len(), 1);
        assert!(index.is_visited(&ActorId::new("nm0000246")));
        assert!(index.get(&ActorId::new("nm0000246")).unwrap().back_edge.is_none());

        assert_eq!(index.pop_front(), Some(ActorId::new("nm0000246")));
        assert_eq!(index.pop_front(), None);
    }

    #[test]
    fn test_frontier_is_fifo() {
        let mut index = GraphIndex::new(ActorId::new("a"));
        index.pop_front();
        assert!(index.discover(ActorId::new("b"), edge("t1", "a")));
        assert!(index.discover(ActorId::new("c"), edge("t1", "a")));
        assert!(index.discover(ActorId::new("d"), edge("t2", "b")));

        assert_eq!(index.pop_front(), Some(ActorId::new("b")));
        assert_eq!(index.pop_front(), Some(ActorId::new("c")));
        assert_eq!(index.pop_front(), Some(ActorId::new("d")));
    }

    #[test]
    fn test_discover_only_once() {
        let mut index = GraphIndex::new(ActorId::new("a"));
        assert!(index.discover(ActorId::new("b"), edge("t1", "a")));
        assert!(!index.discover(ActorId::new("b"), edge("t2", "a")));
        assert!(!index.discover(ActorId::new("a"), edge("t1", "b")));

        // the first back-edge is never overwritten
        let b = index.get(&ActorId::new("b")).unwrap();
        assert_eq!(b.back_edge, Some(edge("t1", "a")));
        assert_eq!(index.frontier_len(), 2);
    }

    #[test]
    fn test_depth_follows_predecessor() {
        let mut index = GraphIndex::new(ActorId::new("a"));
        index.discover(ActorId::new("b"), edge("t1", "a"));
        index.discover(ActorId::new("c"), edge("t2", "b"));

        assert_eq!(index.get(&ActorId::new("a")).unwrap().depth, 0);
        assert_eq!(index.get(&ActorId::new("b")).unwrap().depth, 1);
        assert_eq!(index.get(&ActorId::new("c")).unwrap().depth, 2);
    }

    #[test]
    fn test_unvisited_entry_is_reused() {
        let mut index = GraphIndex::new(ActorId::new("a"));
        index.insert_raw(Node::new(ActorId::new("b")));
        assert!(!index.is_visited(&ActorId::new("b")));

        assert!(index.discover(ActorId::new("b"), edge("t1", "a")));
        assert_eq!(index.len(), 2);
        assert!(index.is_visited(&ActorId::new("b")));
    }

    #[test]
    fn test_node_value_equality() {
        let n1 = Node::new(ActorId::new("nm0000102"));
        let n2 = Node::new(ActorId::new("nm0000102"));
        let n3 = Node::new(ActorId::new("nm0000246"));

        assert_eq!(n1, n2);
        assert_ne!(n1, n3);

        let mut index = GraphIndex::new(ActorId::new("nm0000246"));
        index.discover(ActorId::new("nm0000102"), edge("tt0112384", "nm0000246"));
        assert_eq!(index.get(&ActorId::new("nm0000102")).unwrap(), &n1);
    }

    #[test]
    fn test_serializes_for_debugging() {
        let mut index = GraphIndex::new(ActorId::new("a"));
        index.discover(ActorId::new("b"), edge("t1", "a"));

        let dump = serde_json::to_value(&index).unwrap();
        assert_eq!(dump["start"], "a");
        assert_eq!(dump["nodes"]["b"]["back_edge"]["predecessor"], "a");
        assert_eq!(dump["frontier"][0], "a");
    }
}
