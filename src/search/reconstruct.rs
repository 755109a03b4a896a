//! Path reconstruction
//!
//! Walks back-edges from the matched node to the start node. No I/O.

use super::index::GraphIndex;
use crate::error::{SearchError, SearchResult};
use crate::model::{ActorId, Hop, Path};

/// Rebuild the route from the index start to `matched`
///
/// Fails with `SearchError::Corrupt` if a node on the way is missing from the index,
/// the walk ends anywhere but the start node, or it runs longer than the index is
/// large (a cycle).
pub fn reconstruct(index: &GraphIndex, matched: &ActorId) -> SearchResult<Path> {
    let mut hops = Vec::new();
    let mut current = matched.clone();

    loop {
        let node = index
            .get(&current)
            .ok_or_else(|| SearchError::Corrupt(format!("{} is not in the index", current)))?;

        let Some(edge) = &node.back_edge else {
            break;
        };

        if hops.len() >= index.len() {
            return Err(SearchError::Corrupt(format!(
                "back-edge cycle through {}",
                current
            )));
        }

        hops.push(Hop {
            title: edge.title.clone(),
            actor: current,
        });
        current = edge.predecessor.clone();
    }

    if &current != index.start() {
        return Err(SearchError::Corrupt(format!(
            "walk ended at {} instead of start {}",
            current,
            index.start()
        )));
    }

    hops.reverse();
    Ok(Path {
        start: current,
        hops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TitleId;
    use crate::search::index::{Edge, Node};

    fn edge(title: &str, predecessor: &str) -> Edge {
        Edge {
            title: TitleId::new(title),
            predecessor: ActorId::new(predecessor),
        }
    }

    #[test]
    fn test_start_node_gives_empty_path() {
        let index = GraphIndex::new(ActorId::new("nm0000102"));
        let path = reconstruct(&index, &ActorId::new("nm0000102")).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.start, ActorId::new("nm0000102"));
    }

    #[test]
    fn test_multi_hop() {
        let mut index = GraphIndex::new(ActorId::new("a"));
        index.discover(ActorId::new("b"), edge("t1", "a"));
        index.discover(ActorId::new("x"), edge("t9", "a"));
        index.discover(ActorId::new("c"), edge("t2", "b"));
        index.discover(ActorId::new("d"), edge("t3", "c"));

        let path = reconstruct(&index, &ActorId::new("d")).unwrap();
        assert_eq!(path.to_string(), "a -[t1]-> b -[t2]-> c -[t3]-> d");
        assert_eq!(path.len(), 3);
        assert_eq!(path.end(), &ActorId::new("d"));
    }

    #[test]
    fn test_missing_node() {
        let index = GraphIndex::new(ActorId::new("a"));
        let err = reconstruct(&index, &ActorId::new("zz")).unwrap_err();
        assert!(matches!(err, SearchError::Corrupt(_)));
    }

    #[test]
    fn test_dangling_predecessor() {
        let mut index = GraphIndex::new(ActorId::new("a"));
        let mut orphan = Node::new(ActorId::new("b"));
        orphan.visited = true;
        orphan.back_edge = Some(edge("t1", "ghost"));
        index.insert_raw(orphan);

        let err = reconstruct(&index, &ActorId::new("b")).unwrap_err();
        assert!(matches!(err, SearchError::Corrupt(msg) if msg.contains("ghost")));
    }

    #[test]
    fn test_cycle_is_detected() {
        let mut index = GraphIndex::new(ActorId::new("a"));
        let mut b = Node::new(ActorId::new("b"));
        b.back_edge = Some(edge("t1", "c"));
        let mut c = Node::new(ActorId::new("c"));
        c.back_edge = Some(edge("t2", "b"));
        index.insert_raw(b);
        index.insert_raw(c);

        let err = reconstruct(&index, &ActorId::new("b")).unwrap_err();
        assert!(matches!(err, SearchError::Corrupt(msg) if msg.contains("cycle")));
    }
}
