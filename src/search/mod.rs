//! Shortest co-star path search
//!
//! - `index`: traversal-scoped arena of discovered nodes and the FIFO frontier
//! - `engine`: the breadth-first state machine driving store lookups
//! - `reconstruct`: back-edge walk from the matched node to the start

pub mod engine;
pub mod index;
pub mod reconstruct;

pub use engine::{BfsEngine, Search, SearchReport, SearchState, SearchStats, Traversal};
pub use index::{Edge, GraphIndex, Node};
pub use reconstruct::reconstruct;
