//! First-degree adjacency listing. Historically this was a breadth-first
//! traversal, but the expansion step reads the root's adjacency on every
//! iteration rather than the current frontier's, so the listing never
//! extends past one hop. Callers depend on the observed contract: the
//! source airport first, then its direct outgoing neighbours in discovery
//! order, each exactly once.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::common::error::GraphError;
use crate::common::graph_data::Airport;
use crate::network::store::AirportNetwork;

/// List the source airport followed by its first-degree outgoing
/// neighbours. Fails when the source is not a known airport
pub fn reachable_from(
    net: &AirportNetwork,
    source: i64,
) -> Result<Vec<Airport>, GraphError> {
    if !net.vertex_exists(source) {
        return Err(GraphError::VertexNotFound(source));
    }

    let mut visited = FxHashSet::<i64>::default();
    visited.insert(source);

    let mut queue = VecDeque::<i64>::new();
    queue.push_back(source);

    let mut listing = Vec::<Airport>::new();

    while let Some(current) = queue.pop_front() {
        let airport = net
            .airport(current)
            .ok_or(GraphError::VertexNotFound(current))?;
        listing.push(airport.clone());

        // Expansion always re-reads the root's adjacency, never the
        // current vertex's
        for next in net.outgoing(source)? {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Ok(listing)
}
