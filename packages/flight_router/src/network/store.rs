//! The network store owns the vertex table and the directed adjacency. It is
//! populated once at startup (vertices first, then edges) and read-only for
//! the remainder of the process; queries hand back independently owned
//! collections rather than aliasing into the store.

use petgraph::graph::NodeIndex;
use petgraph::{Directed, Direction, Graph};
use rustc_hash::FxHashMap;

use crate::common::error::GraphError;
use crate::common::graph_data::{Airport, RouteEdge};

/// Directed graph of airports keyed by their integer code. Parallel edges
/// between the same ordered pair are permitted and never deduplicated.
#[derive(Debug, Default)]
pub struct AirportNetwork {
    graph: Graph<Airport, RouteEdge, Directed, u32>,
    code_index: FxHashMap<i64, NodeIndex>,
    route_count: usize,
}

impl AirportNetwork {
    /// Set up an empty network
    pub fn new() -> AirportNetwork {
        AirportNetwork {
            graph: Graph::new(),
            code_index: FxHashMap::default(),
            route_count: 0,
        }
    }

    /// Fetch the graph index for a code, or fail when the code is not in
    /// the vertex table
    fn node(&self, code: i64) -> Result<NodeIndex, GraphError> {
        match self.code_index.get(&code) {
            Some(inx) => Ok(*inx),
            None => Err(GraphError::VertexNotFound(code)),
        }
    }

    /// Add an airport to the vertex table. Re-adding a code replaces the
    /// stored record but keeps any adjacency already attached to it
    pub fn add_airport(&mut self, airport: Airport) {
        match self.code_index.get(&airport.code) {
            Some(inx) => {
                if let Some(weight) = self.graph.node_weight_mut(*inx) {
                    *weight = airport;
                }
            }
            None => {
                let code = airport.code;
                let inx = self.graph.add_node(airport);
                self.code_index.insert(code, inx);
            }
        }
    }

    /// Append a directed route between two known airports. The edge lands in
    /// the source's outgoing list and the target's incoming list; both codes
    /// must already exist as vertices
    pub fn insert_route(
        &mut self,
        source: i64,
        target: i64,
        distance_km: f64,
    ) -> Result<(), GraphError> {
        let src_inx = self.node(source)?;
        let dst_inx = self.node(target)?;

        self.graph.add_edge(
            src_inx,
            dst_inx,
            RouteEdge {
                source,
                target,
                distance_km,
            },
        );
        self.route_count += 1;

        Ok(())
    }

    /// Whether a code is present in the vertex table
    pub fn vertex_exists(&self, code: i64) -> bool {
        self.code_index.contains_key(&code)
    }

    /// Whether at least one edge runs from source to target. Linear scan of
    /// the source's outgoing list; false when the source itself is unknown
    pub fn edge_exists(&self, source: i64, target: i64) -> bool {
        match self.node(source) {
            Ok(inx) => self
                .graph
                .edges_directed(inx, Direction::Outgoing)
                .any(|eref| eref.weight().target == target),
            Err(_) => false,
        }
    }

    /// Targets of the vertex's outgoing edges, in insertion order
    pub fn outgoing(&self, code: i64) -> Result<Vec<i64>, GraphError> {
        let inx = self.node(code)?;

        // petgraph yields edges in reverse order of addition
        let mut adjacent: Vec<i64> = self
            .graph
            .edges_directed(inx, Direction::Outgoing)
            .map(|eref| eref.weight().target)
            .collect();
        adjacent.reverse();

        Ok(adjacent)
    }

    /// Sources of the vertex's incoming edges, in insertion order
    pub fn incoming(&self, code: i64) -> Result<Vec<i64>, GraphError> {
        let inx = self.node(code)?;

        let mut adjacent: Vec<i64> = self
            .graph
            .edges_directed(inx, Direction::Incoming)
            .map(|eref| eref.weight().source)
            .collect();
        adjacent.reverse();

        Ok(adjacent)
    }

    /// Weight of the first edge from source to target in insertion order.
    /// `Ok(None)` means no such edge exists; callers never see a stand-in
    /// numeric value for a missing connection
    pub fn distance(
        &self,
        source: i64,
        target: i64,
    ) -> Result<Option<f64>, GraphError> {
        let inx = self.node(source)?;

        let mut scan: Vec<&RouteEdge> = self
            .graph
            .edges_directed(inx, Direction::Outgoing)
            .map(|eref| eref.weight())
            .collect();
        scan.reverse();

        Ok(scan
            .into_iter()
            .find(|edge| edge.target == target)
            .map(|edge| edge.distance_km))
    }

    /// Fetch the airport record for a code, if loaded
    pub fn airport(&self, code: i64) -> Option<&Airport> {
        let inx = self.code_index.get(&code)?;
        self.graph.node_weight(*inx)
    }

    /// All airport records in the network
    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.graph.node_weights()
    }

    pub fn airport_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn route_count(&self) -> usize {
        self.route_count
    }
}
