//! Shortest-path computation over the airport network. A single Dijkstra
//! run labels every candidate vertex with its best-known distance from the
//! source and its predecessor on that path; `find_path` then walks the
//! predecessor chain back from the destination.
//!
//! Candidate vertices are discovered by following edges in *either*
//! direction from the source, but distances are only ever relaxed along
//! outgoing edges. A vertex which can only be reached against the edge
//! direction stays unreached in the returned map.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::common::error::GraphError;
use crate::common::geodesy::haversine_km;
use crate::network::store::AirportNetwork;

/// Distance and predecessor labels for one vertex. `None` in either field
/// means the vertex was discovered but never reached along a directed path;
/// the source carries itself as predecessor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathLabel {
    pub distance_km: Option<f64>,
    pub prev: Option<i64>,
}

impl PathLabel {
    fn unreached() -> PathLabel {
        PathLabel {
            distance_km: None,
            prev: None,
        }
    }
}

/// Label every vertex connected to the source (in either edge direction)
/// with its shortest distance from the source along outgoing edges, plus
/// the predecessor on that path. Fails when the source is not a vertex
pub fn dijkstra(
    net: &AirportNetwork,
    source: i64,
) -> Result<FxHashMap<i64, PathLabel>, GraphError> {
    if !net.vertex_exists(source) {
        return Err(GraphError::VertexNotFound(source));
    }

    let mut labels = FxHashMap::<i64, PathLabel>::default();
    labels.insert(
        source,
        PathLabel {
            distance_km: Some(0.0),
            prev: Some(source),
        },
    );

    let mut unvisited: Vec<i64> = vec![source];
    let mut pending: FxHashSet<i64> = FxHashSet::default();
    pending.insert(source);

    // Candidate discovery: edges in either direction decide membership,
    // outgoing neighbours listed ahead of incoming ones
    let mut frontier = VecDeque::<i64>::new();
    frontier.push_back(source);
    while let Some(current) = frontier.pop_front() {
        let mut adjacent = net.outgoing(current)?;
        for inc in net.incoming(current)? {
            if !adjacent.contains(&inc) {
                adjacent.push(inc);
            }
        }

        for next in adjacent {
            if !labels.contains_key(&next) {
                labels.insert(next, PathLabel::unreached());
                unvisited.push(next);
                pending.insert(next);
                frontier.push_back(next);
            }
        }
    }

    // Directed relaxation
    while !unvisited.is_empty() {
        let current = match select_min(&labels, &unvisited) {
            Some(code) => code,
            None => {
                // Cannot happen while unvisited is non-empty; a miss here
                // means the label map and the unvisited list disagree
                tracing::error!(
                    source,
                    "no selectable vertex despite pending candidates"
                );
                break;
            }
        };

        let current_dist = match labels.get(&current) {
            Some(label) => label.distance_km.unwrap_or(f64::INFINITY),
            None => f64::INFINITY,
        };

        for neighbour in net.outgoing(current)? {
            if !pending.contains(&neighbour) {
                continue;
            }

            let leg = match net.distance(current, neighbour)? {
                Some(km) => km,
                None => continue,
            };

            let known = labels
                .get(&neighbour)
                .and_then(|label| label.distance_km)
                .unwrap_or(f64::INFINITY);

            let candidate = current_dist + leg;
            if candidate < known {
                labels.insert(
                    neighbour,
                    PathLabel {
                        distance_km: Some(candidate),
                        prev: Some(current),
                    },
                );
            }
        }

        unvisited.retain(|&code| code != current);
        pending.remove(&current);
    }

    Ok(labels)
}

/// Pick the unvisited vertex with the smallest known distance. Unreached
/// vertices count as infinitely far; ties go to the last candidate scanned
fn select_min(
    labels: &FxHashMap<i64, PathLabel>,
    unvisited: &[i64],
) -> Option<i64> {
    let mut best = f64::INFINITY;
    let mut chosen: Option<i64> = None;

    for &code in unvisited {
        let dist = labels
            .get(&code)
            .and_then(|label| label.distance_km)
            .unwrap_or(f64::INFINITY);

        if dist <= best {
            best = dist;
            chosen = Some(code);
        }
    }

    chosen
}

/// Ordered airport codes on the shortest route from source to destination.
/// An unknown endpoint or a missing directed route yields an empty vector
/// rather than an error; the source alone yields a singleton
pub fn find_path(net: &AirportNetwork, source: i64, destination: i64) -> Vec<i64> {
    if !net.vertex_exists(source) || !net.vertex_exists(destination) {
        tracing::debug!(source, destination, "endpoint is not a known airport");
        return Vec::new();
    }

    let labels = match dijkstra(net, source) {
        Ok(labels) => labels,
        Err(err) => {
            tracing::warn!(source, error = %err, "shortest path computation failed");
            return Vec::new();
        }
    };

    if source == destination {
        return vec![source];
    }

    let reached = labels
        .get(&destination)
        .and_then(|label| label.distance_km)
        .is_some();
    if !reached {
        tracing::debug!(source, destination, "no route exists");
        return Vec::new();
    }

    // Walk the predecessor chain back from the destination
    let mut path = vec![destination];
    let mut current = destination;
    while current != source {
        if path.len() > labels.len() {
            tracing::error!(
                source,
                destination,
                "predecessor chain does not terminate at the source"
            );
            return Vec::new();
        }

        match labels.get(&current).and_then(|label| label.prev) {
            Some(prev) if prev != current => {
                path.push(prev);
                current = prev;
            }
            _ => {
                tracing::debug!(source, destination, "no route exists");
                return Vec::new();
            }
        }
    }
    path.reverse();

    path
}

/// One stop on a computed route, with the great-circle distance from the
/// previous stop (zero for the first)
#[derive(Debug, Serialize, PartialEq)]
pub struct Stop {
    pub code: i64,
    pub name: String,
    pub city: String,
    pub country: String,
    pub leg_km: f64,
}

/// A computed route in a form the presentation layer can print or export
#[derive(Debug, Serialize, PartialEq)]
pub struct PathReport {
    pub source: i64,
    pub destination: i64,
    pub total_km: f64,
    pub stops: Vec<Stop>,
}

/// Compute the shortest route and expand it into ordered stops with per-hop
/// distances. `None` when no route exists or an endpoint is unknown
pub fn path_report(
    net: &AirportNetwork,
    source: i64,
    destination: i64,
) -> Option<PathReport> {
    let path = find_path(net, source, destination);
    if path.is_empty() {
        return None;
    }

    let mut total_km = 0.0;
    let mut stops = Vec::<Stop>::with_capacity(path.len());
    for (i, &code) in path.iter().enumerate() {
        let airport = net.airport(code)?;

        let leg_km = if i == 0 {
            0.0
        } else {
            let prev = net.airport(path[i - 1])?;
            haversine_km(
                prev.latitude,
                prev.longitude,
                airport.latitude,
                airport.longitude,
            )
        };
        total_km += leg_km;

        stops.push(Stop {
            code: airport.code,
            name: airport.name.clone(),
            city: airport.city.clone(),
            country: airport.country.clone(),
            leg_km,
        });
    }

    Some(PathReport {
        source,
        destination,
        total_km,
        stops,
    })
}

#[cfg(test)]
mod tests {

    use approx::assert_relative_eq;

    use super::*;
    use crate::network::store::tests::get_test_network;

    /// Build the 4-airport chain 1 -> 2 -> 3 -> 4 with the reference
    /// weights
    fn get_chain_network() -> AirportNetwork {
        let mut net = get_test_network();
        net.insert_route(1, 2, 106.0).unwrap();
        net.insert_route(2, 3, 179.0).unwrap();
        net.insert_route(3, 4, 281.0).unwrap();
        net
    }

    /// The source is seeded at distance zero with itself as predecessor
    #[test]
    fn test_dijkstra_seeds_source() {
        let net = get_chain_network();

        let labels = dijkstra(&net, 1).unwrap();

        assert_eq!(
            labels.get(&1),
            Some(&PathLabel {
                distance_km: Some(0.0),
                prev: Some(1),
            })
        );
    }

    /// Distances accumulate along the chain
    #[test]
    fn test_dijkstra_chain_distances() {
        let net = get_chain_network();

        let labels = dijkstra(&net, 1).unwrap();

        assert_eq!(labels.get(&2).unwrap().distance_km, Some(106.0));
        assert_eq!(labels.get(&3).unwrap().distance_km, Some(285.0));
        assert_eq!(labels.get(&4).unwrap().distance_km, Some(566.0));

        assert_eq!(labels.get(&2).unwrap().prev, Some(1));
        assert_eq!(labels.get(&3).unwrap().prev, Some(2));
        assert_eq!(labels.get(&4).unwrap().prev, Some(3));
    }

    /// An unknown source fails with an explicit error
    #[test]
    fn test_dijkstra_unknown_source() {
        let net = get_chain_network();

        match dijkstra(&net, 99) {
            Err(GraphError::VertexNotFound(99)) => (),
            _ => panic!("Expected a VertexNotFound error"),
        }
    }

    /// A vertex connected to the source only by an incoming edge is
    /// discovered as a candidate but never reached
    #[test]
    fn test_dijkstra_incoming_only_stays_unreached() {
        let mut net = get_test_network();
        net.insert_route(1, 2, 106.0).unwrap();
        net.insert_route(3, 1, 213.0).unwrap();

        let labels = dijkstra(&net, 1).unwrap();

        assert_eq!(labels.get(&3), Some(&PathLabel::unreached()));
    }

    /// Among equal-distance candidates the last one scanned is finalized
    /// first: with two 10km hops on each side of a diamond, the route runs
    /// through the later-discovered midpoint
    #[test]
    fn test_tie_break_takes_last_candidate() {
        let mut net = get_test_network();
        net.insert_route(1, 2, 10.0).unwrap();
        net.insert_route(1, 3, 10.0).unwrap();
        net.insert_route(2, 4, 10.0).unwrap();
        net.insert_route(3, 4, 10.0).unwrap();

        let path = find_path(&net, 1, 4);

        assert_eq!(path, vec![1, 3, 4]);
    }

    /// Direct connection
    #[test]
    fn test_find_path_no_stops() {
        let net = get_chain_network();

        let path = find_path(&net, 1, 2);

        assert_eq!(path, vec![1, 2]);
        assert_eq!(net.distance(1, 2).unwrap(), Some(106.0));
    }

    /// One intermediate stop, cumulative distance 285km
    #[test]
    fn test_find_path_one_stop() {
        let net = get_chain_network();

        let path = find_path(&net, 1, 3);

        assert_eq!(path, vec![1, 2, 3]);

        let total = net.distance(1, 2).unwrap().unwrap()
            + net.distance(2, 3).unwrap().unwrap();
        assert_relative_eq!(total, 285.0);
    }

    /// Two intermediate stops, cumulative distance 566km
    #[test]
    fn test_find_path_two_stops() {
        let net = get_chain_network();

        let path = find_path(&net, 1, 4);

        assert_eq!(path, vec![1, 2, 3, 4]);

        let total = net.distance(1, 2).unwrap().unwrap()
            + net.distance(2, 3).unwrap().unwrap()
            + net.distance(3, 4).unwrap().unwrap();
        assert_relative_eq!(total, 566.0);
    }

    /// The shorter of two alternatives wins
    #[test]
    fn test_find_path_prefers_shorter_route() {
        let mut net = get_chain_network();
        // Expensive direct edge alongside the cheap chain
        net.insert_route(1, 4, 1000.0).unwrap();

        let path = find_path(&net, 1, 4);

        assert_eq!(path, vec![1, 2, 3, 4]);
    }

    /// Source equal to destination yields a singleton path
    #[test]
    fn test_find_path_source_is_destination() {
        let net = get_chain_network();

        let path = find_path(&net, 3, 3);

        assert_eq!(path, vec![3]);
    }

    /// Unknown endpoints yield an empty path, not an error
    #[test]
    fn test_find_path_unknown_endpoints() {
        let net = get_chain_network();

        assert!(find_path(&net, 1, 5).is_empty());
        assert!(find_path(&net, 5, 3).is_empty());
    }

    /// A destination only connected against the edge direction is
    /// unreachable
    #[test]
    fn test_find_path_respects_direction() {
        let mut net = get_test_network();
        net.insert_route(2, 1, 106.0).unwrap();

        let path = find_path(&net, 1, 2);

        assert!(path.is_empty());
    }

    /// A destination with no connection at all is unreachable
    #[test]
    fn test_find_path_disconnected() {
        let mut net = get_test_network();
        net.insert_route(1, 2, 106.0).unwrap();
        net.insert_route(3, 4, 281.0).unwrap();

        let path = find_path(&net, 1, 4);

        assert!(path.is_empty());
    }

    /// Repeated queries on an unmodified network return identical results
    #[test]
    fn test_find_path_idempotent() {
        let net = get_chain_network();

        let first = find_path(&net, 1, 4);
        let second = find_path(&net, 1, 4);

        assert_eq!(first, second);
    }

    /// The report lists every stop with its leg distance and a cumulative
    /// total computed from the airport coordinates
    #[test]
    fn test_path_report() {
        let net = get_chain_network();

        let report = path_report(&net, 1, 4).unwrap();

        assert_eq!(report.source, 1);
        assert_eq!(report.destination, 4);
        assert_eq!(report.stops.len(), 4);
        assert_eq!(report.stops[0].leg_km, 0.0);

        let codes: Vec<i64> = report.stops.iter().map(|s| s.code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);

        let mut target_total = 0.0;
        for pair in [(1, 2), (2, 3), (3, 4)] {
            let a = net.airport(pair.0).unwrap();
            let b = net.airport(pair.1).unwrap();
            target_total +=
                haversine_km(a.latitude, a.longitude, b.latitude, b.longitude);
        }
        assert_relative_eq!(report.total_km, target_total);
    }

    /// No route means no report
    #[test]
    fn test_path_report_no_route() {
        let net = get_chain_network();

        assert!(path_report(&net, 4, 1).is_none());
        assert!(path_report(&net, 1, 99).is_none());
    }
}
