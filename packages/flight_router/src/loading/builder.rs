//! Assembly of the airport network from parsed dataset rows. Vertices are
//! loaded first; edge weights are then resolved in parallel against the
//! vertex table before being appended sequentially.

use std::path::Path;

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::common::error::GraphError;
use crate::common::geodesy::haversine_km;
use crate::loading::dataset::{
    AirportRow, RouteRow, read_airports, read_routes,
};
use crate::network::store::AirportNetwork;

/// Resolve each route row against the vertex table and compute its
/// great-circle weight. Routes referencing an unloaded airport are dropped
fn resolve_route_weights(
    net: &AirportNetwork,
    routes: &[RouteRow],
) -> Vec<(i64, i64, f64)> {
    routes
        .par_iter()
        .filter_map(|row| {
            let src = net.airport(row.source)?;
            let dst = net.airport(row.target)?;

            let km = haversine_km(
                src.latitude,
                src.longitude,
                dst.latitude,
                dst.longitude,
            );

            Some((row.source, row.target, km))
        })
        .collect()
}

/// Build a queryable network from parsed dataset rows
pub fn build_network(
    airports: Vec<AirportRow>,
    routes: Vec<RouteRow>,
) -> AirportNetwork {
    let mut net = AirportNetwork::new();

    for row in airports {
        net.add_airport(row.into());
    }

    let resolved = resolve_route_weights(&net, &routes);

    let bar = ProgressBar::new(resolved.len() as u64);
    for (source, target, km) in resolved {
        // Both endpoints were checked during resolution, but the store
        // remains the authority
        if let Err(err) = net.insert_route(source, target, km) {
            tracing::warn!(error = %err, "skipping route with unknown endpoint");
        }
        bar.inc(1);
    }
    bar.finish();

    net
}

/// Read both datasets from disk and assemble the network
pub fn load_network(
    airport_path: &Path,
    route_path: &Path,
) -> Result<AirportNetwork, GraphError> {
    let airports = read_airports(airport_path)?;
    let routes = read_routes(route_path)?;

    Ok(build_network(airports, routes))
}
