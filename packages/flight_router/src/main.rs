use std::env;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router, serve};
use flight_router::loading::builder::load_network;
use flight_router::network::adjacency::reachable_from;
use flight_router::network::shortest_path::{find_path, path_report};
use flight_router::network::store::AirportNetwork;
use flight_router::render::map::render_route_map;
use serde::Deserialize;
use serde_json::json;

#[derive(Clone)]
struct AppState {
    net: Arc<AirportNetwork>,
}

#[derive(Deserialize)]
struct PathQuery {
    source: i64,
    dest: i64,
}

#[derive(Deserialize)]
struct NeighboursQuery {
    source: i64,
}

async fn health_check() -> impl IntoResponse {
    let msg = "Hello World!";

    let json_response = json!({
        "status": "success",
        "message": msg
    });

    Json(json_response)
}

async fn get_route(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Response {
    let now = Instant::now();

    let maybe_report = path_report(&state.net, query.source, query.dest);

    let elapsed = now.elapsed();
    println!("Route {} -> {}: {:.2?}", query.source, query.dest, elapsed);

    match maybe_report {
        Some(report) => (StatusCode::OK, Json(report)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "no_route",
                "source": query.source,
                "dest": query.dest
            })),
        )
            .into_response(),
    }
}

async fn get_neighbours(
    State(state): State<AppState>,
    Query(query): Query<NeighboursQuery>,
) -> Response {
    match reachable_from(&state.net, query.source) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "error",
                "message": err.to_string()
            })),
        )
            .into_response(),
    }
}

async fn get_map(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Response {
    let path = find_path(&state.net, query.source, query.dest);
    if path.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "no_route",
                "source": query.source,
                "dest": query.dest
            })),
        )
            .into_response();
    }

    // The base map must be WGS84 to line up with the projection
    let base = match image::open(Path::new("assets/worldmap.png")) {
        Ok(img) => img.into_rgba8(),
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": format!("could not open base map: {err}")
                })),
            )
                .into_response();
        }
    };

    let rendered = render_route_map(&state.net, &path, base);

    let mut buf = Vec::<u8>::new();
    if let Err(err) =
        rendered.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
    {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "message": format!("could not encode map: {err}")
            })),
        )
            .into_response();
    }

    ([(header::CONTENT_TYPE, "image/png")], buf).into_response()
}

#[tokio::main]
async fn main() {
    let airport_path = PathBuf::from(
        env::args()
            .nth(1)
            .unwrap_or_else(|| "assets/airports.csv".to_string()),
    );
    let route_path = PathBuf::from(
        env::args()
            .nth(2)
            .unwrap_or_else(|| "assets/routes.csv".to_string()),
    );

    let now = Instant::now();
    let net = load_network(&airport_path, &route_path)
        .expect("Error loading the flight datasets!");
    println!(
        "Loaded {} airports and {} routes in {:.2?}",
        net.airport_count(),
        net.route_count(),
        now.elapsed()
    );

    let state = AppState { net: Arc::new(net) };

    let router = Router::new()
        .route("/healthcheck", get(health_check))
        .route("/route", get(get_route))
        .route("/neighbours", get(get_neighbours))
        .route("/map", get(get_map))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000")
        .await
        .expect("Error binding to localhost:8000!");
    serve(listener, router).await.expect("Error serving API!");
}
