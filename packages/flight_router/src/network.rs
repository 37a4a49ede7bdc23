pub mod adjacency;
pub mod shortest_path;
pub mod store;
