pub mod error;
pub mod geodesy;
pub mod graph_data;
