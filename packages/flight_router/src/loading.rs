pub mod builder;
pub mod dataset;
