pub mod common;
pub mod loading;
pub mod network;
pub mod render;
