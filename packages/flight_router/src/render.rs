pub mod map;
pub mod projection;
