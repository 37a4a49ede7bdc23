//! Great-circle distance calculations. Edge weights throughout the network
//! are produced by the haversine formula below, so route distances are
//! always expressed in kilometers.

use std::f64::consts::PI;

/// Mean radius of the Earth in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Convert decimal degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Great-circle distance in kilometers between two points given as
/// (latitude, longitude) pairs in decimal degrees. Inputs outside the
/// geographic domain are not validated; the trigonometric identities are
/// applied as-is.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_r = deg_to_rad(lat1);
    let lon1_r = deg_to_rad(lon1);
    let lat2_r = deg_to_rad(lat2);
    let lon2_r = deg_to_rad(lon2);

    let u = ((lat2_r - lat1_r) / 2.0).sin();
    let v = ((lon2_r - lon1_r) / 2.0).sin();

    let a = u * u + lat1_r.cos() * lat2_r.cos() * v * v;

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}
