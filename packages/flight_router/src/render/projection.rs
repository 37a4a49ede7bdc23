//! Mercator-style projection from geographic coordinates onto a 2D pixel
//! frame. This is the only contract the map renderer depends on; it carries
//! no graph semantics.

use std::f64::consts::PI;

use geo::Point;

use crate::common::geodesy::deg_to_rad;

/// Shift applied to longitudes so the projected x axis starts at the
/// antimeridian rather than Greenwich
const FALSE_EASTING: f64 = 180.0;

/// Project a point (x = longitude, y = latitude, in degrees) onto a frame
/// of the given pixel dimensions. The frame is assumed to span the full
/// 360 degrees of longitude, with the equator on its horizontal midline
pub fn project(point: &Point, frame_width: f64, frame_height: f64) -> (f64, f64) {
    let radius = frame_width / (2.0 * PI);

    let lat_rad = deg_to_rad(point.y());
    let lon_rad = deg_to_rad(point.x() + FALSE_EASTING);

    let x = lon_rad * radius;
    let y_from_equator = radius * (PI / 4.0 + lat_rad / 2.0).tan().ln();
    let y = frame_height / 2.0 - y_from_equator;

    (x, y)
}
