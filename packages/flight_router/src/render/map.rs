//! Drawing of the network onto a map image: a marker per airport and a
//! stroked line per route segment. The base image is caller-supplied and is
//! expected to be a WGS84 world map so that the projected pixel positions
//! line up with the geography.

use geo::Point;
use image::{Rgba, RgbaImage};

use crate::common::graph_data::Airport;
use crate::network::store::AirportNetwork;
use crate::render::projection::project;

const AIRPORT_COLOUR: Rgba<u8> = Rgba([255, 0, 0, 255]);
const ROUTE_COLOUR: Rgba<u8> = Rgba([0, 255, 0, 255]);

/// Markers and strokes extend this many pixels either side of their centre
const BRUSH_REACH: i64 = 2;

/// Paint a square brush stamp centred on (x, y), clipped to the frame
fn stamp(img: &mut RgbaImage, x: i64, y: i64, colour: Rgba<u8>) {
    let width = img.width() as i64;
    let height = img.height() as i64;

    for i in -BRUSH_REACH..=BRUSH_REACH {
        for j in -BRUSH_REACH..=BRUSH_REACH {
            let px = x + i;
            let py = y + j;
            if px >= 0 && px < width && py >= 0 && py < height {
                img.put_pixel(px as u32, py as u32, colour);
            }
        }
    }
}

/// Projected pixel position of an airport within the frame
fn pixel_position(airport: &Airport, img: &RgbaImage) -> (f64, f64) {
    let point = Point::new(airport.longitude, airport.latitude);
    project(&point, img.width() as f64, img.height() as f64)
}

/// Stroke a straight line between two pixel positions by stepping along the
/// longer axis
fn stroke_segment(
    img: &mut RgbaImage,
    from: (f64, f64),
    to: (f64, f64),
    colour: Rgba<u8>,
) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;

    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;

    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = from.0 + t * dx;
        let y = from.1 + t * dy;
        stamp(img, x as i64, y as i64, colour);
    }
}

/// Mark every airport in the network on the map
pub fn plot_airports(net: &AirportNetwork, img: &mut RgbaImage) {
    for airport in net.airports() {
        let (x, y) = pixel_position(airport, img);
        stamp(img, x as i64, y as i64, AIRPORT_COLOUR);
    }
}

/// Stroke each consecutive pair of stops on a computed route. Codes with no
/// airport record are skipped
pub fn plot_route(net: &AirportNetwork, path: &[i64], img: &mut RgbaImage) {
    for window in path.windows(2) {
        let start = match net.airport(window[0]) {
            Some(airport) => airport,
            None => continue,
        };
        let end = match net.airport(window[1]) {
            Some(airport) => airport,
            None => continue,
        };

        let from = pixel_position(start, img);
        let to = pixel_position(end, img);

        stroke_segment(img, from, to, ROUTE_COLOUR);
    }
}

/// Render the full network plus a computed route onto the provided base
/// image
pub fn render_route_map(
    net: &AirportNetwork,
    path: &[i64],
    mut base: RgbaImage,
) -> RgbaImage {
    plot_airports(net, &mut base);
    plot_route(net, path, &mut base);
    base
}
