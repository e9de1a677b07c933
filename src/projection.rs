//! Output coordinate reference systems.
//! Input coordinates are always GeoJSON lon/lat degrees (EPSG:4326).

use geo::{Coord, Geometry, MapCoords};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Spherical mercator earth radius in metres.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude where spherical mercator becomes square.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// The single CRS every loaded collection is converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Geographic lon/lat degrees, left untouched.
    #[serde(rename = "EPSG:4326")]
    Wgs84,
    /// Spherical web mercator metres, as used by slippy-map renderers.
    #[default]
    #[serde(rename = "EPSG:3857")]
    WebMercator,
}

impl Projection {
    pub fn code(&self) -> &'static str {
        match self {
            Projection::Wgs84 => "EPSG:4326",
            Projection::WebMercator => "EPSG:3857",
        }
    }

    /// Project a lon/lat coordinate.
    pub fn project(&self, lonlat: Coord<f64>) -> Coord<f64> {
        match self {
            Projection::Wgs84 => lonlat,
            Projection::WebMercator => {
                let lat = lonlat.y.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
                let x = EARTH_RADIUS * lonlat.x.to_radians();
                let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
                Coord { x, y }
            }
        }
    }

    pub fn project_geometry(&self, geometry: Geometry<f64>) -> Geometry<f64> {
        match self {
            Projection::Wgs84 => geometry,
            _ => geometry.map_coords(|c| self.project(c)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_origin_maps_to_origin() {
        let c = Projection::WebMercator.project(Coord { x: 0.0, y: 0.0 });
        assert!(close(c.x, 0.0, 1e-9));
        assert!(close(c.y, 0.0, 1e-9));
    }

    #[test]
    fn test_antimeridian_is_half_circumference() {
        let c = Projection::WebMercator.project(Coord { x: 180.0, y: 0.0 });
        assert!(close(c.x, 20_037_508.342_789_244, 1e-3));
    }

    #[test]
    fn test_poles_are_clamped() {
        let top = Projection::WebMercator.project(Coord { x: 0.0, y: 90.0 });
        let edge = Projection::WebMercator.project(Coord { x: 0.0, y: MAX_MERCATOR_LAT });
        assert!(top.y.is_finite());
        assert!(close(top.y, edge.y, 1e-6));
        assert!(close(edge.y, 20_037_508.342_789_244, 1.0));
    }

    #[test]
    fn test_wgs84_is_identity() {
        let input = Coord { x: 7.05, y: 50.68 };
        assert_eq!(Projection::Wgs84.project(input), input);
    }

    #[test]
    fn test_serde_uses_epsg_codes() {
        let json = serde_json::to_string(&Projection::WebMercator).unwrap();
        assert_eq!(json, "\"EPSG:3857\"");
        let back: Projection = serde_json::from_str("\"EPSG:4326\"").unwrap();
        assert_eq!(back, Projection::Wgs84);
    }
}
