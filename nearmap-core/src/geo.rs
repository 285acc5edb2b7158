//! Geographic coordinates and great-circle distance.

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse a `"lat,lng"` string as stored in the POI table and accepted
    /// on the query string. Returns `None` if either component is missing
    /// or not a number.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(2, ',');
        let lat: f64 = parts.next()?.trim().parse().ok()?;
        let lng: f64 = parts.next()?.trim().parse().ok()?;
        Some(Self { lat, lng })
    }
}

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two coordinates in kilometers, via the
/// haversine formula.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
