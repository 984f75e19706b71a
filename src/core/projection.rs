use crate::core::geo::{Coordinate, Point};

/// Mean Earth radius in meters, shared by the projection and haversine.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// A local tangent-plane projection (spherical transverse Mercator) with its
/// natural origin at a fixed anchor point.
///
/// The anchor is chosen once near the centroid of the dataset's geographic
/// extent; planar coordinates are meters east/north of it. The projection is
/// accurate for regional distances (a few hundred kilometers); behavior near
/// the antipode of the anchor is unspecified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentPlane {
    anchor_lat: f64,
    anchor_lon: f64,
}

impl TangentPlane {
    /// Default anchor: Utrecht, the Netherlands, near the dataset centroid.
    pub const DEFAULT_ANCHOR: (f64, f64) = (52.0907006, 5.1215634);

    pub fn new(anchor_lat: f64, anchor_lon: f64) -> Self {
        Self {
            anchor_lat,
            anchor_lon,
        }
    }

    pub fn anchor(&self) -> (f64, f64) {
        (self.anchor_lat, self.anchor_lon)
    }

    /// Projects a geodetic coordinate onto the tangent plane.
    pub fn to_planar(&self, lat: f64, lon: f64) -> Point {
        let phi = lat.to_radians();
        let dlon = (lon - self.anchor_lon).to_radians();
        let b = phi.cos() * dlon.sin();
        let x = EARTH_RADIUS * b.atanh();
        let y = EARTH_RADIUS * (phi.tan().atan2(dlon.cos()) - self.anchor_lat.to_radians());
        Point::new(x, y)
    }

    /// Inverse projection back to (latitude, longitude) degrees.
    pub fn to_geodetic(&self, point: Point) -> (f64, f64) {
        let d = point.y / EARTH_RADIUS + self.anchor_lat.to_radians();
        let xr = point.x / EARTH_RADIUS;
        let lat = (d.sin() / xr.cosh()).asin().to_degrees();
        let lon = self.anchor_lon + xr.sinh().atan2(d.cos()).to_degrees();
        (lat, lon)
    }
}

impl Default for TangentPlane {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ANCHOR.0, Self::DEFAULT_ANCHOR.1)
    }
}

/// Great-circle distance between two coordinates in meters, independent of
/// the planar projection.
pub fn haversine(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = (b.lat() - a.lat()).to_radians();
    let dlon = (b.lon() - a.lon()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_within_epsilon() {
        let projection = TangentPlane::default();
        let samples = [
            (52.0907006, 5.1215634), // the anchor itself
            (52.37, 4.89),           // Amsterdam
            (51.44, 5.47),           // Eindhoven
            (53.22, 6.57),           // Groningen
            (50.85, 5.69),           // Maastricht
        ];
        for (lat, lon) in samples {
            let planar = projection.to_planar(lat, lon);
            let (lat_back, lon_back) = projection.to_geodetic(planar);
            assert!(
                (lat_back - lat).abs() < 1e-6,
                "lat {lat} -> {lat_back}"
            );
            assert!(
                (lon_back - lon).abs() < 1e-6,
                "lon {lon} -> {lon_back}"
            );
        }
    }

    #[test]
    fn anchor_projects_to_origin() {
        let projection = TangentPlane::default();
        let origin = projection.to_planar(
            TangentPlane::DEFAULT_ANCHOR.0,
            TangentPlane::DEFAULT_ANCHOR.1,
        );
        assert!(origin.x.abs() < 1e-6);
        assert!(origin.y.abs() < 1e-6);
    }

    #[test]
    fn planar_distance_matches_haversine_regionally() {
        let projection = TangentPlane::default();
        let a = Coordinate::new(52.0, 5.0);
        let b = Coordinate::new(52.1, 5.2);
        let planar = a.planar(&projection).distance_to(&b.planar(&projection));
        let geodetic = haversine(&a, &b);
        // Within a few hundred km of the anchor the two should agree closely.
        assert!((planar - geodetic).abs() / geodetic < 1e-3);
    }

    #[test]
    fn haversine_known_distance() {
        // Amsterdam to Utrecht is roughly 35 km.
        let amsterdam = Coordinate::new(52.3676, 4.9041);
        let utrecht = Coordinate::new(52.0907, 5.1216);
        let d = haversine(&amsterdam, &utrecht);
        assert!((d - 35_000.0).abs() < 2_000.0, "distance was {d}");
    }
}
