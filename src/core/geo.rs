use crate::core::projection::{haversine, TangentPlane};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// A point in the local planar (tangent-plane) coordinate system, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A geographical coordinate in WGS84, with a cached planar projection.
///
/// The planar value is computed lazily against a [`TangentPlane`] and is
/// invalidated whenever the latitude or longitude is mutated. One projection
/// anchor is assumed for the whole dataset, so the cache is not keyed by
/// projector. Mutation exists only so the placement engine can relax a
/// point's position; everywhere else coordinates are treated as immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
    #[serde(skip)]
    planar: OnceCell<Point>,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            planar: OnceCell::new(),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn set_lat(&mut self, lat: f64) {
        self.lat = lat;
        self.planar.take();
    }

    pub fn set_lon(&mut self, lon: f64) {
        self.lon = lon;
        self.planar.take();
    }

    /// The planar projection of this coordinate, computed once and cached.
    pub fn planar(&self, projection: &TangentPlane) -> Point {
        *self
            .planar
            .get_or_init(|| projection.to_planar(self.lat, self.lon))
    }

    /// Great-circle distance to another coordinate in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine(self, other)
    }

    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lon >= -180.0 && self.lon <= 180.0
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

/// A geographical bounding box.
///
/// Invariant: `lon_min <= lon_max` and `lat_min <= lat_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl BBox {
    pub fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Self {
        debug_assert!(lon_min <= lon_max && lat_min <= lat_max);
        Self {
            lon_min,
            lat_min,
            lon_max,
            lat_max,
        }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.contains_point(coordinate.lat(), coordinate.lon())
    }

    pub fn contains_point(&self, lat: f64, lon: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max && lon >= self.lon_min && lon <= self.lon_max
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        !(other.lat_max < self.lat_min
            || other.lat_min > self.lat_max
            || other.lon_max < self.lon_min
            || other.lon_min > self.lon_max)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.lat_min + self.lat_max) / 2.0,
            (self.lon_min + self.lon_max) / 2.0,
        )
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// A bbox with both spans scaled by `factor`, centered on the same point.
    ///
    /// Building fetches use factor 2 so small pans stay inside the last
    /// fetched region.
    pub fn enlarged(&self, factor: f64) -> BBox {
        let center = self.center();
        let half_lon = self.lon_span() * factor / 2.0;
        let half_lat = self.lat_span() * factor / 2.0;
        BBox::new(
            center.lon() - half_lon,
            center.lat() - half_lat,
            center.lon() + half_lon,
            center.lat() + half_lat,
        )
    }

    /// True when the box spans no area on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.lon_span() <= 0.0 || self.lat_span() <= 0.0
    }

    /// The `lonMin,latMin,lonMax,latMax` form used in fetch query strings.
    pub fn to_query(&self) -> String {
        format!(
            "{},{},{},{}",
            self.lon_min, self.lat_min, self.lon_max, self.lat_max
        )
    }
}

impl std::fmt::Display for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query())
    }
}
