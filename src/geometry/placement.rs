//! Synthetic animal point placement.
//!
//! Scatters a target number of points inside a building footprint so that
//! the points are mutually separated and stay inside the polygon. Two
//! phases: uniform rejection sampling in the footprint bbox, then a bounded
//! number of O(n²) separation relaxation passes. The result is an
//! approximate, fast, visually plausible distribution, not a Poisson-disk
//! sample.

use crate::core::geo::Coordinate;
use crate::core::projection::TangentPlane;
use crate::entities::building::Building;
use crate::geometry::polygon;
use crate::prelude::HashMap;
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOptions {
    /// Density ceiling: above this target count the building renders no
    /// points at all instead of stalling the event loop.
    pub max_points: usize,
    /// Rejection-sampling attempt budget per requested point.
    pub tries_per_point: usize,
    /// Number of separation relaxation passes. A single pass leaves some
    /// residual near-threshold clustering, which is acceptable; more passes
    /// trade time for separation quality.
    pub relaxation_passes: usize,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            max_points: 10_000,
            tries_per_point: 10,
            relaxation_passes: 1,
        }
    }
}

/// Produces animal point sets for building footprints.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    projection: TangentPlane,
    options: PlacementOptions,
}

impl PlacementEngine {
    pub fn new(projection: TangentPlane, options: PlacementOptions) -> Self {
        Self {
            projection,
            options,
        }
    }

    pub fn options(&self) -> &PlacementOptions {
        &self.options
    }

    /// Scatters points for `building` with a thread-local RNG.
    pub fn scatter(&self, building: &Building) -> Vec<Coordinate> {
        self.scatter_with(building, &mut rand::thread_rng())
    }

    /// Scatters points for `building`, deterministic given `rng`.
    ///
    /// Returns an empty set (never an error) when the target count is zero,
    /// the footprint bbox is degenerate, or the density ceiling is exceeded.
    /// Accepting fewer than the target on attempt exhaustion is graceful
    /// degradation for footprints that are thin relative to their bbox.
    pub fn scatter_with<R: Rng>(&self, building: &Building, rng: &mut R) -> Vec<Coordinate> {
        let capacity = building.animal_capacity();
        if capacity > self.options.max_points as f64 {
            log::warn!(
                "building {}: {:.0} animals exceed the {} point render ceiling",
                building.way_id,
                capacity,
                self.options.max_points
            );
            return Vec::new();
        }
        let target = capacity as usize;
        let bbox = building.bbox();
        if target == 0 || bbox.is_degenerate() {
            return Vec::new();
        }

        let mut points: Vec<Coordinate> = Vec::with_capacity(target);
        let max_tries = target * self.options.tries_per_point;
        let mut tries = 0;
        while points.len() < target && tries < max_tries {
            let lat = rng.gen_range(bbox.lat_min..bbox.lat_max);
            let lon = rng.gen_range(bbox.lon_min..bbox.lon_max);
            if polygon::point_in_ring(lat, lon, &building.footprint) {
                points.push(Coordinate::new(lat, lon));
            }
            tries += 1;
        }
        log::debug!(
            "building {}: {} of {} points placed in {} tries",
            building.way_id,
            points.len(),
            target,
            tries
        );

        let threshold = building.area.sqrt() / 10.0;
        for _ in 0..self.options.relaxation_passes {
            self.relax_pass(&mut points, &building.footprint, threshold);
        }
        points
    }

    /// One separation pass: every point closer than `threshold` to another
    /// is pushed directly away until the gap is exactly `threshold`, and the
    /// move is kept only if the point stays inside the footprint.
    fn relax_pass(&self, points: &mut [Coordinate], ring: &[Coordinate], threshold: f64) {
        if threshold <= 0.0 {
            return;
        }
        for i in 0..points.len() {
            for j in 0..points.len() {
                if i == j {
                    continue;
                }
                let pa = points[i].planar(&self.projection);
                let pb = points[j].planar(&self.projection);
                let distance = pa.distance_to(&pb);
                if distance >= threshold || distance == 0.0 {
                    continue;
                }
                let away = pa.subtract(&pb).multiply((threshold - distance) / distance);
                let moved = pa.add(&away);
                let (lat, lon) = self.projection.to_geodetic(moved);
                if polygon::point_in_ring(lat, lon, ring) {
                    points[i].set_lat(lat);
                    points[i].set_lon(lon);
                }
            }
        }
    }
}

/// Point-set memoization keyed by building id, owned by the orchestrator.
///
/// Keying by `way_id` instead of object identity means a refetch producing a
/// structurally identical building reuses the cached set rather than
/// repeating the O(n²) work. Invalidate explicitly when the underlying
/// geometry changes.
#[derive(Debug, Default)]
pub struct PlacementCache {
    points: HashMap<i64, Arc<Vec<Coordinate>>>,
}

impl PlacementCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached point set for `building`, computing it on first use.
    pub fn points_for(
        &mut self,
        engine: &PlacementEngine,
        building: &Building,
    ) -> Arc<Vec<Coordinate>> {
        self.points_for_with(engine, building, &mut rand::thread_rng())
    }

    pub fn points_for_with<R: Rng>(
        &mut self,
        engine: &PlacementEngine,
        building: &Building,
        rng: &mut R,
    ) -> Arc<Vec<Coordinate>> {
        Arc::clone(
            self.points
                .entry(building.way_id)
                .or_insert_with(|| Arc::new(engine.scatter_with(building, rng))),
        )
    }

    pub fn invalidate(&mut self, way_id: i64) -> bool {
        self.points.remove(&way_id).is_some()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
