//! R-tree index over planar point positions.

use crate::core::geo::Point;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A point payload indexed by its planar position.
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub position: Point,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(position: Point, data: T) -> Self {
        Self { position, data }
    }
}

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y])
    }
}

impl<T> PointDistance for SpatialItem<T> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position.x - point[0];
        let dy = self.position.y - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree based point index used for viewport queries.
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T> SpatialIndex<T> {
    pub fn new() -> Self {
        Self {
            rtree: RTree::new(),
        }
    }

    pub fn insert(&mut self, item: SpatialItem<T>) {
        self.rtree.insert(item);
    }

    /// Items whose position falls inside the planar rectangle `min`..`max`.
    pub fn query(&self, min: Point, max: Point) -> Vec<&SpatialItem<T>> {
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        self.rtree
            .locate_in_envelope_intersecting(&envelope)
            .collect()
    }

    pub fn nearest(&self, position: Point) -> Option<&SpatialItem<T>> {
        self.rtree.nearest_neighbor(&[position.x, position.y])
    }

    pub fn all_items(&self) -> Vec<&SpatialItem<T>> {
        self.rtree.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    pub fn clear(&mut self) {
        self.rtree = RTree::new();
    }
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
