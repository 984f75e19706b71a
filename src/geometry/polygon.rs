//! Point-in-polygon and polygon/rectangle tests over a single simple ring.
//!
//! Holes and multi-ring polygons are not supported; callers pass one ring.
//! All functions are pure and O(n) or O(n) per edge in the ring length.

use crate::core::geo::{BBox, Coordinate};

/// Even-odd (ray casting) point-in-polygon test.
///
/// Points exactly on the boundary are classified by the even-odd rule:
/// a point on a lower/left edge counts as inside, on an upper/right edge as
/// outside. Callers must not rely on either outcome.
pub fn point_in_ring(lat: f64, lon: f64, ring: &[Coordinate]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lat(), ring[i].lon());
        let (xj, yj) = (ring[j].lat(), ring[j].lon());
        if (yi > lon) != (yj > lon) && lat < (xj - xi) * (lon - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounding box of a ring. A ring with fewer than one vertex
/// yields a degenerate zero bbox.
pub fn ring_bbox(ring: &[Coordinate]) -> BBox {
    let Some(first) = ring.first() else {
        return BBox::new(0.0, 0.0, 0.0, 0.0);
    };
    let mut lon_min = first.lon();
    let mut lon_max = first.lon();
    let mut lat_min = first.lat();
    let mut lat_max = first.lat();
    for vertex in &ring[1..] {
        lon_min = lon_min.min(vertex.lon());
        lon_max = lon_max.max(vertex.lon());
        lat_min = lat_min.min(vertex.lat());
        lat_max = lat_max.max(vertex.lat());
    }
    BBox::new(lon_min, lat_min, lon_max, lat_max)
}

/// True when segments a1-a2 and b1-b2 intersect, endpoints included.
/// Coordinates are (lat, lon) pairs.
pub fn segments_intersect(
    a1: (f64, f64),
    a2: (f64, f64),
    b1: (f64, f64),
    b2: (f64, f64),
) -> bool {
    fn orientation(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> f64 {
        (q.1 - p.1) * (r.0 - q.0) - (q.0 - p.0) * (r.1 - q.1)
    }
    fn on_segment(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> bool {
        q.0 >= p.0.min(r.0) && q.0 <= p.0.max(r.0) && q.1 >= p.1.min(r.1) && q.1 <= p.1.max(r.1)
    }

    let o1 = orientation(a1, a2, b1);
    let o2 = orientation(a1, a2, b2);
    let o3 = orientation(b1, b2, a1);
    let o4 = orientation(b1, b2, a2);

    if (o1 > 0.0) != (o2 > 0.0) && (o3 > 0.0) != (o4 > 0.0) && o1 != 0.0 && o2 != 0.0 {
        return true;
    }
    (o1 == 0.0 && on_segment(a1, b1, a2))
        || (o2 == 0.0 && on_segment(a1, b2, a2))
        || (o3 == 0.0 && on_segment(b1, a1, b2))
        || (o4 == 0.0 && on_segment(b1, a2, b2))
}

/// True polygon/rectangle intersection: any ring vertex inside the box, any
/// box corner inside the ring, or any ring edge crossing a box edge.
///
/// Covers polygons straddling the box with no vertex inside it, which a
/// plain vertex-containment check misses.
pub fn ring_intersects_bbox(ring: &[Coordinate], bbox: &BBox) -> bool {
    if ring.len() < 3 {
        return false;
    }
    if ring
        .iter()
        .any(|vertex| bbox.contains_point(vertex.lat(), vertex.lon()))
    {
        return true;
    }
    let corners = [
        (bbox.lat_min, bbox.lon_min),
        (bbox.lat_min, bbox.lon_max),
        (bbox.lat_max, bbox.lon_max),
        (bbox.lat_max, bbox.lon_min),
    ];
    if corners
        .iter()
        .any(|&(lat, lon)| point_in_ring(lat, lon, ring))
    {
        return true;
    }
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let edge = (
            (ring[j].lat(), ring[j].lon()),
            (ring[i].lat(), ring[i].lon()),
        );
        for k in 0..4 {
            let side = (corners[k], corners[(k + 1) % 4]);
            if segments_intersect(edge.0, edge.1, side.0, side.1) {
                return true;
            }
        }
        j = i;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ]
    }

    #[test]
    fn center_is_inside() {
        assert!(point_in_ring(0.5, 0.5, &unit_square()));
    }

    #[test]
    fn outside_bbox_is_outside() {
        assert!(!point_in_ring(2.0, 0.5, &unit_square()));
        assert!(!point_in_ring(0.5, -0.5, &unit_square()));
    }

    #[test]
    fn boundary_convention_is_consistent() {
        // Even-odd rule: the lower edge counts as inside, the upper as
        // outside. Documented, not contractual.
        let ring = unit_square();
        assert!(point_in_ring(0.5, 0.0, &ring));
        assert!(!point_in_ring(0.5, 1.0, &ring));
    }

    #[test]
    fn concave_ring() {
        // L-shape: the notch at the upper right is outside.
        let ring = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 1.0),
            Coordinate::new(2.0, 0.0),
        ];
        assert!(point_in_ring(0.5, 1.5, &ring));
        assert!(!point_in_ring(1.5, 1.5, &ring));
        assert!(point_in_ring(1.5, 0.5, &ring));
    }

    #[test]
    fn degenerate_ring_is_never_inside() {
        assert!(!point_in_ring(0.5, 0.5, &[]));
        assert!(!point_in_ring(
            0.5,
            0.5,
            &[Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]
        ));
    }

    #[test]
    fn bbox_of_ring() {
        let bbox = ring_bbox(&unit_square());
        assert_eq!(bbox, BBox::new(0.0, 0.0, 1.0, 1.0));
        assert!(ring_bbox(&[]).is_degenerate());
    }

    #[test]
    fn segment_intersection() {
        assert!(segments_intersect(
            (0.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (1.0, 0.0)
        ));
        assert!(!segments_intersect(
            (0.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0)
        ));
    }

    #[test]
    fn straddling_polygon_with_no_vertex_inside_intersects() {
        // A band crossing the whole box: no polygon vertex lies inside it.
        let band = vec![
            Coordinate::new(0.4, -1.0),
            Coordinate::new(0.6, -1.0),
            Coordinate::new(0.6, 2.0),
            Coordinate::new(0.4, 2.0),
        ];
        let bbox = BBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(ring_intersects_bbox(&band, &bbox));
    }

    #[test]
    fn box_inside_polygon_intersects() {
        let big = vec![
            Coordinate::new(-1.0, -1.0),
            Coordinate::new(-1.0, 2.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(2.0, -1.0),
        ];
        let bbox = BBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(ring_intersects_bbox(&big, &bbox));
    }

    #[test]
    fn disjoint_polygon_does_not_intersect() {
        let bbox = BBox::new(5.0, 5.0, 6.0, 6.0);
        assert!(!ring_intersects_bbox(&unit_square(), &bbox));
    }
}
