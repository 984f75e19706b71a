//! Cluster aggregation for company markers.
//!
//! Below the configured zoom threshold, markers within a pixel radius of
//! each other coalesce into composite clusters; above it they disband into
//! individual markers. Clustering runs over planar positions with a
//! grid whose cell size is the pixel radius converted to meters at the
//! current zoom.

use crate::core::geo::{BBox, Coordinate, Point};
use crate::core::projection::TangentPlane;
use crate::entities::company::Company;
use crate::prelude::HashMap;
use crate::render::icon::{species_icon, MarkerIcon};
use crate::spatial::index::{SpatialIndex, SpatialItem};
use std::sync::Arc;

/// Ground resolution of one screen pixel at `zoom`, in meters, for the
/// standard web-mercator tiling.
pub fn meters_per_pixel(zoom: f64, lat: f64) -> f64 {
    156_543.033_92 * lat.to_radians().cos() / 2_f64.powf(zoom)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConfig {
    /// Zoom at and above which clustering is disabled.
    pub cluster_at_zoom: f64,
    /// Maximum marker spread absorbed by one cluster, in screen pixels.
    pub max_cluster_radius_px: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cluster_at_zoom: 12.0,
            max_cluster_radius_px: 30.0,
        }
    }
}

/// An aggregated marker standing in for one or more companies.
#[derive(Debug, Clone)]
pub struct CompanyCluster {
    pub center: Coordinate,
    pub members: Vec<Arc<Company>>,
}

impl CompanyCluster {
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }

    /// Composite icon derived from the cluster membership: the first
    /// member's species icon, scaled by member count. A memberless cluster
    /// renders a zero-size placeholder rather than failing.
    pub fn icon(&self) -> MarkerIcon {
        match self.members.first() {
            None => MarkerIcon::placeholder(),
            Some(company) if self.is_single() => {
                species_icon(company.animal_type_main).marker()
            }
            Some(company) => {
                species_icon(company.animal_type_main).composite(self.members.len())
            }
        }
    }
}

/// Groups company markers into clusters per viewport and zoom.
pub struct ClusterAggregator {
    config: ClusterConfig,
    projection: TangentPlane,
    index: SpatialIndex<Arc<Company>>,
}

impl ClusterAggregator {
    pub fn new(config: ClusterConfig, projection: TangentPlane) -> Self {
        Self {
            config,
            projection,
            index: SpatialIndex::new(),
        }
    }

    pub fn set_companies(&mut self, companies: &[Arc<Company>]) {
        self.index.clear();
        for company in companies {
            let position = company.coordinate().planar(&self.projection);
            self.index
                .insert(SpatialItem::new(position, Arc::clone(company)));
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Clusters for the given viewport and zoom. At or above the threshold
    /// zoom every company becomes its own singleton cluster.
    pub fn clusters(&self, viewport: &BBox, zoom: f64) -> Vec<CompanyCluster> {
        let items = self.query_viewport(viewport);
        if zoom >= self.config.cluster_at_zoom {
            return items
                .into_iter()
                .map(|item| CompanyCluster {
                    center: item.data.coordinate(),
                    members: vec![Arc::clone(&item.data)],
                })
                .collect();
        }

        let cell = self.config.max_cluster_radius_px
            * meters_per_pixel(zoom, viewport.center().lat());
        let mut grid: HashMap<(i32, i32), Vec<&SpatialItem<Arc<Company>>>> = HashMap::default();
        for item in items {
            let key = (
                (item.position.x / cell).floor() as i32,
                (item.position.y / cell).floor() as i32,
            );
            grid.entry(key).or_default().push(item);
        }

        grid.into_values()
            .map(|cell_items| {
                let sum = cell_items.iter().fold(Point::default(), |acc, item| {
                    acc.add(&item.position)
                });
                let mean = sum.multiply(1.0 / cell_items.len() as f64);
                let (lat, lon) = self.projection.to_geodetic(mean);
                CompanyCluster {
                    center: Coordinate::new(lat, lon),
                    members: cell_items
                        .into_iter()
                        .map(|item| Arc::clone(&item.data))
                        .collect(),
                }
            })
            .collect()
    }

    /// All indexed companies whose position falls inside the viewport.
    fn query_viewport(&self, viewport: &BBox) -> Vec<&SpatialItem<Arc<Company>>> {
        let corners = [
            self.projection
                .to_planar(viewport.lat_min, viewport.lon_min),
            self.projection
                .to_planar(viewport.lat_min, viewport.lon_max),
            self.projection
                .to_planar(viewport.lat_max, viewport.lon_max),
            self.projection
                .to_planar(viewport.lat_max, viewport.lon_min),
        ];
        let min = Point::new(
            corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min),
            corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
        );
        let max = Point::new(
            corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max),
            corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max),
        );
        self.index.query(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::address::Address;
    use crate::entities::animal::AnimalType;

    fn company_at(id: i64, lat: f64, lon: f64) -> Arc<Company> {
        Arc::new(Company {
            id,
            description: "farm".to_string(),
            active: true,
            address: Address {
                node_id: id,
                street: "Weg".to_string(),
                housenumber: "1".to_string(),
                postcode: "1234AB".to_string(),
                city: "Ede".to_string(),
                lat,
                lon,
            },
            animal_type_main: AnimalType::Pig,
            animal_count: 100,
            chicken: false,
            pig: true,
            cattle: false,
            sheep: false,
            goat: false,
        })
    }

    fn aggregator_with(companies: &[Arc<Company>]) -> ClusterAggregator {
        let mut aggregator =
            ClusterAggregator::new(ClusterConfig::default(), TangentPlane::default());
        aggregator.set_companies(companies);
        aggregator
    }

    fn wide_viewport() -> BBox {
        BBox::new(4.0, 51.0, 7.0, 53.0)
    }

    #[test]
    fn nearby_markers_cluster_below_threshold() {
        // Two farms ~100 m apart plus one far away.
        let companies = vec![
            company_at(1, 52.1000, 5.1000),
            company_at(2, 52.1009, 5.1000),
            company_at(3, 52.5000, 5.9000),
        ];
        let clusters = aggregator_with(&companies).clusters(&wide_viewport(), 10.0);
        assert_eq!(clusters.len(), 2);
        let biggest = clusters.iter().map(CompanyCluster::count).max().unwrap();
        assert_eq!(biggest, 2);
    }

    #[test]
    fn clusters_disband_at_threshold_zoom() {
        let companies = vec![
            company_at(1, 52.1000, 5.1000),
            company_at(2, 52.1009, 5.1000),
        ];
        let clusters = aggregator_with(&companies).clusters(&wide_viewport(), 12.0);
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(CompanyCluster::is_single));
    }

    #[test]
    fn viewport_filters_members() {
        let companies = vec![
            company_at(1, 52.1, 5.1),
            company_at(2, 53.9, 6.9), // outside
        ];
        let clusters = aggregator_with(&companies).clusters(&wide_viewport(), 14.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members[0].id, 1);
    }

    #[test]
    fn empty_cluster_icon_is_placeholder() {
        let cluster = CompanyCluster {
            center: Coordinate::new(52.0, 5.0),
            members: Vec::new(),
        };
        assert!(cluster.icon().is_placeholder());
    }

    #[test]
    fn cluster_icon_scales_with_membership() {
        let members: Vec<Arc<Company>> = (0..200)
            .map(|i| company_at(i, 52.1, 5.1))
            .collect();
        let cluster = CompanyCluster {
            center: Coordinate::new(52.1, 5.1),
            members,
        };
        let single = CompanyCluster {
            center: Coordinate::new(52.1, 5.1),
            members: vec![company_at(999, 52.1, 5.1)],
        };
        assert!(cluster.icon().width > single.icon().width);
    }
}
