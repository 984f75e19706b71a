use crate::core::geo::{BBox, Coordinate};
use crate::entities::address::{Address, AddressResource};
use crate::entities::animal::AnimalType;
use crate::entities::company::{Company, CompanyResource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wire form of a building, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingResource {
    pub way_id: i64,
    pub area: f64,
    pub length: f64,
    pub width: f64,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub geometry: Vec<Coordinate>,
    pub company: CompanyResource,
    #[serde(default)]
    pub addresses_nearby: Vec<AddressResource>,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

/// A farm building footprint with its owning company and nearby addresses.
///
/// `addresses_nearby` is kept sorted by great-circle distance to the
/// building center.
#[derive(Debug, Clone)]
pub struct Building {
    pub way_id: i64,
    /// Footprint area in square meters.
    pub area: f64,
    pub length: f64,
    pub width: f64,
    pub tags: HashMap<String, String>,
    /// Closed ring of footprint vertices.
    pub footprint: Vec<Coordinate>,
    pub company: Company,
    pub addresses_nearby: Vec<Address>,
    pub center: Coordinate,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Building {
    pub fn from_resource(resource: BuildingResource) -> Self {
        let center = Coordinate::new(
            (resource.lat_max - resource.lat_min).abs() / 2.0 + resource.lat_min,
            (resource.lon_max - resource.lon_min).abs() / 2.0 + resource.lon_min,
        );
        let mut addresses_nearby: Vec<Address> = resource
            .addresses_nearby
            .into_iter()
            .map(Address::from_resource)
            .collect();
        addresses_nearby.sort_by(|a, b| {
            let da = a.coordinate().distance_to(&center);
            let db = b.coordinate().distance_to(&center);
            da.total_cmp(&db)
        });
        Self {
            way_id: resource.way_id,
            area: resource.area,
            length: resource.length,
            width: resource.width,
            tags: resource.tags,
            footprint: resource.geometry,
            company: Company::from_resource(resource.company),
            addresses_nearby,
            center,
            lat_min: resource.lat_min,
            lat_max: resource.lat_max,
            lon_min: resource.lon_min,
            lon_max: resource.lon_max,
        }
    }

    pub fn from_resources(resources: Vec<BuildingResource>) -> Vec<Building> {
        resources.into_iter().map(Building::from_resource).collect()
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.lon_min, self.lat_min, self.lon_max, self.lat_max)
    }

    /// Species whose floor-space minimum sizes the synthetic point count.
    pub fn placement_animal_type(&self) -> AnimalType {
        self.company.placement_animal_type()
    }

    /// Target number of animal points for this building.
    pub fn animal_capacity(&self) -> f64 {
        self.area
            / self
                .placement_animal_type()
                .minimal_square_meters_per_animal()
    }

    pub fn osm_url(&self) -> String {
        format!("https://www.openstreetmap.org/way/{}", self.way_id)
    }
}
